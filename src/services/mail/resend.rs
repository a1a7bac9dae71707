use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;

use super::EmailProvider;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

pub struct ResendProvider {
    api_key: String,
    client: reqwest::Client,
}

impl ResendProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send_email(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> anyhow::Result<()> {
        self.client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from,
                to,
                subject,
                html,
            })
            .send()
            .await
            .context("failed to reach Resend")?
            .error_for_status()
            .context("Resend API returned error")?;

        Ok(())
    }
}
