pub mod resend;

use async_trait::async_trait;

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_email(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        html: &str,
    ) -> anyhow::Result<()>;
}
