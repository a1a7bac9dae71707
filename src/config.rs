use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub resend_api_key: String,
    pub contact_from_email: String,
    pub contact_to_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "detailshop.db".to_string()),
            resend_api_key: env::var("RESEND_API_KEY").unwrap_or_default(),
            contact_from_email: env::var("CONTACT_FROM_EMAIL")
                .unwrap_or_else(|_| "Prime Detail <contact@primedetail.example>".to_string()),
            contact_to_email: env::var("CONTACT_TO_EMAIL").unwrap_or_default(),
        }
    }

    /// Settings without a usable default; checked once at startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.resend_api_key.is_empty(),
            "RESEND_API_KEY must be set"
        );
        anyhow::ensure!(
            !self.contact_to_email.is_empty(),
            "CONTACT_TO_EMAIL must be set"
        );
        Ok(())
    }
}
