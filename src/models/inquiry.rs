use serde::Deserialize;

/// Contact form payload. Transient — composed into two outbound emails,
/// never persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub vehicle_year: String,
    #[serde(default)]
    pub vehicle_make: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub vehicle_color: String,
}

impl Inquiry {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Presence predicate for the vehicle-details block: the form marks the
    /// group as filled in by requiring a year.
    pub fn has_vehicle_info(&self) -> bool {
        !self.vehicle_year.trim().is_empty()
    }

    /// Names of required fields that are empty or malformed.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("firstName");
        }
        if self.last_name.trim().is_empty() {
            missing.push("lastName");
        }
        if !looks_like_email(self.email.trim()) {
            missing.push("email");
        }
        if self.service.trim().is_empty() {
            missing.push("service");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        missing
    }
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
