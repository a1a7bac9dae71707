use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Yelp,
    Direct,
}

impl Platform {
    pub fn parse(s: &str) -> Self {
        match s {
            "google" => Platform::Google,
            "yelp" => Platform::Yelp,
            _ => Platform::Direct,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Yelp => "yelp",
            Platform::Direct => "direct",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    /// 1 through 5.
    pub rating: i64,
    pub text: String,
    pub service: String,
    pub date: NaiveDate,
    pub platform: Platform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip() {
        for p in [Platform::Google, Platform::Yelp, Platform::Direct] {
            assert_eq!(Platform::parse(p.as_str()), p);
        }
    }

    #[test]
    fn test_unknown_platform_defaults_to_direct() {
        assert_eq!(Platform::parse("facebook"), Platform::Direct);
    }
}
