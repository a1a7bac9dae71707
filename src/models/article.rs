use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Published article record. Authored by an external process; the site only
/// ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub category_slug: String,
    pub excerpt: String,
    /// HTML body as authored.
    pub content: String,
    /// Estimated reading time in minutes.
    pub reading_time: i64,
    pub published_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub related_service_slug: Option<String>,
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Listing projection — everything but the body and FAQs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub category_slug: String,
    pub excerpt: String,
    pub reading_time: i64,
    pub published_at: NaiveDate,
}

impl From<&Article> for ArticleSummary {
    fn from(a: &Article) -> Self {
        Self {
            slug: a.slug.clone(),
            title: a.title.clone(),
            category: a.category.clone(),
            category_slug: a.category_slug.clone(),
            excerpt: a.excerpt.clone(),
            reading_time: a.reading_time,
            published_at: a.published_at,
        }
    }
}

/// One table-of-contents anchor, derived from a heading in the article HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}
