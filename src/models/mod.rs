pub mod article;
pub mod inquiry;
pub mod review;

pub use article::{Article, ArticleSummary, Faq, TocEntry};
pub use inquiry::Inquiry;
pub use review::{Platform, Review};
