use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::models::{Article, Review};

// ── Articles ──

fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    let published_at_str: String = row.get(7)?;
    let updated_at_str: String = row.get(8)?;
    let faqs_json: String = row.get(10)?;

    Ok(Article {
        slug: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        category_slug: row.get(3)?,
        excerpt: row.get(4)?,
        content: row.get(5)?,
        reading_time: row.get(6)?,
        published_at: parse_date(&published_at_str, 7)?,
        updated_at: parse_date(&updated_at_str, 8)?,
        related_service_slug: row.get(9)?,
        faqs: serde_json::from_str(&faqs_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?,
    })
}

fn parse_date(s: &str, column: usize) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

const ARTICLE_COLUMNS: &str = "slug, title, category, category_slug, excerpt, content, \
     reading_time, published_at, updated_at, related_service_slug, faqs";

pub fn get_article_by_slug(conn: &Connection, slug: &str) -> anyhow::Result<Option<Article>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = ?1"
    ))?;

    match stmt.query_row(params![slug], article_from_row) {
        Ok(article) => Ok(Some(article)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_articles(conn: &Connection) -> anyhow::Result<Vec<Article>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY published_at DESC, slug"
    ))?;
    let rows = stmt.query_map([], article_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn list_articles_in_category(
    conn: &Connection,
    category_slug: &str,
) -> anyhow::Result<Vec<Article>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles
         WHERE category_slug = ?1
         ORDER BY published_at DESC, slug"
    ))?;
    let rows = stmt.query_map(params![category_slug], article_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Articles in a category, excluding one slug (the article being viewed).
pub fn list_articles_by_category(
    conn: &Connection,
    category_slug: &str,
    exclude_slug: &str,
    limit: i64,
) -> anyhow::Result<Vec<Article>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles
         WHERE category_slug = ?1 AND slug != ?2
         ORDER BY published_at DESC, slug
         LIMIT ?3"
    ))?;
    let rows = stmt.query_map(params![category_slug, exclude_slug, limit], article_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn count_articles(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
    Ok(count)
}

/// Write path for the external authoring sync. The site itself never calls
/// this at request time.
pub fn upsert_article(conn: &Connection, article: &Article) -> anyhow::Result<()> {
    let faqs_json = serde_json::to_string(&article.faqs)?;
    conn.execute(
        "INSERT INTO articles (slug, title, category, category_slug, excerpt, content,
            reading_time, published_at, updated_at, related_service_slug, faqs)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(slug) DO UPDATE SET
            title = excluded.title,
            category = excluded.category,
            category_slug = excluded.category_slug,
            excerpt = excluded.excerpt,
            content = excluded.content,
            reading_time = excluded.reading_time,
            published_at = excluded.published_at,
            updated_at = excluded.updated_at,
            related_service_slug = excluded.related_service_slug,
            faqs = excluded.faqs",
        params![
            article.slug,
            article.title,
            article.category,
            article.category_slug,
            article.excerpt,
            article.content,
            article.reading_time,
            article.published_at.format("%Y-%m-%d").to_string(),
            article.updated_at.format("%Y-%m-%d").to_string(),
            article.related_service_slug,
            faqs_json,
        ],
    )?;
    Ok(())
}

// ── Reviews ──

pub fn list_reviews(conn: &Connection) -> anyhow::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT id, author, rating, text, service, date, platform
         FROM reviews ORDER BY date DESC, id",
    )?;

    let rows = stmt.query_map([], |row| {
        let date_str: String = row.get(5)?;
        let platform_str: String = row.get(6)?;
        Ok(Review {
            id: row.get(0)?,
            author: row.get(1)?,
            rating: row.get(2)?,
            text: row.get(3)?,
            service: row.get(4)?,
            date: parse_date(&date_str, 5)?,
            platform: crate::models::Platform::parse(&platform_str),
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
