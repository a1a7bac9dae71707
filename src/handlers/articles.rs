use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Article, ArticleSummary, TocEntry};
use crate::services::toc;
use crate::state::AppState;

const RELATED_LIMIT: i64 = 3;

// GET /api/articles
#[derive(Deserialize)]
pub struct ArticlesQuery {
    pub category: Option<String>,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<Vec<ArticleSummary>>, AppError> {
    let articles = {
        let db = state.db.lock().unwrap();
        match query.category.as_deref() {
            Some(category_slug) => queries::list_articles_in_category(&db, category_slug)?,
            None => queries::list_articles(&db)?,
        }
    };

    Ok(Json(articles.iter().map(ArticleSummary::from).collect()))
}

// GET /api/articles/:slug
#[derive(Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub article: Article,
    pub toc: Vec<TocEntry>,
    pub related: Vec<ArticleSummary>,
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleResponse>, AppError> {
    let (article, related) = {
        let db = state.db.lock().unwrap();
        let article = queries::get_article_by_slug(&db, &slug)?
            .ok_or_else(|| AppError::NotFound(format!("no article with slug '{slug}'")))?;
        let related = queries::list_articles_by_category(
            &db,
            &article.category_slug,
            &article.slug,
            RELATED_LIMIT,
        )?;
        (article, related)
    };

    let toc = toc::extract_toc(&article.content);

    Ok(Json(ArticleResponse {
        toc,
        related: related.iter().map(ArticleSummary::from).collect(),
        article,
    }))
}
