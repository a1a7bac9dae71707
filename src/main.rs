use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use detailshop::config::AppConfig;
use detailshop::db;
use detailshop::handlers;
use detailshop::services::mail::resend::ResendProvider;
use detailshop::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    config.validate()?;

    let conn = db::init_db(&config.database_url)?;
    {
        let article_count = db::queries::count_articles(&conn)?;
        tracing::info!(article_count, "article store ready");
    }

    let mailer = ResendProvider::new(config.resend_api_key.clone());

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        mailer: Box::new(mailer),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/api/articles", get(handlers::articles::list_articles))
        .route("/api/articles/:slug", get(handlers::articles::get_article))
        .route("/api/reviews", get(handlers::reviews::list_reviews))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
