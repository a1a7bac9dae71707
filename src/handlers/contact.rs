use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::Inquiry;
use crate::services::contact;
use crate::state::AppState;

// POST /api/contact
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(inquiry): Json<Inquiry>,
) -> Result<Json<serde_json::Value>, AppError> {
    contact::process_inquiry(&state, &inquiry).await?;
    Ok(Json(serde_json::json!({ "status": "success" })))
}
