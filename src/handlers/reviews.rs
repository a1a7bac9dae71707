use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Review;
use crate::state::AppState;

// GET /api/reviews
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = {
        let db = state.db.lock().unwrap();
        queries::list_reviews(&db)?
    };
    Ok(Json(reviews))
}
