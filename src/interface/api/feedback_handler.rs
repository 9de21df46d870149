//! Feedback API handlers

use super::error::ApiError;
use super::state::AppState;
use crate::domain::feedback::{Feedback, NewFeedback};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

/// Submit feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<NewFeedback>, JsonRejection>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let Json(submission) = payload.map_err(|e| {
        warn!("API: Rejected feedback body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let feedback = state.feedback.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// List all feedback
pub async fn list_feedback(State(state): State<AppState>) -> Json<Vec<Feedback>> {
    info!("API: Listing feedback");
    Json(state.feedback.list().await)
}
