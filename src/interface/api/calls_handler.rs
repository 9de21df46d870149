//! Call Management API handlers

use super::call_dto::{
    CallStatusQuery, ExtensionInfo, HangupRequest, HangupResponse, HealthResponse,
    MakeCallRequest,
};
use super::error::ApiError;
use super::state::AppState;
use crate::domain::call::Call;
use crate::domain::shared::value_objects::CallId;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use tracing::{info, warn};

/// Service health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "catiSip".to_string(),
    })
}

/// Place a call
pub async fn make_call(
    State(state): State<AppState>,
    payload: Result<Json<MakeCallRequest>, JsonRejection>,
) -> Result<Json<Call>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!("API: Rejected call request body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    if req.from.is_empty() || req.to.is_empty() {
        return Err(ApiError::BadRequest(
            "Both 'from' and 'to' fields are required".to_string(),
        ));
    }

    info!("API: Placing call {} -> {}", req.from, req.to);
    let call = state.registry.place_call(&req.from, &req.to).await;

    Ok(Json(call))
}

/// Hang up a call
pub async fn hangup_call(
    State(state): State<AppState>,
    payload: Result<Json<HangupRequest>, JsonRejection>,
) -> Result<Json<HangupResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!("API: Rejected hangup request body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    if req.call_id.is_empty() {
        return Err(ApiError::BadRequest("call_id is required".to_string()));
    }

    info!("API: Hanging up call ID: {}", req.call_id);
    state.registry.hangup(&CallId::from(req.call_id)).await?;

    Ok(Json(HangupResponse::ended()))
}

/// Get the current state of one call
pub async fn call_status(
    State(state): State<AppState>,
    Query(query): Query<CallStatusQuery>,
) -> Result<Json<Call>, ApiError> {
    let call_id = query
        .call_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("call_id parameter is required".to_string()))?;

    info!("API: Getting call status ID: {}", call_id);
    let call = state.registry.get_status(&CallId::from(call_id)).await?;

    Ok(Json(call))
}

/// List every call the registry knows about
pub async fn list_calls(State(state): State<AppState>) -> Json<Vec<Call>> {
    info!("API: Listing calls");
    Json(state.registry.list_calls().await)
}

/// Available SIP extensions.
///
/// Static for now; there is no registrar to ask.
pub async fn list_extensions() -> Json<Vec<ExtensionInfo>> {
    Json(vec![
        ExtensionInfo::new("1000", "registered"),
        ExtensionInfo::new("1001", "registered"),
        ExtensionInfo::new("1002", "available"),
    ])
}
