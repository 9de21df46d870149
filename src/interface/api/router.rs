//! API Router configuration

use super::calls_handler::{
    call_status, hangup_call, health_check, list_calls, list_extensions, make_call,
};
use super::feedback_handler::{list_feedback, submit_feedback};
use super::metrics_handler::{metrics_handler, track_http_metrics};
use super::state::AppState;
use super::ws_handler::ws_handler;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Liveness probe, plain text
    let probe_routes = Router::new().route("/health", get(|| async { "OK" }));

    let call_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/call/make", post(make_call))
        .route("/api/call/hangup", post(hangup_call))
        .route("/api/call/status", get(call_status))
        .route("/api/calls", get(list_calls))
        .route("/api/extensions", get(list_extensions));

    let feedback_routes =
        Router::new().route("/api/feedback", get(list_feedback).post(submit_feedback));

    let ws_routes = Router::new().route("/ws", get(ws_handler));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .merge(probe_routes)
        .merge(call_routes)
        .merge(feedback_routes)
        .merge(ws_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(middleware::from_fn(track_http_metrics))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
