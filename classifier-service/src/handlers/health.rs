use crate::dtos::MessageResponse;
use crate::services::get_metrics;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from Railway"))
}

/// Liveness plus whether the model made it into memory.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, model) = if state.inference.model().is_loaded() {
        ("ok", "loaded")
    } else {
        ("degraded", "unavailable")
    };

    Json(json!({
        "status": status,
        "service": "classifier-service",
        "version": env!("CARGO_PKG_VERSION"),
        "variant": state.inference.variant().as_str(),
        "model": model,
    }))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
