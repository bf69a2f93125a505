use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use metrics::counter;
use service_core::error::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 401 unless `x-api-key` matches the configured secret.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(e) = state.key_guard.authorize(provided) {
        tracing::warn!(
            path = %request.uri().path(),
            header_present = provided.is_some(),
            "Rejected request with invalid or missing API key"
        );
        counter!("api_key_rejections_total").increment(1);
        return Err(AppError::Unauthorized(anyhow::Error::new(e)));
    }

    Ok(next.run(request).await)
}
