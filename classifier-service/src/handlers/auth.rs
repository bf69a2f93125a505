use crate::dtos::MessageResponse;
use axum::Json;

/// Reachable only through the API key middleware.
pub async fn auth_check() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Hello from Railway — secured with API Key",
    ))
}
