use crate::services::PreviewRow;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

pub async fn load_data(State(state): State<AppState>) -> Result<Json<Vec<PreviewRow>>, AppError> {
    let rows = state.preview.rows().await?;
    tracing::debug!(rows = rows.len(), path = %state.preview.path().display(), "Served data preview");
    Ok(Json(rows))
}
