//! Maps domain failures onto `AppError`, and from there to HTTP statuses.

use crate::models::ModelError;
use crate::services::PreviewError;
use service_core::error::AppError;

const MODEL_UNAVAILABLE: &str = "Model unavailable";
const CSV_NOT_FOUND: &str = "Fichier CSV introuvable";

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ArtifactMissing(_)
            | ModelError::ArtifactCorrupt { .. }
            | ModelError::FeatureOrderMismatch { .. }
            | ModelError::Unavailable(_) => {
                tracing::error!(error = %err, "Prediction requested while model is unavailable");
                AppError::Unavailable(MODEL_UNAVAILABLE.to_string())
            }
            ModelError::SchemaMismatch { .. }
            | ModelError::UnknownLabel(_)
            | ModelError::InferenceFailed(_) => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

impl From<PreviewError> for AppError {
    fn from(err: PreviewError) -> Self {
        match err {
            PreviewError::FileMissing(path) => {
                tracing::warn!(path = %path.display(), "Preview CSV not found");
                AppError::NotFound(anyhow::anyhow!(CSV_NOT_FOUND))
            }
            PreviewError::Unreadable { .. } => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}
