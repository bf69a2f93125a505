use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("model artifact at {} is corrupt: {reason}", .path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("expected {expected} features per row, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("feature {position} is '{found}' in the artifact, expected '{expected}'")]
    FeatureOrderMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("model produced class {0} which has no label")]
    UnknownLabel(i64),

    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

impl ModelError {
    /// Short stable name used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::ArtifactMissing(_) => "artifact_missing",
            ModelError::ArtifactCorrupt { .. } => "artifact_corrupt",
            ModelError::SchemaMismatch { .. } => "schema_mismatch",
            ModelError::FeatureOrderMismatch { .. } => "feature_order_mismatch",
            ModelError::UnknownLabel(_) => "unknown_label",
            ModelError::Unavailable(_) => "unavailable",
            ModelError::InferenceFailed(_) => "inference_failed",
        }
    }
}

/// A fitted model that assigns one class per feature row.
///
/// Implementations are immutable after construction and shared across
/// request handlers behind an `Arc`.
pub trait Classifier: Send + Sync {
    /// Width every input row must have.
    fn n_features(&self) -> usize;

    /// Column names in the order the model expects them.
    fn feature_names(&self) -> &[String];

    fn classes(&self) -> &[i64];

    /// Predicts a class for each row. Fails with `SchemaMismatch` on the
    /// first row whose width differs from `n_features`.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>, ModelError>;
}
