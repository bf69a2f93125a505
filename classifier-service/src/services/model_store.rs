//! Loads the model artifact once and hands out a shared read-only handle.

use crate::models::{Classifier, LinearArtifact, LinearClassifier, ModelError, ModelVariant};
use std::path::Path;
use std::sync::Arc;

/// Reads and validates a JSON model artifact.
pub async fn load_artifact(path: impl AsRef<Path>) -> Result<LinearClassifier, ModelError> {
    let path = path.as_ref();

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ModelError::ArtifactMissing(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ModelError::ArtifactCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    let artifact: LinearArtifact =
        serde_json::from_slice(&bytes).map_err(|e| ModelError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    LinearClassifier::from_artifact(artifact).map_err(|reason| ModelError::ArtifactCorrupt {
        path: path.to_path_buf(),
        reason,
    })
}

/// `"mean concave points"` and `"mean_concave_points"` compare equal.
fn normalise_feature_name(name: &str) -> String {
    let mut normalised = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            normalised.push(c.to_ascii_lowercase());
        } else if !normalised.ends_with('_') {
            normalised.push('_');
        }
    }
    normalised.trim_end_matches('_').to_string()
}

/// The artifact must accept exactly the rows the variant's endpoint produces.
pub fn check_schema(model: &dyn Classifier, variant: ModelVariant) -> Result<(), ModelError> {
    if model.n_features() != variant.feature_count() {
        return Err(ModelError::SchemaMismatch {
            expected: variant.feature_count(),
            actual: model.n_features(),
        });
    }

    if let Some(expected_names) = variant.feature_names() {
        for (position, (expected, found)) in expected_names
            .iter()
            .zip(model.feature_names())
            .enumerate()
        {
            if normalise_feature_name(expected) != normalise_feature_name(found) {
                return Err(ModelError::FeatureOrderMismatch {
                    position,
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Process-wide model slot, filled once at startup.
///
/// A failed load is kept rather than aborting startup: prediction requests
/// report the model as unavailable while every other route keeps serving.
#[derive(Clone)]
pub struct ModelHandle {
    inner: Arc<Result<Arc<dyn Classifier>, ModelError>>,
}

impl ModelHandle {
    pub async fn load(path: impl AsRef<Path>, variant: ModelVariant) -> Self {
        let path = path.as_ref();
        let loaded = load_artifact(path).await.and_then(|model| {
            check_schema(&model, variant)?;
            Ok(model)
        });

        match loaded {
            Ok(model) => {
                tracing::info!(
                    path = %path.display(),
                    variant = %variant,
                    features = model.n_features(),
                    classes = ?model.classes(),
                    "Model loaded"
                );
                Self::ready(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    variant = %variant,
                    error = %e,
                    "Failed to load model; /predict will report it unavailable"
                );
                Self::unavailable(e)
            }
        }
    }

    pub fn ready(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            inner: Arc::new(Ok(classifier)),
        }
    }

    pub fn unavailable(error: ModelError) -> Self {
        Self {
            inner: Arc::new(Err(error)),
        }
    }

    pub fn classifier(&self) -> Result<Arc<dyn Classifier>, ModelError> {
        match self.inner.as_ref() {
            Ok(classifier) => Ok(Arc::clone(classifier)),
            Err(e) => Err(ModelError::Unavailable(e.to_string())),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_ok()
    }

    /// Why the model could not be loaded, if it could not.
    pub fn load_error(&self) -> Option<&ModelError> {
        self.inner.as_ref().as_ref().err()
    }
}
