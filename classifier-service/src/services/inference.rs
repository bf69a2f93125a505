use super::model_store::ModelHandle;
use crate::models::{diagnosis_for, species_for, ModelError, ModelVariant};
use metrics::counter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub prediction: i64,
    pub diagnosis: &'static str,
}

/// Runs the shared model and turns class indices into labels.
#[derive(Clone)]
pub struct InferenceService {
    model: ModelHandle,
    variant: ModelVariant,
}

impl InferenceService {
    pub fn new(model: ModelHandle, variant: ModelVariant) -> Self {
        Self { model, variant }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Binary diagnosis for a single feature vector.
    pub async fn diagnose(&self, features: Vec<f64>) -> Result<Diagnosis, ModelError> {
        let result = self.run(vec![features]).await.and_then(|labels| {
            let prediction = labels.first().copied().ok_or_else(|| {
                ModelError::InferenceFailed("model returned no prediction".to_string())
            })?;
            Ok(Diagnosis {
                prediction,
                diagnosis: diagnosis_for(prediction),
            })
        });

        match &result {
            Ok(diagnosis) => self.record_success(diagnosis.diagnosis),
            Err(e) => self.record_failure(e),
        }
        result
    }

    /// Species name for every row, in input order.
    pub async fn classify_species(
        &self,
        rows: Vec<Vec<f64>>,
    ) -> Result<Vec<&'static str>, ModelError> {
        let result = self.run(rows).await.and_then(|labels| {
            labels
                .into_iter()
                .map(|label| species_for(label).ok_or(ModelError::UnknownLabel(label)))
                .collect::<Result<Vec<_>, _>>()
        });

        match &result {
            Ok(species) => {
                for name in species {
                    self.record_success(name);
                }
            }
            Err(e) => self.record_failure(e),
        }
        result
    }

    async fn run(&self, rows: Vec<Vec<f64>>) -> Result<Vec<i64>, ModelError> {
        let classifier = self.model.classifier()?;

        tokio::task::spawn_blocking(move || classifier.predict(&rows))
            .await
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?
    }

    fn record_success(&self, label: &'static str) {
        counter!(
            "predictions_total",
            "variant" => self.variant.as_str(),
            "label" => label
        )
        .increment(1);
    }

    fn record_failure(&self, error: &ModelError) {
        counter!(
            "prediction_failures_total",
            "variant" => self.variant.as_str(),
            "kind" => error.kind()
        )
        .increment(1);
    }
}
