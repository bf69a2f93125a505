//! Linear classifier restored from a JSON export of a fitted logistic
//! regression (optionally preceded by a standard scaler).

use super::classifier::{Classifier, ModelError};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression,
}

/// Standardisation applied before the decision function: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk shape of the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub estimator: Estimator,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    /// One row for binary models, one row per class otherwise.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Scaler>,
}

#[derive(Debug, Clone)]
struct Standardiser {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    feature_names: Vec<String>,
    classes: Vec<i64>,
    /// `(score rows, features)`
    coefficients: Array2<f64>,
    intercepts: Array1<f64>,
    scaler: Option<Standardiser>,
}

impl LinearClassifier {
    /// Validates the artifact's shapes. The error is a human-readable reason.
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, String> {
        let LinearArtifact {
            estimator: _,
            feature_names,
            classes,
            coefficients,
            intercepts,
            scaler,
        } = artifact;

        let width = feature_names.len();
        if width == 0 {
            return Err("artifact lists no features".to_string());
        }
        if classes.len() < 2 {
            return Err(format!("expected at least 2 classes, found {}", classes.len()));
        }

        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coefficients.len() != expected_rows {
            return Err(format!(
                "{} classes need {} coefficient rows, found {}",
                classes.len(),
                expected_rows,
                coefficients.len()
            ));
        }
        if intercepts.len() != expected_rows {
            return Err(format!(
                "expected {} intercepts, found {}",
                expected_rows,
                intercepts.len()
            ));
        }
        if let Some((index, row)) = coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(format!(
                "coefficient row {} has {} values for {} features",
                index,
                row.len(),
                width
            ));
        }
        if coefficients.iter().flatten().chain(&intercepts).any(|v| !v.is_finite()) {
            return Err("coefficients must be finite".to_string());
        }

        let scaler = match scaler {
            Some(scaler) => {
                if scaler.mean.len() != width || scaler.scale.len() != width {
                    return Err(format!(
                        "scaler has {} means and {} scales for {} features",
                        scaler.mean.len(),
                        scaler.scale.len(),
                        width
                    ));
                }
                if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                    return Err("scaler scale values must be finite and non-zero".to_string());
                }
                Some(Standardiser {
                    mean: Array1::from(scaler.mean),
                    scale: Array1::from(scaler.scale),
                })
            }
            None => None,
        };

        let flat: Vec<f64> = coefficients.into_iter().flatten().collect();
        let coefficients =
            Array2::from_shape_vec((expected_rows, width), flat).map_err(|e| e.to_string())?;

        Ok(Self {
            feature_names,
            classes,
            coefficients,
            intercepts: Array1::from(intercepts),
            scaler,
        })
    }

    /// Decision function for a batch: one row of scores per input row.
    fn decision_scores(&self, rows: &[Vec<f64>]) -> Result<Array2<f64>, ModelError> {
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let mut x = Array2::from_shape_vec((rows.len(), self.n_features()), flat)
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        if let Some(scaler) = &self.scaler {
            x = (&x - &scaler.mean) / &scaler.scale;
        }

        Ok(x.dot(&self.coefficients.t()) + &self.intercepts)
    }

    fn label_for(&self, scores: ArrayView1<f64>) -> i64 {
        if self.classes.len() == 2 {
            // A zero score falls on the negative class.
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        // First maximum wins on ties.
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, &score) in scores.iter().enumerate() {
            if score > best_score {
                best = index;
                best_score = score;
            }
        }
        self.classes[best]
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>, ModelError> {
        let expected = self.n_features();
        if let Some(row) = rows.iter().find(|row| row.len() != expected) {
            return Err(ModelError::SchemaMismatch {
                expected,
                actual: row.len(),
            });
        }

        let scores = self.decision_scores(rows)?;
        Ok(scores
            .axis_iter(Axis(0))
            .map(|row| self.label_for(row))
            .collect())
    }
}
