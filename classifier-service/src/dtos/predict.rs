use crate::models::IRIS_FEATURE_COUNT;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const ROW_WIDTH_MESSAGE: &str = "Each input must have exactly 4 features";

/// One tumour measurement record. Field order is the model's column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreastCancerInput {
    pub mean_radius: f64,
    pub mean_texture: f64,
    pub mean_perimeter: f64,
    pub mean_area: f64,
    pub mean_smoothness: f64,
    pub mean_compactness: f64,
    pub mean_concavity: f64,
    pub mean_concave_points: f64,
    pub mean_symmetry: f64,
    pub mean_fractal_dimension: f64,
    pub radius_error: f64,
    pub texture_error: f64,
    pub perimeter_error: f64,
    pub area_error: f64,
    pub smoothness_error: f64,
    pub compactness_error: f64,
    pub concavity_error: f64,
    pub concave_points_error: f64,
    pub symmetry_error: f64,
    pub fractal_dimension_error: f64,
    pub worst_radius: f64,
    pub worst_texture: f64,
    pub worst_perimeter: f64,
    pub worst_area: f64,
    pub worst_smoothness: f64,
    pub worst_compactness: f64,
    pub worst_concavity: f64,
    pub worst_concave_points: f64,
    pub worst_symmetry: f64,
    pub worst_fractal_dimension: f64,
}

impl BreastCancerInput {
    /// Feature vector in declaration order.
    pub fn to_features(&self) -> Vec<f64> {
        vec![
            self.mean_radius,
            self.mean_texture,
            self.mean_perimeter,
            self.mean_area,
            self.mean_smoothness,
            self.mean_compactness,
            self.mean_concavity,
            self.mean_concave_points,
            self.mean_symmetry,
            self.mean_fractal_dimension,
            self.radius_error,
            self.texture_error,
            self.perimeter_error,
            self.area_error,
            self.smoothness_error,
            self.compactness_error,
            self.concavity_error,
            self.concave_points_error,
            self.symmetry_error,
            self.fractal_dimension_error,
            self.worst_radius,
            self.worst_texture,
            self.worst_perimeter,
            self.worst_area,
            self.worst_smoothness,
            self.worst_compactness,
            self.worst_concavity,
            self.worst_concave_points,
            self.worst_symmetry,
            self.worst_fractal_dimension,
        ]
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub prediction: i64,
    pub diagnosis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpeciesRequest {
    #[validate(custom(function = "validate_row_widths"))]
    pub features: Vec<Vec<f64>>,
}

/// Every row must carry exactly four measurements.
fn validate_row_widths(features: &[Vec<f64>]) -> Result<(), ValidationError> {
    if features.iter().all(|row| row.len() == IRIS_FEATURE_COUNT) {
        return Ok(());
    }
    let mut error = ValidationError::new("row_width");
    error.message = Some(Cow::Borrowed(ROW_WIDTH_MESSAGE));
    Err(error)
}

/// First human-readable message carried by a failed validation.
pub fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| ROW_WIDTH_MESSAGE.to_string())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeciesResponse {
    pub predictions: Vec<String>,
}

/// Shape error reported in a successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionErrorResponse {
    pub error: String,
}
