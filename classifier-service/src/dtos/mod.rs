pub mod predict;

use serde::{Deserialize, Serialize};

pub use predict::{
    validation_message, BreastCancerInput, DiagnosisResponse, PredictionErrorResponse,
    SpeciesRequest, SpeciesResponse,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
