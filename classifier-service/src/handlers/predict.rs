use crate::dtos::{
    validation_message, BreastCancerInput, DiagnosisResponse, PredictionErrorResponse,
    SpeciesRequest, SpeciesResponse,
};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

fn reject_body(rejection: JsonRejection) -> AppError {
    AppError::ValidationError(rejection.body_text())
}

/// `POST /predict` for the 30-field breast-cancer record.
pub async fn predict_diagnosis(
    State(state): State<AppState>,
    payload: Result<Json<BreastCancerInput>, JsonRejection>,
) -> Result<Json<DiagnosisResponse>, AppError> {
    let Json(input) = payload.map_err(reject_body)?;

    let result = state.inference.diagnose(input.to_features()).await?;
    tracing::info!(
        prediction = result.prediction,
        diagnosis = result.diagnosis,
        "Diagnosis served"
    );

    Ok(Json(DiagnosisResponse {
        prediction: result.prediction,
        diagnosis: result.diagnosis.to_string(),
    }))
}

/// `POST /predict` for batches of four-measurement iris rows.
///
/// A row of the wrong width is reported in a 200 body and the model is not
/// called.
pub async fn predict_species(
    State(state): State<AppState>,
    payload: Result<Json<SpeciesRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(reject_body)?;

    if let Err(errors) = request.validate() {
        tracing::info!(rows = request.features.len(), "Rejected iris batch with bad row width");
        let error = validation_message(&errors);
        return Ok(Json(PredictionErrorResponse { error }).into_response());
    }

    let rows = request.features.len();
    let species = state.inference.classify_species(request.features).await?;
    tracing::info!(rows, "Species predictions served");

    Ok(Json(SpeciesResponse {
        predictions: species.into_iter().map(str::to_string).collect(),
    })
    .into_response())
}
