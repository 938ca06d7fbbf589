//! HTTP handlers for classification endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::AppResult;
use crate::services::classification::{
    ClassificationResponse, ClassificationService, ClassifyInput, CurrentClassification,
};
use crate::AppState;

fn service(state: &AppState) -> ClassificationService {
    ClassificationService::new(state.classifier, state.history.clone(), state.live.clone())
}

/// Classify a submitted reading
pub async fn classify_reading(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyInput>, JsonRejection>,
) -> AppResult<Json<ClassificationResponse>> {
    let Json(input) = payload?;
    let response = service(&state).classify(&input.reading, input.compare_history.unwrap_or(true))?;
    Ok(Json(response))
}

/// Classify the latest live reading, or the last historical row
pub async fn classify_current(
    State(state): State<AppState>,
) -> AppResult<Json<CurrentClassification>> {
    let current = service(&state).classify_current().await?;
    Ok(Json(current))
}
