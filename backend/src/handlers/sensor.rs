//! HTTP handlers for the live station feed

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::external::LiveReading;
use crate::AppState;

/// Latest reading stored by the poller
pub async fn latest_sensor_reading(State(state): State<AppState>) -> AppResult<Json<LiveReading>> {
    let latest = state.live.read().await.clone();
    latest.map(Json).ok_or(AppError::SensorUnavailable)
}
