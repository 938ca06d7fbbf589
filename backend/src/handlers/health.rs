//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub history_records: usize,
    pub sensor_feed: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Report whether the poller has produced a reading yet
    let sensor_feed = if state.config.sensor.feed_url.is_none() {
        "disabled"
    } else if state.live.read().await.is_some() {
        "live"
    } else {
        "waiting"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        history_records: state.history.len(),
        sensor_feed: sensor_feed.to_string(),
    })
}
