//! Route definitions for the crop viability service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Classification
        .nest("/classify", classify_routes())
        // Reference tables
        .nest("/clusters", cluster_routes())
        .route("/crops", get(handlers::list_crops))
        // Historical dataset
        .nest("/history", history_routes())
        // Live station feed
        .route("/sensor/latest", get(handlers::latest_sensor_reading))
}

/// Classification routes
fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::classify_reading))
        .route("/current", get(handlers::classify_current))
}

/// Climate profile routes
fn cluster_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_clusters))
        .route("/:cluster_id", get(handlers::get_cluster))
}

/// Historical dataset routes
fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_history))
        .route("/stats", get(handlers::history_stats))
        .route("/export", get(handlers::export_history))
}
