//! HTTP handlers for the climate profile and crop tables

use axum::{
    extract::{Path, State},
    Json,
};

use shared::{ClimateCluster, CropProfile};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all climate profiles
pub async fn list_clusters(State(state): State<AppState>) -> Json<Vec<ClimateCluster>> {
    Json(state.classifier.clusters().to_vec())
}

/// Get a climate profile by ID
pub async fn get_cluster(
    State(state): State<AppState>,
    Path(cluster_id): Path<u8>,
) -> AppResult<Json<ClimateCluster>> {
    state
        .classifier
        .clusters()
        .iter()
        .find(|c| c.id == cluster_id)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Climate profile {}", cluster_id)))
}

/// List crop viability profiles
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropProfile>> {
    Json(state.classifier.crops().to_vec())
}
