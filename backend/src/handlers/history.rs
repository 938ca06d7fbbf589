//! HTTP handlers for the historical dataset

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use shared::{HistoricalStats, PaginatedResponse, Pagination};

use crate::error::{AppError, AppResult};
use crate::services::history::HistoricalRecord;
use crate::AppState;

const MAX_PER_PAGE: u32 = 500;

/// List historical rows, one page at a time
pub async fn list_history(
    State(state): State<AppState>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> AppResult<Json<PaginatedResponse<HistoricalRecord>>> {
    let Query(pagination) = query?;
    if pagination.page == 0 || pagination.per_page == 0 || pagination.per_page > MAX_PER_PAGE {
        return Err(AppError::ValidationError(format!(
            "page must be at least 1 and per_page between 1 and {}",
            MAX_PER_PAGE
        )));
    }
    Ok(Json(state.history.page(&pagination)))
}

/// Statistics over the historical dataset
pub async fn history_stats(State(state): State<AppState>) -> Json<HistoricalStats> {
    Json(state.history.stats(state.classifier.clusters()))
}

/// Download the historical readings as CSV
pub async fn export_history(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = state.history.export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"climate_history.csv\""),
        ],
        csv,
    ))
}
