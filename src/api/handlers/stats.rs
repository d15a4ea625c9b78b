//! Handler for redirect statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns redirect statistics for a short code.
///
/// # Endpoint
///
/// `GET /{code}/stats`
///
/// Expired links still report their statistics.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.url_service.get_stats(&code).await?;

    Ok(Json(StatsResponse::new(code, stats)))
}
