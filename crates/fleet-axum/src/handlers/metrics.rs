//! Metrics handler - point-in-time service statistics.

use axum::Json;
use axum::extract::State;

use crate::error::HttpError;
use crate::state::AppState;
use fleet_core::services::MetricsSnapshot;

/// Snapshot of counts, revenue, uptime and request volume.
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<MetricsSnapshot>, HttpError> {
    Ok(Json(state.metrics.snapshot().await?))
}
