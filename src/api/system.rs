use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, HealthDto};

/// `GET /api/health`
///
/// Succeeds only while the store answers a ping.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthDto>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(HealthDto {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
