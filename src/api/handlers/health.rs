//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::warn;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports service health with per-component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// Returns `200` when the database is reachable and the visit queue accepts
/// events, `503` otherwise. A degraded cache does not fail the check since
/// redirects fall back to the database.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match sqlx::query("SELECT 1").execute(state.db.as_ref()).await {
        Ok(_) => CheckStatus::ok(),
        Err(e) => {
            warn!("health check: database unreachable: {}", e);
            CheckStatus::failed(e.to_string())
        }
    };

    let visit_queue = if state.visit_tx.is_closed() {
        CheckStatus::failed("visit worker stopped".to_string())
    } else if state.visit_tx.capacity() == 0 {
        CheckStatus::failed("visit queue full".to_string())
    } else {
        CheckStatus::ok()
    };

    let cache = if state.cache.health_check().await {
        CheckStatus::ok()
    } else {
        warn!("health check: cache unreachable");
        CheckStatus::degraded("cache unreachable".to_string())
    };

    let healthy = database.is_ok() && visit_queue.is_ok();

    let response = HealthResponse {
        status: if healthy { "ok" } else { "unavailable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            visit_queue,
            cache,
        },
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
