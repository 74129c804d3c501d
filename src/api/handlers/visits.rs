//! Handler for the visit recording endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::visits::{RecordVisitRequest, VisitResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Records a visit event with coarse client attributes.
///
/// # Endpoint
///
/// `POST /api/visits`
///
/// # Request Body
///
/// ```json
/// {
///   "link_id": 42,
///   "country": "DE",     // optional
///   "city": "Berlin",    // optional
///   "browser": "Firefox",// optional
///   "os": "Linux",       // optional
///   "device": "desktop"  // optional
/// }
/// ```
///
/// Appends the event to the visit log and increments the link's counter.
///
/// # Errors
///
/// Returns `404 not_found` if the link does not exist.
pub async fn record_visit_handler(
    State(state): State<AppState>,
    Json(payload): Json<RecordVisitRequest>,
) -> Result<(StatusCode, Json<VisitResponse>), AppError> {
    let visit = state
        .analytics_service
        .record_visit(payload.into_new_visit())
        .await?;

    Ok((StatusCode::CREATED, Json(visit.into())))
}
