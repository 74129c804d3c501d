//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "custom_slug": "promo",             // optional
///   "expires_at": "2026-12-31T00:00:00Z", // optional
///   "owner_id": "user-42"               // optional
/// }
/// ```
///
/// # Responses
///
/// - `201 Created` with the slug and the full short URL
/// - `400 invalid_url` / `400 invalid_slug_format` on validation failure,
///   before any store write
/// - `409 slug_conflict` when a custom slug is taken
/// - `500 slug_space_exhausted` when generation keeps colliding
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate().map_err(validation_error)?;

    let link = state
        .link_service
        .create_short_link(
            payload.original_url,
            payload.custom_slug,
            payload.expires_at,
            payload.owner_id,
        )
        .await?;

    let short_url = state.link_service.get_short_url(&link.slug);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_link(link, short_url)),
    ))
}

/// Maps DTO-level validation failures onto the error taxonomy by field.
fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let details = json!({ "fields": errors.to_string() });

    if errors.field_errors().contains_key("custom_slug") {
        AppError::invalid_slug("Invalid custom slug", details)
    } else {
        AppError::invalid_url("Invalid URL format", details)
    }
}
