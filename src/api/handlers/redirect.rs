//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL and counts the visit.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Check the cache for the slug
/// 2. On a hit, count the visit atomically and redirect; a stale entry
///    (deleted or expiry-blocked link) falls through to the database path
/// 3. On a miss, resolve via the database, count, and populate the cache
/// 4. Queue a visit event for the background worker (fire-and-forget)
/// 5. Respond `302 Found` with the original URL in `Location`
///
/// Only links without an expiry are cached; expiring links always resolve
/// through the database so the expiry policy is applied per request.
///
/// # Errors
///
/// Returns `404 not_found` for unknown slugs, and for expired slugs when
/// expired redirects are disabled.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    match state.cache.get_url(&slug).await {
        Ok(Some(cached_url)) => {
            debug!("cache hit for {}", slug);

            if let Some(link_id) = state.link_service.count_visit(&slug).await? {
                send_visit_event(&state, link_id, &headers, addr);
                return Ok(found(&cached_url));
            }

            // The cached entry outlived the link; drop it and let the
            // database path produce the proper error.
            let cache = state.cache.clone();
            let stale_slug = slug.clone();
            tokio::spawn(async move {
                let _ = cache.invalidate(&stale_slug).await;
            });
        }
        Ok(None) => {
            debug!("cache miss for {}", slug);
        }
        Err(e) => {
            error!("cache error: {}", e);
        }
    }

    let link = state.link_service.resolve_redirect(&slug).await?;

    if state.link_service.count_visit(&slug).await?.is_none() {
        // Deleted between resolve and count; report as missing.
        return Err(AppError::not_found(
            "Short link not found",
            serde_json::json!({ "slug": slug }),
        ));
    }

    send_visit_event(&state, link.id, &headers, addr);

    if link.expires_at.is_none() {
        let cache = state.cache.clone();
        let slug_clone = slug.clone();
        let url_clone = link.original_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&slug_clone, &url_clone, None).await {
                error!("failed to cache URL: {}", e);
            }
        });
    }

    Ok(found(&link.original_url))
}

/// Builds a `302 Found` response.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Queues a visit event for asynchronous persistence.
///
/// Best-effort: if the queue is full the event is dropped and only the
/// atomic counter retains the visit.
fn send_visit_event(state: &AppState, link_id: i64, headers: &HeaderMap, addr: SocketAddr) {
    let event = VisitEvent::new(
        link_id,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let _ = state.visit_tx.try_send(event);
}
