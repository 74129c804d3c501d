//! Handlers for link listing, statistics, and management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::links::{
    LinkStatsResponse, LinkSummary, ListLinksQuery, ListLinksResponse, UpdateLinkRequest,
};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Number of recent visit events returned with link statistics.
const RECENT_VISITS_LIMIT: i64 = 50;

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=20`
///
/// Each item carries the derived `expired` flag used by dashboards to mark
/// inactive links.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let (links, total) = state.link_service.list_links(page, page_size).await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.get_short_url(&link.slug);
            LinkSummary::from_link(link, short_url)
        })
        .collect();

    Ok(Json(ListLinksResponse {
        total,
        page,
        page_size,
        items,
    }))
}

/// Returns a link with its visit statistics.
///
/// # Endpoint
///
/// `GET /api/links/{slug}`
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state
        .analytics_service
        .get_link_stats(&slug, RECENT_VISITS_LIMIT)
        .await?;

    let short_url = state.link_service.get_short_url(&stats.link.slug);

    Ok(Json(LinkStatsResponse::from_stats(stats, short_url)))
}

/// Sets or clears a link's expiration date.
///
/// # Endpoint
///
/// `PATCH /api/links/{slug}` with `{"expires_at": <timestamp|null>}`
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkSummary>, AppError> {
    let link = state
        .link_service
        .update_expiration(&slug, payload.expires_at)
        .await?;

    // The cached mapping may now carry a different expiry policy.
    state.cache.invalidate(&slug).await.ok();

    let short_url = state.link_service.get_short_url(&link.slug);

    Ok(Json(LinkSummary::from_link(link, short_url)))
}

/// Deletes a link and its visit events.
///
/// # Endpoint
///
/// `DELETE /api/links/{slug}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&slug).await?;

    state.cache.invalidate(&slug).await.ok();

    Ok(StatusCode::NO_CONTENT)
}
