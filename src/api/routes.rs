//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, link_stats_handler, list_links_handler, record_visit_handler,
    shorten_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All REST API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create a shortened URL
/// - `POST   /visits`         - Record a visit event with client attributes
/// - `GET    /links`          - List links (paginated)
/// - `GET    /links/{slug}`   - Link statistics with recent visits
/// - `PATCH  /links/{slug}`   - Update a link's expiration
/// - `DELETE /links/{slug}`   - Delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/visits", post(record_visit_handler))
        .route("/links", get(list_links_handler))
        .route(
            "/links/{slug}",
            get(link_stats_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
}
