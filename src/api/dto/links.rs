//! DTOs for link listing, statistics, and management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::visits::VisitResponse;
use crate::application::services::LinkStats;
use crate::domain::entities::Link;

/// A link as presented in listings and stats.
///
/// `expired` is the derived display state: expiry in the past. It never
/// implies the link stopped redirecting; that depends on service policy.
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub id: i64,
    pub slug: String,
    pub short_url: String,
    pub original_url: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_visited: Option<DateTime<Utc>>,
    pub owner_id: Option<String>,
    pub expired: bool,
}

impl LinkSummary {
    pub fn from_link(link: Link, short_url: String) -> Self {
        let expired = link.is_expired();
        Self {
            id: link.id,
            slug: link.slug,
            short_url,
            original_url: link.original_url,
            visit_count: link.visit_count,
            created_at: link.created_at,
            expires_at: link.expires_at,
            last_visited: link.last_visited,
            owner_id: link.owner_id,
            expired,
        }
    }
}

/// Pagination query for link listings.
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Paginated link listing.
#[derive(Debug, Serialize)]
pub struct ListLinksResponse {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub items: Vec<LinkSummary>,
}

/// Per-link statistics with recent visit events.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    #[serde(flatten)]
    pub link: LinkSummary,
    pub total_visits: i64,
    pub recent_visits: Vec<VisitResponse>,
}

impl LinkStatsResponse {
    pub fn from_stats(stats: LinkStats, short_url: String) -> Self {
        Self {
            link: LinkSummary::from_link(stats.link, short_url),
            total_visits: stats.total_visits,
            recent_visits: stats
                .recent_visits
                .into_iter()
                .map(VisitResponse::from)
                .collect(),
        }
    }
}

/// Request to update a link's expiration.
///
/// `expires_at: null` (or an absent field) clears the expiry.
#[derive(Debug, Deserialize)]
pub struct UpdateLinkRequest {
    pub expires_at: Option<DateTime<Utc>>,
}
