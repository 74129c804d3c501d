//! Visit entity representing a single redirect occurrence.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A recorded visit to a shortened link.
///
/// All client attributes are optional; the redirect path only knows what the
/// request headers carried, and the analytics endpoint only what the caller
/// supplied.
#[derive(Debug, Clone, FromRow)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub visited_at: DateTime<Utc>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

/// Input data for recording a new visit event.
#[derive(Debug, Clone, Default)]
pub struct NewVisit {
    pub link_id: i64,
    pub country: Option<String>,
    pub city: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}
