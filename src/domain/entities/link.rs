//! Link entity representing a slug-to-URL mapping.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A shortened URL record.
///
/// `visit_count` is increment-only and mutated exclusively through atomic
/// updates in the repository. `expires_at` in the past makes the link
/// Expired, a derived display state that does not block redirects by itself.
#[derive(Debug, Clone, FromRow)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub original_url: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub owner_id: Option<String>,
    pub last_visited: Option<DateTime<Utc>>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new link.
///
/// `visit_count` always starts at 0 and `created_at` is set by the store.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub owner_id: Option<String>,
}

/// Partial update for an existing link.
///
/// `expires_at: Some(None)` clears the expiry; `Some(Some(t))` sets it;
/// `None` leaves it unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub expires_at: Option<Option<DateTime<Utc>>>,
}
