//! Visit recording and per-link statistics.

use std::sync::Arc;

use crate::domain::entities::{Link, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;
use serde_json::json;

/// Per-link statistics: the link itself, the recorded visit total, and the
/// most recent visit events.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: Link,
    pub total_visits: i64,
    pub recent_visits: Vec<Visit>,
}

/// Service for visit analytics.
///
/// Appends visit events and keeps the link's counter in step: the explicit
/// analytics endpoint both records the event and increments the counter,
/// mirroring what the redirect path does across handler and worker.
pub struct AnalyticsService<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository, V: VisitRepository> AnalyticsService<L, V> {
    /// Creates a new analytics service.
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Records a visit event for a link and increments its counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist and
    /// [`AppError::StoreUnavailable`] on database errors.
    pub async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let link_id = new_visit.link_id;
        let visit = self.visit_repository.record_visit(new_visit).await?;

        // The event is already persisted; a lost increment here would
        // desynchronize the counter, so surface the failure.
        if !self.link_repository.increment_visit_count(link_id).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        Ok(visit)
    }

    /// Retrieves statistics for a slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get_link_stats(&self, slug: &str, visit_limit: i64) -> Result<LinkStats, AppError> {
        let link = self
            .link_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "slug": slug })))?;

        let total_visits = self.visit_repository.count_by_link_id(link.id).await?;
        let recent_visits = self
            .visit_repository
            .list_by_link_id(link.id, visit_limit)
            .await?;

        Ok(LinkStats {
            link,
            total_visits,
            recent_visits,
        })
    }
}
