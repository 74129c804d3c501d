//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, LinkService};
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub analytics_service: Arc<AnalyticsService<PgLinkRepository, PgVisitRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub visit_tx: mpsc::Sender<VisitEvent>,
    pub db: Arc<PgPool>,
}
