//! Repository trait for visit events.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only visit log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends a visit event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced link does not exist
    /// and [`AppError::StoreUnavailable`] on other database errors.
    async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Lists the most recent visits for a link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_by_link_id(&self, link_id: i64, limit: i64) -> Result<Vec<Visit>, AppError>;

    /// Counts recorded visits for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError>;
}
