//! Repository trait for link records.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for slug-to-URL records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link with `visit_count = 0`.
    ///
    /// The insert is conditional on slug uniqueness at the storage layer;
    /// a concurrent writer claiming the same slug loses with a conflict,
    /// never a duplicate row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugConflict`] if the slug already exists and
    /// [`AppError::StoreUnavailable`] on other database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its internal id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Atomically increments the visit counter and stamps `last_visited`.
    ///
    /// A single `visit_count = visit_count + 1` statement, so concurrent
    /// visitors never lose updates. Returns `false` when no row matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn increment_visit_count(&self, link_id: i64) -> Result<bool, AppError>;

    /// Atomically counts a visit against a slug, honoring the expiry guard.
    ///
    /// When `allow_expired` is `false`, links past their expiry are treated
    /// as absent and left uncounted. Returns the link id when a row was
    /// updated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn register_visit(&self, slug: &str, allow_expired: bool)
    -> Result<Option<i64>, AppError>;

    /// Lists links ordered by creation time, newest first.
    ///
    /// `page` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError>;

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Partially updates a link. Only fields present in [`LinkPatch`] change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `slug` and
    /// [`AppError::StoreUnavailable`] on database errors.
    async fn update(&self, slug: &str, patch: LinkPatch) -> Result<Link, AppError>;

    /// Deletes a link and, via cascade, its visit events.
    ///
    /// Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn delete(&self, slug: &str) -> Result<bool, AppError>;
}
