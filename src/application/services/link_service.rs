//! Link creation, redirect resolution, and link management.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::{generate_slug, validate_custom_slug};
use crate::utils::url_normalizer::normalize_url;
use chrono::{DateTime, Utc};
use serde_json::json;

/// Maximum attempts when a generated slug keeps colliding.
const MAX_SLUG_ATTEMPTS: usize = 5;

/// Service for creating, resolving, and managing shortened links.
///
/// Owns the slug-allocation contract: URL validation happens before any
/// store write, custom slugs are validated then claimed, and generated
/// slugs are retried a bounded number of times on collision. The storage
/// unique constraint is the uniqueness source of truth; the service only
/// interprets its verdicts.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    base_url: String,
    redirect_expired: bool,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix for short URLs. `redirect_expired`
    /// controls whether links past their expiry still redirect.
    pub fn new(link_repository: Arc<L>, base_url: String, redirect_expired: bool) -> Self {
        Self {
            link_repository,
            base_url,
            redirect_expired,
        }
    }

    /// Creates a short link.
    ///
    /// # Slug Allocation
    ///
    /// - A custom slug is validated, pre-checked for a friendly conflict
    ///   message, then claimed by insert; a constraint violation at insert
    ///   time (concurrent writer) reports the same conflict
    /// - Otherwise a random 6-character slug is generated and inserted,
    ///   regenerating on collision up to 5 attempts
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - malformed or non-http(s) URL
    /// - [`AppError::InvalidSlugFormat`] - custom slug fails validation
    /// - [`AppError::SlugConflict`] - custom slug already taken
    /// - [`AppError::SlugSpaceExhausted`] - too many generated collisions
    pub async fn create_short_link(
        &self,
        original_url: String,
        custom_slug: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        owner_id: Option<String>,
    ) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&original_url).map_err(|e| {
            AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(custom) = custom_slug {
            validate_custom_slug(&custom)?;

            if self.link_repository.find_by_slug(&custom).await?.is_some() {
                return Err(AppError::slug_conflict(
                    "Slug already in use",
                    json!({ "slug": custom }),
                ));
            }

            return self
                .link_repository
                .create(NewLink {
                    slug: custom,
                    original_url: normalized_url,
                    expires_at,
                    owner_id,
                })
                .await;
        }

        self.create_with_generated_slug(normalized_url, expires_at, owner_id)
            .await
    }

    /// Inserts with a fresh random slug, regenerating on collision.
    async fn create_with_generated_slug(
        &self,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
        owner_id: Option<String>,
    ) -> Result<Link, AppError> {
        for _ in 0..MAX_SLUG_ATTEMPTS {
            let new_link = NewLink {
                slug: generate_slug(),
                original_url: original_url.clone(),
                expires_at,
                owner_id: owner_id.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::SlugConflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::slug_space_exhausted(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }

    /// Resolves a slug for redirection, applying the expiry policy.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is unknown, or if the link
    /// is expired and expired redirects are disabled.
    pub async fn resolve_redirect(&self, slug: &str) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "slug": slug }))
            })?;

        if link.is_expired() && !self.redirect_expired {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "slug": slug, "reason": "expired" }),
            ));
        }

        Ok(link)
    }

    /// Atomically counts a visit against a slug.
    ///
    /// Returns the link id, or `None` when the slug is unknown or blocked
    /// by the expiry policy. The underlying statement is a single
    /// `visit_count + 1` update, so concurrent visits never lose counts.
    pub async fn count_visit(&self, slug: &str) -> Result<Option<i64>, AppError> {
        self.link_repository
            .register_visit(slug, self.redirect_expired)
            .await
    }

    /// Retrieves a link by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get_link(&self, slug: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "slug": slug })))
    }

    /// Lists links, newest first, with the total count for pagination.
    pub async fn list_links(&self, page: i64, page_size: i64) -> Result<(Vec<Link>, i64), AppError> {
        let links = self.link_repository.list(page, page_size).await?;
        let total = self.link_repository.count().await?;
        Ok((links, total))
    }

    /// Sets or clears a link's expiration date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn update_expiration(
        &self,
        slug: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        self.link_repository
            .update(
                slug,
                LinkPatch {
                    expires_at: Some(expires_at),
                },
            )
            .await
    }

    /// Deletes a link and its visit events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn delete_link(&self, slug: &str) -> Result<(), AppError> {
        if self.link_repository.delete(slug).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "slug": slug }),
            ))
        }
    }

    /// Constructs the full short URL for a slug.
    pub fn get_short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Duration;

    fn sample_link(id: i64, slug: &str, url: &str) -> Link {
        Link {
            id,
            slug: slug.to_string(),
            original_url: url.to_string(),
            visit_count: 0,
            created_at: Utc::now(),
            expires_at: None,
            owner_id: None,
            last_visited: None,
        }
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), "https://s.test.com".to_string(), true)
    }

    #[tokio::test]
    async fn test_create_short_link_generates_slug() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.slug.len() == 6 && new_link.original_url == "https://example.com/"
            })
            .times(1)
            .returning(|new_link| Ok(sample_link(1, &new_link.slug, &new_link.original_url)));

        let result = service(mock_repo)
            .create_short_link("https://example.com".to_string(), None, None, None)
            .await;

        let link = result.unwrap();
        assert_eq!(link.slug.len(), 6);
        assert_eq!(link.original_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url_hits_no_store() {
        let mock_repo = MockLinkRepository::new();
        // No expectations: a malformed URL must fail before any store call.

        let result = service(mock_repo)
            .create_short_link("not a url".to_string(), None, None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_slug_hits_no_store() {
        let mock_repo = MockLinkRepository::new();

        let result = service(mock_repo)
            .create_short_link(
                "https://example.com".to_string(),
                Some("ab cd".to_string()),
                None,
                None,
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidSlugFormat { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_short_link_with_custom_slug() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_slug()
            .withf(|slug| slug == "my-promo")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.slug == "my-promo")
            .times(1)
            .returning(|new_link| Ok(sample_link(1, &new_link.slug, &new_link.original_url)));

        let result = service(mock_repo)
            .create_short_link(
                "https://example.com".to_string(),
                Some("my-promo".to_string()),
                None,
                None,
            )
            .await;

        assert_eq!(result.unwrap().slug, "my-promo");
    }

    #[tokio::test]
    async fn test_create_short_link_custom_slug_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|slug| Ok(Some(sample_link(5, slug, "https://other.com/"))));

        mock_repo.expect_create().times(0);

        let result = service(mock_repo)
            .create_short_link(
                "https://example.com".to_string(),
                Some("taken".to_string()),
                None,
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::SlugConflict { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_insert_race_maps_to_conflict() {
        // The pre-check passes but a concurrent writer claims the slug
        // before our insert commits; the constraint verdict must surface
        // as the same conflict.
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::slug_conflict("Slug already in use", json!({}))));

        let result = service(mock_repo)
            .create_short_link(
                "https://example.com".to_string(),
                Some("raced".to_string()),
                None,
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::SlugConflict { .. }));
    }

    #[tokio::test]
    async fn test_generated_slug_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut attempts = 0;

        mock_repo.expect_create().times(3).returning(move |nl| {
            attempts += 1;
            if attempts < 3 {
                Err(AppError::slug_conflict("Slug already in use", json!({})))
            } else {
                Ok(sample_link(1, &nl.slug, &nl.original_url))
            }
        });

        let result = service(mock_repo)
            .create_short_link("https://example.com".to_string(), None, None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generated_slug_exhaustion_after_cap() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(|_| Err(AppError::slug_conflict("Slug already in use", json!({}))));

        let result = service(mock_repo)
            .create_short_link("https://example.com".to_string(), None, None, None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::SlugSpaceExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_generated_slug_propagates_store_errors() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::store_unavailable("down", json!({}))));

        let result = service(mock_repo)
            .create_short_link("https://example.com".to_string(), None, None, None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::StoreUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_redirect_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve_redirect("nosuch").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_redirect_expired_allowed_by_default() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_find_by_slug().times(1).returning(|slug| {
            let mut link = sample_link(1, slug, "https://example.com/");
            link.expires_at = Some(Utc::now() - Duration::hours(1));
            Ok(Some(link))
        });

        let result = service(mock_repo).resolve_redirect("old").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_redirect_expired_blocked_when_disabled() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_find_by_slug().times(1).returning(|slug| {
            let mut link = sample_link(1, slug, "https://example.com/");
            link.expires_at = Some(Utc::now() - Duration::hours(1));
            Ok(Some(link))
        });

        let svc = LinkService::new(Arc::new(mock_repo), "https://s.test.com".to_string(), false);
        let result = svc.resolve_redirect("old").await;

        let err = result.unwrap_err();
        let info = err.to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.details["reason"], "expired");
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(mock_repo).delete_link("nosuch").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_short_url_joins_base_and_slug() {
        let svc = LinkService::new(
            Arc::new(MockLinkRepository::new()),
            "https://s.test.com/".to_string(),
            true,
        );

        assert_eq!(svc.get_short_url("abc123"), "https://s.test.com/abc123");
    }
}
