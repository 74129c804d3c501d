//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for link records.
///
/// Slug uniqueness is enforced by the `links_slug_key` constraint; the
/// insert never pre-reads, so two concurrent writers cannot both succeed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (slug, original_url, expires_at, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, slug, original_url, visit_count, created_at,
                      expires_at, owner_id, last_visited
            "#,
        )
        .bind(&new_link.slug)
        .bind(&new_link.original_url)
        .bind(new_link.expires_at)
        .bind(&new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, slug, original_url, visit_count, created_at,
                   expires_at, owner_id, last_visited
            FROM links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, slug, original_url, visit_count, created_at,
                   expires_at, owner_id, last_visited
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_visit_count(&self, link_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE links SET visit_count = visit_count + 1, last_visited = now() WHERE id = $1",
        )
        .bind(link_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn register_visit(
        &self,
        slug: &str,
        allow_expired: bool,
    ) -> Result<Option<i64>, AppError> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE links
            SET visit_count = visit_count + 1, last_visited = now()
            WHERE slug = $1
              AND ($2 OR expires_at IS NULL OR expires_at > now())
            RETURNING id
            "#,
        )
        .bind(slug)
        .bind(allow_expired)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Link>, AppError> {
        let offset = (page - 1) * page_size;

        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, slug, original_url, visit_count, created_at,
                   expires_at, owner_id, last_visited
            FROM links
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, slug: &str, patch: LinkPatch) -> Result<Link, AppError> {
        let link = match patch.expires_at {
            Some(expires_at) => {
                sqlx::query_as::<_, Link>(
                    r#"
                    UPDATE links SET expires_at = $2
                    WHERE slug = $1
                    RETURNING id, slug, original_url, visit_count, created_at,
                              expires_at, owner_id, last_visited
                    "#,
                )
                .bind(slug)
                .bind(expires_at)
                .fetch_optional(self.pool.as_ref())
                .await?
            }
            // Nothing to change; the read still reports missing slugs.
            None => self.find_by_slug(slug).await?,
        };

        link.ok_or_else(|| AppError::not_found("Short link not found", json!({ "slug": slug })))
    }

    async fn delete(&self, slug: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE slug = $1")
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
