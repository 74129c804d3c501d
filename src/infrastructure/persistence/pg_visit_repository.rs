//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for the append-only visit log.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let result = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (link_id, country, city, browser, os, device, referer, ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, link_id, visited_at, country, city, browser, os, device, referer, ip
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.country)
        .bind(&new_visit.city)
        .bind(&new_visit.browser)
        .bind(&new_visit.os)
        .bind(&new_visit.device)
        .bind(&new_visit.referer)
        .bind(&new_visit.ip)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(visit) => Ok(visit),
            Err(e) if is_link_fk_violation(&e) => Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": new_visit.link_id }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_by_link_id(&self, link_id: i64, limit: i64) -> Result<Vec<Visit>, AppError> {
        let visits = sqlx::query_as::<_, Visit>(
            r#"
            SELECT id, link_id, visited_at, country, city, browser, os, device, referer, ip
            FROM visits
            WHERE link_id = $1
            ORDER BY visited_at DESC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(visits)
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

/// Returns true if the error is a foreign-key violation on `visits.link_id`.
fn is_link_fk_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
