#![allow(dead_code)]

use chrono::{DateTime, Utc};
use linkcut::application::services::{AnalyticsService, LinkService};
use linkcut::domain::visit_event::VisitEvent;
use linkcut::infrastructure::cache::NullCache;
use linkcut::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use linkcut::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_BASE_URL: &str = "http://short.test";

pub async fn create_test_link(pool: &PgPool, slug: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (slug, original_url) VALUES ($1, $2) RETURNING id",
    )
    .bind(slug)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_expired_link(pool: &PgPool, slug: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (slug, original_url, expires_at)
         VALUES ($1, $2, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .bind(slug)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_expiring_link(
    pool: &PgPool,
    slug: &str,
    url: &str,
    expires_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (slug, original_url, expires_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(slug)
    .bind(url)
    .bind(expires_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_visit(pool: &PgPool, link_id: i64, country: Option<&str>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO visits (link_id, country) VALUES ($1, $2) RETURNING id",
    )
    .bind(link_id)
    .bind(country)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn visit_count(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT visit_count FROM links WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_exists(pool: &PgPool, slug: &str) -> bool {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<VisitEvent>) {
    create_test_state_with(pool, true)
}

pub fn create_test_state_with(
    pool: PgPool,
    redirect_expired: bool,
) -> (AppState, mpsc::Receiver<VisitEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));
    let visit_repo = Arc::new(PgVisitRepository::new(pool.clone()));

    let link_service = Arc::new(LinkService::new(
        link_repo.clone(),
        TEST_BASE_URL.to_string(),
        redirect_expired,
    ));
    let analytics_service = Arc::new(AnalyticsService::new(link_repo, visit_repo));

    let state = AppState {
        link_service,
        analytics_service,
        cache: Arc::new(NullCache),
        visit_tx: tx,
        db: pool,
    };

    (state, rx)
}
