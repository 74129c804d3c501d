mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use linkcut::api::handlers::shorten_handler;
use serde_json::{Value, json};
use sqlx::PgPool;

fn test_app(state: linkcut::state::AppState) -> Router {
    Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_shorten_generates_slug(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com/some/page" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    let slug = body["slug"].as_str().unwrap();

    assert_eq!(slug.len(), 6);
    assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        body["short_url"].as_str().unwrap(),
        format!("{}/{}", common::TEST_BASE_URL, slug)
    );
    assert!(common::link_exists(&pool, slug).await);
}

#[sqlx::test]
async fn test_shorten_custom_slug(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "original_url": "https://example.com",
            "custom_slug": "promo-2026"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["slug"], "promo-2026");
    assert!(common::link_exists(&pool, "promo-2026").await);
}

#[sqlx::test]
async fn test_shorten_custom_slug_conflict(pool: PgPool) {
    common::create_test_link(&pool, "taken", "https://example.com/first").await;

    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "original_url": "https://example.com/second",
            "custom_slug": "taken"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "slug_conflict");

    // The existing mapping is untouched.
    let url: String =
        sqlx::query_scalar::<_, String>("SELECT original_url FROM links WHERE slug = 'taken'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(url, "https://example.com/first");
}

#[sqlx::test]
async fn test_shorten_invalid_slug_format(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "original_url": "https://example.com",
            "custom_slug": "bad slug!"
        }))
        .await;

    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_slug_format");
}

#[sqlx::test]
async fn test_shorten_invalid_url_writes_nothing(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");

    let total: i64 = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test]
async fn test_shorten_rejects_non_http_scheme(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "ftp://example.com/file" }))
        .await;

    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
}

#[sqlx::test]
async fn test_shorten_persists_expiry(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "original_url": "https://example.com",
            "custom_slug": "timed",
            "expires_at": "2030-01-01T00:00:00Z"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["expires_at"], "2030-01-01T00:00:00Z");

    let has_expiry: bool = sqlx::query_scalar::<_, bool>(
        "SELECT expires_at IS NOT NULL FROM links WHERE slug = 'timed'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(has_expiry);
}

#[sqlx::test]
async fn test_shorten_generated_slugs_are_distinct(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(test_app(state)).unwrap();

    let mut slugs = std::collections::HashSet::new();
    for _ in 0..10 {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "original_url": "https://example.com/page" }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        slugs.insert(body["slug"].as_str().unwrap().to_string());
    }

    assert_eq!(slugs.len(), 10);
}
