//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

/// Redis cache for fast redirect lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnection. All
/// operations are fail-open: errors are logged and reported as misses or
/// no-ops rather than propagated into the request path.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_url`] is called
    /// with `ttl_seconds = None`; it comes from `CACHE_TTL_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        redis::cmd("PING")
            .query_async::<()>(&mut test_conn)
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "slug:".to_string(),
        })
    }

    fn build_key(&self, slug: &str) -> String {
        format!("{}{}", self.key_prefix, slug)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, slug: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("cache hit: {} -> {}", slug, url);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("cache miss: {}", slug);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", slug, e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        slug: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(slug);
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        let mut conn = self.client.clone();

        if let Err(e) = conn.set_ex::<_, _, ()>(&key, original_url, ttl).await {
            error!("Redis SETEX error for {}: {}", slug, e);
        }

        Ok(())
    }

    async fn invalidate(&self, slug: &str) -> CacheResult<()> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        if let Err(e) = conn.del::<_, ()>(&key).await {
            error!("Redis DEL error for {}: {}", slug, e);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await.is_ok()
    }
}
