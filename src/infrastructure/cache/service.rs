//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching slug-to-URL mappings on the redirect path.
///
/// Implementations must be thread-safe and fail open: a broken cache
/// degrades to database lookups, never to request failures.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op when caching is disabled
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a slug.
    ///
    /// Returns `Ok(Some(url))` on a hit and `Ok(None)` on a miss.
    async fn get_url(&self, slug: &str) -> CacheResult<Option<String>>;

    /// Stores a slug-to-URL mapping with an optional TTL in seconds.
    ///
    /// Implementations log failures and return `Ok(())` where possible to
    /// avoid disrupting the request flow.
    async fn set_url(&self, slug: &str, original_url: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Removes a cached mapping. Used when a link is deleted or updated.
    async fn invalidate(&self, slug: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
