//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Compiled pattern for custom slug validation.
static CUSTOM_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-_]+$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional custom slug.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*CUSTOM_SLUG_REGEX"))]
    pub custom_slug: Option<String>,

    /// Optional expiry timestamp. A past value makes the link Expired.
    pub expires_at: Option<DateTime<Utc>>,

    /// Opaque reference to the creating user; absent for anonymous links.
    pub owner_id: Option<String>,
}

/// Response for a successfully created link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub slug: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            slug: link.slug,
            short_url,
            original_url: link.original_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
        }
    }
}
