//! Slug generation and validation.
//!
//! Generated slugs are short random identifiers; collisions are rare but
//! possible and are handled by the shortening service's bounded retry.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated slugs.
const SLUG_LENGTH: usize = 6;

/// Upper bound on custom slug length.
const MAX_CUSTOM_SLUG_LENGTH: usize = 64;

/// Allowed shape for user-supplied slugs.
static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-_]+$").unwrap());

/// Slugs that would shadow service routes.
const RESERVED_SLUGS: &[&str] = &["api", "health", "static"];

/// Generates a random 6-character alphanumeric slug.
pub fn generate_slug() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-supplied custom slug.
///
/// # Rules
///
/// - Matches `^[a-zA-Z0-9-_]+$` (letters, digits, hyphen, underscore)
/// - At most 64 characters
/// - Not a reserved routing slug
///
/// # Errors
///
/// Returns [`AppError::InvalidSlugFormat`] if any rule is violated.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > MAX_CUSTOM_SLUG_LENGTH {
        return Err(AppError::invalid_slug(
            "Custom slug must be 1-64 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !SLUG_PATTERN.is_match(slug) {
        return Err(AppError::invalid_slug(
            "Custom slug can only contain letters, digits, hyphens, and underscores",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::invalid_slug(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
