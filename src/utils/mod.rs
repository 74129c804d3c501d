//! Utility functions shared across the application.
//!
//! - [`slug`] - Slug generation and validation
//! - [`url_normalizer`] - URL validation and normalization

pub mod slug;
pub mod url_normalizer;
