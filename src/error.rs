//! Application error taxonomy and HTTP mapping.
//!
//! Every failure surfaced to a caller is one of the variants below, rendered
//! as `{"error": {"code", "message", "details"}}` with a machine-readable
//! code. Database errors that are not slug-uniqueness violations collapse
//! into [`AppError::StoreUnavailable`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload embedded in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    /// The submitted URL is not a well-formed absolute http(s) URL.
    InvalidUrl { message: String, details: Value },
    /// A custom slug failed format validation.
    InvalidSlugFormat { message: String, details: Value },
    /// The requested slug is already taken.
    SlugConflict { message: String, details: Value },
    /// Random slug generation kept colliding past the retry cap.
    SlugSpaceExhausted { message: String, details: Value },
    /// No record matches the requested slug or id.
    NotFound { message: String, details: Value },
    /// The backing store rejected or failed the operation.
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_slug(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidSlugFormat {
            message: message.into(),
            details,
        }
    }
    pub fn slug_conflict(message: impl Into<String>, details: Value) -> Self {
        Self::SlugConflict {
            message: message.into(),
            details,
        }
    }
    pub fn slug_space_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::SlugSpaceExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// The stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidSlugFormat { .. } => "invalid_slug_format",
            Self::SlugConflict { .. } => "slug_conflict",
            Self::SlugSpaceExhausted { .. } => "slug_space_exhausted",
            Self::NotFound { .. } => "not_found",
            Self::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidSlugFormat { .. } => StatusCode::BAD_REQUEST,
            Self::SlugConflict { .. } => StatusCode::CONFLICT,
            Self::SlugSpaceExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Flattens the error into an [`ErrorInfo`] payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::InvalidUrl { message, details }
            | Self::InvalidSlugFormat { message, details }
            | Self::SlugConflict { message, details }
            | Self::SlugSpaceExhausted { message, details }
            | Self::NotFound { message, details }
            | Self::StoreUnavailable { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps a database error onto the application taxonomy.
///
/// A unique violation on the slug constraint means a concurrent writer won
/// the insert race and is reported as [`AppError::SlugConflict`]; everything
/// else is a store failure.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if is_slug_unique_violation(&e) {
        return AppError::slug_conflict("Slug already in use", json!({}));
    }

    tracing::error!("database error: {e}");
    AppError::store_unavailable("Store unavailable", json!({}))
}

/// Returns true if the error is a unique violation on `links.slug`.
pub fn is_slug_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_slug_key"))
}
