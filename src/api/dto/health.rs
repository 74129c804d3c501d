//! DTOs for the health check endpoint.

use serde::Serialize;

/// Overall service health with per-component checks.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub visit_queue: CheckStatus,
    pub cache: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: None,
        }
    }

    pub fn degraded(message: String) -> Self {
        Self {
            status: "degraded".to_string(),
            message: Some(message),
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            status: "failed".to_string(),
            message: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
