//! DTOs for the visit recording endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewVisit, Visit};

/// Request to record a visit event with coarse client attributes.
///
/// All attributes are optional opaque strings supplied by the caller.
#[derive(Debug, Deserialize)]
pub struct RecordVisitRequest {
    pub link_id: i64,
    pub country: Option<String>,
    pub city: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
}

impl RecordVisitRequest {
    pub fn into_new_visit(self) -> NewVisit {
        NewVisit {
            link_id: self.link_id,
            country: self.country,
            city: self.city,
            browser: self.browser,
            os: self.os,
            device: self.device,
            referer: None,
            ip: None,
        }
    }
}

/// A recorded visit event.
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub id: i64,
    pub link_id: i64,
    pub visited_at: DateTime<Utc>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub referer: Option<String>,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            link_id: visit.link_id,
            visited_at: visit.visited_at,
            country: visit.country,
            city: visit.city,
            browser: visit.browser,
            os: visit.os,
            device: visit.device,
            referer: visit.referer,
        }
    }
}
