//! Background worker persisting visit events.
//!
//! Visits are best-effort: the redirect handler pushes a [`VisitEvent`]
//! into a bounded channel and responds immediately. This worker drains the
//! channel, retries transient store failures with exponential backoff, and
//! drops events that still fail, leaving a log line and a metrics counter.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};
use woothee::parser::Parser;

use crate::domain::entities::NewVisit;
use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Maximum persistence attempts per event.
const MAX_ATTEMPTS: usize = 3;

/// Runs the visit worker until the channel closes.
pub async fn run_visit_worker<R>(mut rx: mpsc::Receiver<VisitEvent>, repository: Arc<R>)
where
    R: VisitRepository + ?Sized + 'static,
{
    while let Some(event) = rx.recv().await {
        persist_with_retry(repository.as_ref(), event).await;
    }

    debug!("visit channel closed, worker exiting");
}

async fn persist_with_retry<R>(repository: &R, event: VisitEvent)
where
    R: VisitRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(50)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let link_id = event.link_id;
    let (browser, os, device) = match event.user_agent.as_deref() {
        Some(ua) => parse_user_agent(ua),
        None => (None, None, None),
    };

    let result = RetryIf::spawn(
        strategy,
        || {
            let new_visit = NewVisit {
                link_id: event.link_id,
                browser: browser.clone(),
                os: os.clone(),
                device: device.clone(),
                referer: event.referer.clone(),
                ip: event.ip.clone(),
                ..Default::default()
            };
            async { repository.record_visit(new_visit).await }
        },
        // The link may have been deleted between redirect and persist;
        // retrying a NotFound cannot succeed.
        |e: &AppError| matches!(e, AppError::StoreUnavailable { .. }),
    )
    .await;

    match result {
        Ok(_) => {
            counter!("visits_recorded_total").increment(1);
        }
        Err(e) => {
            counter!("visits_dropped_total").increment(1);
            warn!("dropping visit event for link {link_id}: {e}");
        }
    }
}

/// Extracts coarse browser, OS, and device category from a user agent.
fn parse_user_agent(ua: &str) -> (Option<String>, Option<String>, Option<String>) {
    let Some(result) = Parser::new().parse(ua) else {
        return (None, None, None);
    };

    let browser = (result.name != "UNKNOWN").then(|| result.name.to_string());
    let os = (result.os != "UNKNOWN").then(|| result.os.to_string());
    let device = Some(result.category.to_string());

    (browser, os, device)
}
