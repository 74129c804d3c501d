//! Visit event model for asynchronous visit tracking.

/// An in-memory visit event passed from the redirect handler to the
/// background worker via a bounded channel.
///
/// Carries the link id (already resolved by the handler) plus whatever
/// client metadata the request exposed. Persistence is best-effort; the
/// redirect response never waits on it.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl VisitEvent {
    pub fn new(
        link_id: i64,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_event_full() {
        let event = VisitEvent::new(
            42,
            Some("192.168.1.1".to_string()),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
        );

        assert_eq!(event.link_id, 42);
        assert_eq!(event.ip.as_deref(), Some("192.168.1.1"));
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(event.referer.as_deref(), Some("https://google.com"));
    }

    #[test]
    fn test_visit_event_minimal() {
        let event = VisitEvent::new(1, None, None, None);

        assert!(event.ip.is_none());
        assert!(event.user_agent.is_none());
        assert!(event.referer.is_none());
    }
}
