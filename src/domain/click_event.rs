//! Click event model for asynchronous click tracking.

use crate::domain::entities::NewClick;

/// An in-memory click event for async processing.
///
/// Passed from the redirect path to the background worker via a bounded
/// channel, decoupling the redirect response from analytics writes. The
/// timestamp is deliberately absent: the click repository assigns it at
/// append time.
///
/// # Usage Flow
///
/// 1. Created on the redirect path with request metadata
/// 2. Enqueued through [`crate::domain::click_worker::ClickRecorder`] (non-blocking)
/// 3. Drained by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    pub fn new(code: String, ip: Option<String>, user_agent: Option<&str>) -> Self {
        Self {
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            code: event.code,
            user_agent: event.user_agent,
            ip: event.ip,
        }
    }
}
