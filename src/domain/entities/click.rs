//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A click event recorded when a short link is accessed.
///
/// Append-only; per code the event log reads back in descending
/// `clicked_at` order. Client metadata is optional to handle missing
/// headers gracefully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Click {
    pub code: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        code: String,
        clicked_at: DateTime<Utc>,
        user_agent: Option<String>,
        ip: Option<String>,
    ) -> Self {
        Self {
            code,
            clicked_at,
            user_agent,
            ip,
        }
    }
}

/// Input data for recording a new click event.
///
/// The timestamp is assigned by the click repository at append time.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub code: String,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_creation_with_all_fields() {
        let now = Utc::now();
        let click = Click::new(
            "abc1234".to_string(),
            now,
            Some("Mozilla/5.0".to_string()),
            Some("192.168.1.1".to_string()),
        );

        assert_eq!(click.code, "abc1234");
        assert_eq!(click.clicked_at, now);
        assert_eq!(click.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(click.ip, Some("192.168.1.1".to_string()));
    }

    #[test]
    fn test_click_creation_minimal() {
        let click = Click::new("xyz0001".to_string(), Utc::now(), None, None);

        assert_eq!(click.code, "xyz0001");
        assert!(click.user_agent.is_none());
        assert!(click.ip.is_none());
    }

    #[test]
    fn test_new_click_has_no_timestamp() {
        let new_click = NewClick {
            code: "xyz0001".to_string(),
            user_agent: Some("Chrome/120".to_string()),
            ip: None,
        };

        assert_eq!(new_click.code, "xyz0001");
        assert!(new_click.user_agent.is_some());
        assert!(new_click.ip.is_none());
    }
}
