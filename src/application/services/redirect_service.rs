//! Redirect resolution.

use std::sync::Arc;

use serde_json::json;

use crate::domain::click_event::ClickEvent;
use crate::domain::click_worker::ClickRecorder;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service resolving short codes into redirect targets.
///
/// Resolution is a point lookup plus a liveness check. Click tracking is
/// handed to the background worker through a non-blocking enqueue, so
/// redirect latency never depends on analytics storage.
pub struct RedirectService<L: LinkRepository> {
    links: Arc<L>,
    recorder: ClickRecorder,
}

impl<L: LinkRepository> RedirectService<L> {
    /// Creates a new redirect service.
    pub fn new(links: Arc<L>, recorder: ClickRecorder) -> Self {
        Self { links, recorder }
    }

    /// Resolves a code to its target URL and enqueues a click event.
    ///
    /// Unknown, deactivated, and expired codes are indistinguishable to
    /// the caller; all of them come back as not found. A click is recorded
    /// only for a successful resolution, and the enqueue cannot fail the
    /// redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code does not resolve.
    pub async fn resolve(
        &self,
        code: &str,
        ip: Option<String>,
        user_agent: Option<&str>,
    ) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .filter(|link| link.is_live())
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        self.recorder
            .record(ClickEvent::new(code.to_string(), ip, user_agent));

        Ok(link.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::click_worker::spawn_click_worker;
    use crate::domain::entities::{Click, ShortLink};
    use crate::domain::repositories::{MockClickRepository, MockLinkRepository};
    use chrono::Utc;

    fn live_link(code: &str) -> ShortLink {
        ShortLink::new(
            code.to_string(),
            "https://example.com/page".to_string(),
            Some(Utc::now() + chrono::Duration::days(7)),
        )
    }

    fn silent_clicks() -> MockClickRepository {
        let mut mock = MockClickRepository::new();
        mock.expect_increment_count().times(0);
        mock.expect_record_click().times(0);
        mock
    }

    #[tokio::test]
    async fn test_resolve_returns_target_and_records_click() {
        let link = live_link("abc1234");
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let mut mock_clicks = MockClickRepository::new();
        mock_clicks
            .expect_increment_count()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(|_| Ok(()));
        mock_clicks
            .expect_record_click()
            .withf(|new_click| {
                new_click.code == "abc1234"
                    && new_click.ip.as_deref() == Some("10.0.0.1")
                    && new_click.user_agent.as_deref() == Some("Mozilla/5.0")
            })
            .times(1)
            .returning(|new_click| {
                Ok(Click::new(
                    new_click.code,
                    Utc::now(),
                    new_click.user_agent,
                    new_click.ip,
                ))
            });

        let (recorder, worker) = spawn_click_worker(Arc::new(mock_clicks), 16);
        let service = RedirectService::new(Arc::new(mock_links), recorder);

        let target = service
            .resolve("abc1234", Some("10.0.0.1".to_string()), Some("Mozilla/5.0"))
            .await
            .unwrap();
        assert_eq!(target, "https://example.com/page");

        // Closing the queue flushes the worker; unmet click expectations
        // would surface as a panic here.
        drop(service);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_find_by_code().returning(|_| Ok(None));

        let (recorder, worker) = spawn_click_worker(Arc::new(silent_clicks()), 16);
        let service = RedirectService::new(Arc::new(mock_links), recorder);

        let err = service.resolve("missing", None, None).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");

        drop(service);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_deactivated_code_is_not_found() {
        let mut link = live_link("abc1234");
        link.active = false;

        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .returning(move |_| Ok(Some(link.clone())));

        let (recorder, worker) = spawn_click_worker(Arc::new(silent_clicks()), 16);
        let service = RedirectService::new(Arc::new(mock_links), recorder);

        let err = service.resolve("abc1234", None, None).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");

        drop(service);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_expired_code_is_not_found() {
        let link = ShortLink::new(
            "abc1234".to_string(),
            "https://example.com/page".to_string(),
            Some(Utc::now() - chrono::Duration::minutes(1)),
        );

        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .returning(move |_| Ok(Some(link.clone())));

        let (recorder, worker) = spawn_click_worker(Arc::new(silent_clicks()), 16);
        let service = RedirectService::new(Arc::new(mock_links), recorder);

        let err = service.resolve("abc1234", None, None).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");

        drop(service);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_failure() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .returning(|_| Err(AppError::unavailable("point lookup failed", json!({}))));

        let (recorder, worker) = spawn_click_worker(Arc::new(silent_clicks()), 16);
        let service = RedirectService::new(Arc::new(mock_links), recorder);

        let err = service.resolve("abc1234", None, None).await.unwrap_err();
        assert_eq!(err.kind(), "store_unavailable");

        drop(service);
        worker.await.unwrap();
    }
}
