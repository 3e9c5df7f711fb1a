#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkstore::application::services::{LinkService, RedirectService};
use linkstore::domain::click_worker::spawn_click_worker;
use linkstore::domain::entities::{Click, LinkPatch, NewClick, ShortLink};
use linkstore::domain::repositories::{ClickRepository, LinkRepository};
use linkstore::error::AppError;
use linkstore::infrastructure::persistence::{MemoryClickRepository, MemoryLinkRepository};
use serde_json::json;
use tokio::task::JoinHandle;

static TRACING: Once = Once::new();

/// Installs a test subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn link_repo() -> Arc<MemoryLinkRepository> {
    Arc::new(MemoryLinkRepository::new())
}

pub fn click_repo() -> Arc<MemoryClickRepository> {
    Arc::new(MemoryClickRepository::new())
}

pub fn link_service(
    links: Arc<MemoryLinkRepository>,
    clicks: Arc<MemoryClickRepository>,
) -> LinkService<MemoryLinkRepository, MemoryClickRepository> {
    LinkService::new(links, clicks)
}

/// Wires a redirect service to a freshly spawned click worker.
pub fn redirect_stack<C>(
    links: Arc<MemoryLinkRepository>,
    clicks: Arc<C>,
    queue_capacity: usize,
) -> (RedirectService<MemoryLinkRepository>, JoinHandle<()>)
where
    C: ClickRepository + 'static,
{
    let (recorder, worker) = spawn_click_worker(clicks, queue_capacity);
    (RedirectService::new(links, recorder), worker)
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::days(days)
}

pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::minutes(minutes)
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::hours(hours)
}

pub fn sample_link(code: &str, expires_at: Option<DateTime<Utc>>) -> ShortLink {
    ShortLink::new(
        code.to_string(),
        "https://example.com/page".to_string(),
        expires_at,
    )
}

pub fn clear_expiry_patch() -> LinkPatch {
    LinkPatch {
        expires_at: Some(None),
        ..LinkPatch::default()
    }
}

fn injected_failure() -> AppError {
    AppError::unavailable("injected failure", json!({}))
}

/// Click store with switchable failure injection per operation.
#[derive(Default)]
pub struct FlakyClickRepository {
    inner: MemoryClickRepository,
    pub fail_counter_reads: AtomicBool,
    pub fail_counter_writes: AtomicBool,
    pub fail_event_reads: AtomicBool,
    pub fail_event_writes: AtomicBool,
}

impl FlakyClickRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickRepository for FlakyClickRepository {
    async fn increment_count(&self, code: &str) -> Result<(), AppError> {
        if self.fail_counter_writes.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.inner.increment_count(code).await
    }

    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        if self.fail_event_writes.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.inner.record_click(new_click).await
    }

    async fn count_by_code(&self, code: &str) -> Result<u64, AppError> {
        if self.fail_counter_reads.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.inner.count_by_code(code).await
    }

    async fn list_by_code(&self, code: &str) -> Result<Vec<Click>, AppError> {
        if self.fail_event_reads.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.inner.list_by_code(code).await
    }
}

/// Click store whose writes stall; proves the redirect path never waits
/// on analytics storage.
pub struct SlowClickRepository {
    inner: MemoryClickRepository,
    write_delay: Duration,
}

impl SlowClickRepository {
    pub fn new(write_delay: Duration) -> Self {
        Self {
            inner: MemoryClickRepository::new(),
            write_delay,
        }
    }
}

#[async_trait]
impl ClickRepository for SlowClickRepository {
    async fn increment_count(&self, code: &str) -> Result<(), AppError> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.increment_count(code).await
    }

    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        tokio::time::sleep(self.write_delay).await;
        self.inner.record_click(new_click).await
    }

    async fn count_by_code(&self, code: &str) -> Result<u64, AppError> {
        self.inner.count_by_code(code).await
    }

    async fn list_by_code(&self, code: &str) -> Result<Vec<Click>, AppError> {
        self.inner.list_by_code(code).await
    }
}

/// Link store that reports unavailable for the first N readiness probes,
/// like a backend that is still starting up.
pub struct WarmupLinkRepository {
    inner: MemoryLinkRepository,
    remaining_failures: AtomicUsize,
}

impl WarmupLinkRepository {
    pub fn new(failures_before_ready: usize) -> Self {
        Self {
            inner: MemoryLinkRepository::new(),
            remaining_failures: AtomicUsize::new(failures_before_ready),
        }
    }

    pub fn is_warmed_up(&self) -> bool {
        self.remaining_failures.load(Ordering::SeqCst) == 0
    }
}

#[async_trait]
impl LinkRepository for WarmupLinkRepository {
    async fn insert(&self, link: ShortLink) -> Result<ShortLink, AppError> {
        self.inner.insert(link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        self.inner.find_by_code(code).await
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        self.inner.exists(code).await
    }

    async fn update(&self, code: &str, patch: LinkPatch) -> Result<ShortLink, AppError> {
        self.inner.update(code, patch).await
    }

    async fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        self.inner.deactivate(code).await
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        self.inner.delete(code).await
    }

    async fn scan_bucket(&self, bucket: &str, active: bool) -> Result<Vec<ShortLink>, AppError> {
        self.inner.scan_bucket(bucket, active).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        let still_warming = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if still_warming {
            return Err(AppError::unavailable("warming up", json!({})));
        }
        self.inner.ping().await
    }
}
