//! Background deactivation of expired links.
//!
//! The sweeper is a best-effort janitor: redirect resolution already treats
//! expired links as dead, so nothing here is load-bearing for correctness.
//! Each cycle scans the active partition of today's bucket plus a small
//! lookback window, deactivates what has lapsed, and reports what it did.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::domain::entities::BUCKET_DATE_FORMAT;
use crate::domain::repositories::LinkRepository;

/// Tuning knobs for [`ExpirationSweeper`].
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Pause between sweep cycles.
    pub interval: Duration,
    /// How many calendar days before today to rescan. Covers links that
    /// expired while the process was down or a previous cycle failed.
    pub lookback_days: u32,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            lookback_days: 2,
        }
    }
}

/// Outcome of a single sweep cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Buckets scanned this cycle.
    pub buckets_scanned: usize,
    /// Active links whose expiry date had passed.
    pub matched: usize,
    /// Links actually moved to the inactive partition.
    pub deactivated: usize,
    /// Scan or deactivation errors absorbed during the cycle.
    pub failures: usize,
}

/// Buckets a sweep cycle should visit: today plus `lookback_days` prior
/// days, newest first. The never-expiring bucket is not among them, so
/// links without an expiry date are never even scanned.
pub fn candidate_buckets(now: DateTime<Utc>, lookback_days: u32) -> Vec<String> {
    let today = now.date_naive();
    (0..=u64::from(lookback_days))
        .map(|back| (today - Days::new(back)).format(BUCKET_DATE_FORMAT).to_string())
        .collect()
}

/// Periodic task that deactivates expired links.
pub struct ExpirationSweeper<R: LinkRepository + ?Sized> {
    links: Arc<R>,
    config: SweeperConfig,
}

impl<R: LinkRepository + ?Sized> ExpirationSweeper<R> {
    pub fn new(links: Arc<R>, config: SweeperConfig) -> Self {
        Self { links, config }
    }

    /// Runs sweep cycles until the shutdown flag flips.
    ///
    /// The shutdown signal is observed between cycles, not mid-scan: a
    /// cycle that has started runs to completion before the loop exits.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            lookback_days = self.config.lookback_days,
            "Expiration sweeper started"
        );

        loop {
            let report = self.sweep_once().await;
            tracing::info!(
                buckets_scanned = report.buckets_scanned,
                matched = report.matched,
                deactivated = report.deactivated,
                failures = report.failures,
                "Sweep cycle finished"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Expiration sweeper stopped");
    }

    /// One full pass over the candidate buckets.
    ///
    /// Errors never escape a cycle. A bucket that fails to scan or a link
    /// that fails to deactivate is counted in [`SweepReport::failures`]
    /// and picked up again next cycle, since lapsed links stay in the
    /// active partition until a deactivation succeeds.
    pub async fn sweep_once(&self) -> SweepReport {
        let now = Utc::now();
        let mut report = SweepReport::default();

        for bucket in candidate_buckets(now, self.config.lookback_days) {
            report.buckets_scanned += 1;

            let links = match self.links.scan_bucket(&bucket, true).await {
                Ok(links) => links,
                Err(e) => {
                    tracing::warn!(bucket = %bucket, error = %e, "Bucket scan failed");
                    report.failures += 1;
                    continue;
                }
            };

            for link in links {
                if !link.expires_at.is_some_and(|at| at <= now) {
                    continue;
                }
                report.matched += 1;

                match self.links.deactivate(&link.code).await {
                    Ok(true) => {
                        report.deactivated += 1;
                        tracing::debug!(
                            code = %link.code,
                            bucket = %bucket,
                            "Deactivated expired link"
                        );
                    }
                    // A concurrent update or another sweeper got there first.
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(code = %link.code, error = %e, "Deactivation failed");
                        report.failures += 1;
                    }
                }
            }
        }

        report
    }
}
