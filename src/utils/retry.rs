//! Bounded retry with exponential backoff.
//!
//! Retry behavior is described by a [`RetryPolicy`] value and executed by
//! [`retry_with_backoff`], keeping attempt counts and delays out of
//! business logic. Callers pass a predicate deciding which errors are
//! worth another attempt; everything else aborts immediately.

use std::future::Future;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Backoff policy: how many tries, and how long to wait between them.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Must be at least 1.
    pub max_attempts: usize,
    /// Delay before the second attempt; doubles afterwards.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Randomize each delay to spread out competing retriers.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Policy for waiting on the backing store at process startup.
    pub fn startup() -> Self {
        Self {
            max_attempts: 20,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            jitter: false,
        }
    }

    /// Policy for the generated-code uniqueness loop.
    ///
    /// Collisions are resolved by drawing a fresh code, so only a token
    /// delay is needed; jitter keeps concurrent creators from retrying in
    /// lockstep.
    pub fn uniqueness() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(100),
            jitter: true,
        }
    }

    /// Delay sequence between attempts: one entry fewer than `max_attempts`.
    fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        let retries = self.max_attempts.saturating_sub(1);
        let base_ms = self.base_delay.as_millis() as u64;

        if base_ms == 0 {
            return Box::new(std::iter::repeat(Duration::ZERO).take(retries));
        }

        // from_millis sets the exponent base; factor scales 2^n back into
        // a doubling sequence that starts at base_delay.
        let backoff = ExponentialBackoff::from_millis(2)
            .factor((base_ms / 2).max(1))
            .max_delay(self.max_delay);

        if self.jitter {
            Box::new(backoff.map(jitter).take(retries))
        } else {
            Box::new(backoff.take(retries))
        }
    }
}

/// Runs `action` until it succeeds, the policy is spent, or an error fails
/// the `should_retry` predicate.
///
/// Each failed attempt is logged at `warn` with the operation `name`. The
/// last error is returned once attempts run out; mapping that into a
/// domain-specific failure is the caller's business.
pub async fn retry_with_backoff<T, E, A, Fut, C>(
    name: &str,
    policy: &RetryPolicy,
    condition: C,
    mut action: A,
) -> Result<T, E>
where
    A: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: FnMut(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts;
    let mut attempt = 0usize;

    RetryIf::spawn(
        policy.delays(),
        || {
            attempt += 1;
            let current = attempt;
            let fut = action();

            async move {
                match fut.await {
                    Ok(value) => Ok(value),
                    Err(e) => {
                        tracing::warn!(
                            operation = name,
                            attempt = current,
                            max_attempts,
                            error = %e,
                            "Attempt failed"
                        );
                        Err(e)
                    }
                }
            }
        },
        condition,
    )
    .await
}
