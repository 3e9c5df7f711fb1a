//! Repository trait definitions for the domain layer.
//!
//! The traits abstract the backing store behind the Repository pattern;
//! concrete engines live in `crate::infrastructure::persistence`, and
//! `mockall` generates test mocks for the service unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Dual-indexed short link storage
//! - [`ClickRepository`] - Click counters and the append-only event log
//!
//! This module also hosts [`wait_until_ready`], the startup gate that
//! probes the store with bounded backoff before the embedder starts
//! serving traffic.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;

use crate::error::AppError;
use crate::utils::retry::{RetryPolicy, retry_with_backoff};

/// Blocks until the link store answers [`LinkRepository::ping`].
///
/// Probes with the given backoff policy, retrying only
/// [`AppError::StoreUnavailable`] outcomes. When the budget runs out the
/// last error is returned; the embedding binary is expected to treat that
/// as fatal rather than serve traffic against a dead store.
///
/// # Errors
///
/// Returns the final [`AppError::StoreUnavailable`] after exhausting the
/// policy, or any non-transient error immediately.
pub async fn wait_until_ready<R>(links: &R, policy: &RetryPolicy) -> Result<(), AppError>
where
    R: LinkRepository + ?Sized,
{
    let result = retry_with_backoff(
        "store_readiness",
        policy,
        AppError::is_store_unavailable,
        || links.ping(),
    )
    .await;

    match result {
        Ok(()) => {
            tracing::info!("Backing store is ready");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                attempts = policy.max_attempts,
                error = %e,
                "Backing store never became ready"
            );
            Err(e)
        }
    }
}
