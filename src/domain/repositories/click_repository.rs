//! Repository trait for click counters and the click event log.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click analytics.
///
/// Two independent structures per code: a monotonic counter for cheap
/// totals, and an append-only event log read back newest-first. Writes are
/// called from the background click worker and are best-effort by contract;
/// the worker logs failures instead of propagating them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryClickRepository`] - in-process engine
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_clicks.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Increments the click counter for a code.
    ///
    /// Not required to be exactly-once; a lost increment under failure is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn increment_count(&self, code: &str) -> Result<(), AppError>;

    /// Appends one click event with a server-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Reads the counter for a code; `0` when the code has never been hit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn count_by_code(&self, code: &str) -> Result<u64, AppError>;

    /// Reads the event log for a code, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn list_by_code(&self, code: &str) -> Result<Vec<Click>, AppError>;
}
