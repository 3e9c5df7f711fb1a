//! Repository trait for short link data access.

use crate::domain::entities::{LinkPatch, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface owning the short link lifecycle.
///
/// Implementations maintain two views of every record: a point-lookup view
/// keyed by `code` and a scan view keyed by `(bucket, active)`. Every
/// mutation keeps the two consistent; when a mutation changes the scan key,
/// the new scan entry is written before the old one is removed so a
/// concurrent bucket scan can see the record twice but never zero times.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process engine
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a brand-new link as a conditional write (insert-if-absent).
    ///
    /// This is the primitive the uniqueness guarantee rests on: concurrent
    /// inserts of the same code must resolve to exactly one winner, with
    /// no check-then-insert window. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn insert(&self, link: ShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// Point lookup through the code-keyed view; cost is independent of
    /// `bucket`/`active` and of table size.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns whether a code is already taken.
    ///
    /// Used by the uniqueness-retry loop as a cheap early exit before
    /// falling back to [`insert`](Self::insert)'s conditional-write
    /// guarantee; never the sole uniqueness mechanism.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Partially updates a link.
    ///
    /// Only fields present in [`LinkPatch`] are modified. A patch that
    /// changes the expiry recomputes the derived bucket and moves the scan
    /// entry (insert-new-then-delete-old). Providing an expiry also
    /// reactivates a deactivated record; callers validate that a provided
    /// expiry instant lies in the future.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `code`.
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn update(&self, code: &str, patch: LinkPatch) -> Result<ShortLink, AppError>;

    /// Deactivates a link by moving its scan entry from `active=true` to
    /// `active=false`.
    ///
    /// Returns `Ok(true)` if a live record was deactivated, `Ok(false)` if
    /// the code is unknown or the record was already inactive. Repeating
    /// the call is a no-op, which is what lets sweep cycles overlap safely.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn deactivate(&self, code: &str) -> Result<bool, AppError>;

    /// Removes a link from both the point view and the scan view.
    ///
    /// Returns `Ok(true)` if the link existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Scans one `(bucket, active)` partition of the scan view.
    ///
    /// Never a full-table scan: the caller names a single day bucket (or
    /// the never-expires sentinel) and an activity state, and gets the
    /// matching records back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend failure.
    async fn scan_bucket(&self, bucket: &str, active: bool) -> Result<Vec<ShortLink>, AppError>;

    /// Cheap readiness probe used by the startup gate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] while the backend cannot
    /// serve requests.
    async fn ping(&self) -> Result<(), AppError>;
}
