//! Short link entity and its derived expiration bucket.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Scan-index bucket for links without an expiry date.
///
/// The sweeper never scans this bucket.
pub const NEVER_EXPIRES_BUCKET: &str = "never_expires";

/// Calendar-day format shared by bucket derivation and the sweeper's
/// candidate-bucket computation.
pub const BUCKET_DATE_FORMAT: &str = "%Y-%m-%d";

/// Derives the scan-index bucket for an expiry date.
///
/// Links expiring on the same UTC calendar day share a bucket, which is
/// what lets the sweeper scan a handful of day partitions instead of the
/// whole table. Pure function of `expires_at`: every place that stores a
/// bucket goes through here.
pub fn expiration_bucket(expires_at: Option<DateTime<Utc>>) -> String {
    match expires_at {
        Some(t) => t.format(BUCKET_DATE_FORMAT).to_string(),
        None => NEVER_EXPIRES_BUCKET.to_string(),
    }
}

/// A short link record.
///
/// The same logical record is visible through two store indexes: a point
/// index keyed by `code` and a scan index keyed by `(bucket, active)`.
/// `bucket` is derived from `expires_at` and must be recomputed whenever
/// the expiry changes; [`ShortLink::set_expires_at`] keeps the two in sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub bucket: String,
}

impl ShortLink {
    /// Creates a new, active link with the bucket derived from `expires_at`.
    pub fn new(code: String, target: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            code,
            target,
            created_at: Utc::now(),
            expires_at,
            active: true,
            bucket: expiration_bucket(expires_at),
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if the link may still serve redirects.
    ///
    /// Independent of sweep timing: an expired link is non-live even
    /// before the sweeper gets around to deactivating it.
    pub fn is_live(&self) -> bool {
        self.active && !self.is_expired()
    }

    /// Sets a new expiry and recomputes the derived bucket.
    pub fn set_expires_at(&mut self, expires_at: Option<DateTime<Utc>>) {
        self.expires_at = expires_at;
        self.bucket = expiration_bucket(expires_at);
    }
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
/// `expires_at: Some(None)` clears the expiry; `Some(Some(t))` sets it.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub target: Option<String>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}
