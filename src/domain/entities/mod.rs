//! Core domain entities representing the business data model.
//!
//! Plain data structures for the two record families the core persists:
//!
//! - [`ShortLink`] - A short code mapped to a target URL, dual-indexed for
//!   point lookup and bucketed expiration scanning
//! - [`Click`] - A single redirect event in the append-only analytics log
//!
//! Creation inputs use separate structs (`NewClick`) and partial updates go
//! through [`LinkPatch`]; the entities themselves carry no business logic
//! beyond derived-state helpers.

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{BUCKET_DATE_FORMAT, LinkPatch, NEVER_EXPIRES_BUCKET, ShortLink, expiration_bucket};
