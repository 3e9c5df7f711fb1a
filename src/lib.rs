//! # Linkstore
//!
//! Persistence and lifecycle core for a URL shortening service: short
//! link storage, expiration handling, and asynchronous click analytics.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, repository traits, and the
//!   background machinery (click worker, expiration sweeper)
//! - **Application Layer** ([`application`]) - Link lifecycle and redirect services
//! - **Infrastructure Layer** ([`infrastructure`]) - Storage engines behind the
//!   repository traits
//!
//! An HTTP adapter is deliberately not part of this crate; the services are
//! the embedding surface.
//!
//! ## Features
//!
//! - Dual-keyed link storage: point lookups by code, day-bucket scans for expiry
//! - Conditional-insert uniqueness with bounded collision retry
//! - Custom aliases held to the same shape as generated codes
//! - Fire-and-forget click tracking through a bounded queue
//! - Background sweeper deactivating expired links, with shutdown signal
//! - Startup readiness gate with exponential backoff
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use linkstore::config;
//! use linkstore::application::services::{LinkService, RedirectService};
//! use linkstore::domain::click_worker::spawn_click_worker;
//! use linkstore::domain::expiration_sweeper::ExpirationSweeper;
//! use linkstore::domain::repositories::wait_until_ready;
//! use linkstore::infrastructure::persistence::{MemoryClickRepository, MemoryLinkRepository};
//!
//! let cfg = config::load_from_env()?;
//! let links = Arc::new(MemoryLinkRepository::new());
//! let clicks = Arc::new(MemoryClickRepository::new());
//!
//! wait_until_ready(links.as_ref(), &cfg.startup_retry()).await?;
//!
//! let (recorder, click_worker) = spawn_click_worker(clicks.clone(), cfg.click_queue_capacity);
//! let link_service = LinkService::new(links.clone(), clicks.clone());
//! let redirect_service = RedirectService::new(links.clone(), recorder);
//!
//! let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let sweeper = ExpirationSweeper::new(links.clone(), cfg.sweeper());
//! let sweeper_task = tokio::spawn(sweeper.run(shutdown_rx));
//! ```
//!
//! ## Configuration
//!
//! Runtime settings are loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkDetails, LinkService, RedirectService};
    pub use crate::config::Config;
    pub use crate::domain::click_worker::{ClickRecorder, spawn_click_worker};
    pub use crate::domain::entities::{Click, LinkPatch, NewClick, ShortLink};
    pub use crate::domain::expiration_sweeper::{ExpirationSweeper, SweepReport, SweeperConfig};
    pub use crate::domain::repositories::{ClickRepository, LinkRepository, wait_until_ready};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{MemoryClickRepository, MemoryLinkRepository};
}
