//! Runtime configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any
//! background task is spawned. Every variable has a default, so an empty
//! environment yields a working configuration.
//!
//! ## Variables
//!
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000, min: 100)
//! - `SWEEP_INTERVAL_SECONDS` - Pause between sweep cycles (default: 3600)
//! - `SWEEP_LOOKBACK_DAYS` - Prior day-buckets rescanned per cycle (default: 2, max: 30)
//! - `STARTUP_MAX_ATTEMPTS` - Readiness probes before giving up (default: 20)
//! - `STARTUP_BASE_DELAY_MS` - Delay before the second probe (default: 500)
//! - `STARTUP_MAX_DELAY_MS` - Cap on the probe backoff (default: 5000)
//!
//! Malformed values fall back to their defaults; range violations are
//! rejected by [`Config::validate`].

use std::env;
use std::time::Duration;

use anyhow::Result;

use crate::domain::expiration_sweeper::SweeperConfig;
use crate::utils::retry::RetryPolicy;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bounded click queue size. Events beyond it are dropped.
    pub click_queue_capacity: usize,
    /// Seconds between expiration sweep cycles.
    pub sweep_interval_secs: u64,
    /// How many day-buckets before today each sweep revisits.
    pub sweep_lookback_days: u32,
    /// Total readiness probes the startup gate makes.
    pub startup_max_attempts: usize,
    /// Delay before the second readiness probe; doubles afterwards.
    pub startup_base_delay_ms: u64,
    /// Upper bound on any single readiness probe delay.
    pub startup_max_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            click_queue_capacity: 10_000,
            sweep_interval_secs: 3600,
            sweep_lookback_days: 2,
            startup_max_attempts: 20,
            startup_base_delay_ms: 500,
            startup_max_delay_ms: 5000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults; this never
    /// fails. Range checks happen in [`Config::validate`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            click_queue_capacity: env_parsed("CLICK_QUEUE_CAPACITY", defaults.click_queue_capacity),
            sweep_interval_secs: env_parsed("SWEEP_INTERVAL_SECONDS", defaults.sweep_interval_secs),
            sweep_lookback_days: env_parsed("SWEEP_LOOKBACK_DAYS", defaults.sweep_lookback_days),
            startup_max_attempts: env_parsed("STARTUP_MAX_ATTEMPTS", defaults.startup_max_attempts),
            startup_base_delay_ms: env_parsed(
                "STARTUP_BASE_DELAY_MS",
                defaults.startup_base_delay_ms,
            ),
            startup_max_delay_ms: env_parsed("STARTUP_MAX_DELAY_MS", defaults.startup_max_delay_ms),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `click_queue_capacity` is outside `100..=1000000`
    /// - `sweep_interval_secs` is zero
    /// - `sweep_lookback_days` exceeds 30
    /// - `startup_max_attempts` is zero
    /// - `startup_max_delay_ms` is below `startup_base_delay_ms`
    pub fn validate(&self) -> Result<()> {
        if self.click_queue_capacity < 100 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be at least 100, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.click_queue_capacity
            );
        }

        if self.sweep_interval_secs == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECONDS must be greater than 0");
        }

        if self.sweep_lookback_days > 30 {
            anyhow::bail!(
                "SWEEP_LOOKBACK_DAYS must be at most 30, got {}",
                self.sweep_lookback_days
            );
        }

        if self.startup_max_attempts == 0 {
            anyhow::bail!("STARTUP_MAX_ATTEMPTS must be at least 1");
        }

        if self.startup_max_delay_ms < self.startup_base_delay_ms {
            anyhow::bail!(
                "STARTUP_MAX_DELAY_MS must be at least STARTUP_BASE_DELAY_MS, got {} < {}",
                self.startup_max_delay_ms,
                self.startup_base_delay_ms
            );
        }

        Ok(())
    }

    /// Sweeper settings derived from this configuration.
    pub fn sweeper(&self) -> SweeperConfig {
        SweeperConfig {
            interval: Duration::from_secs(self.sweep_interval_secs),
            lookback_days: self.sweep_lookback_days,
        }
    }

    /// Backoff policy for the startup readiness gate.
    pub fn startup_retry(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.startup_max_attempts,
            base_delay: Duration::from_millis(self.startup_base_delay_ms),
            max_delay: Duration::from_millis(self.startup_max_delay_ms),
            jitter: false,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
