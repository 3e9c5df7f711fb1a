//! In-memory click analytics store.
//!
//! Counters and event logs are separate structures on purpose: they are
//! written independently by the click worker, and one failing must never
//! take the other down with it.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(Default)]
pub struct MemoryClickRepository {
    counters: DashMap<String, u64>,
    events: DashMap<String, Vec<Click>>,
}

impl MemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn increment_count(&self, code: &str) -> Result<(), AppError> {
        *self.counters.entry(code.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let click = Click::new(
            new_click.code.clone(),
            Utc::now(),
            new_click.user_agent,
            new_click.ip,
        );
        self.events
            .entry(new_click.code)
            .or_default()
            .push(click.clone());
        Ok(click)
    }

    async fn count_by_code(&self, code: &str) -> Result<u64, AppError> {
        Ok(self.counters.get(code).map(|count| *count.value()).unwrap_or(0))
    }

    async fn list_by_code(&self, code: &str) -> Result<Vec<Click>, AppError> {
        let mut clicks = self
            .events
            .get(code)
            .map(|events| events.value().clone())
            .unwrap_or_default();
        clicks.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at));
        Ok(clicks)
    }
}
