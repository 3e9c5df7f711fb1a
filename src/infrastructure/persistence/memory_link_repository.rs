//! In-memory link store.
//!
//! Keeps the same two-view layout a wide-column deployment uses: a point
//! view keyed by code for lookups, and a scan index keyed by
//! `(bucket, active)` for the sweeper. The point view is the source of
//! truth; the scan index is maintained with add-then-remove moves, so a
//! code may transiently appear under two scan keys but never under none.

use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{LinkPatch, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

type ScanKey = (String, bool);

#[derive(Default)]
pub struct MemoryLinkRepository {
    by_code: DashMap<String, ShortLink>,
    by_bucket: DashMap<ScanKey, BTreeSet<String>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_insert(&self, bucket: &str, active: bool, code: &str) {
        self.by_bucket
            .entry((bucket.to_string(), active))
            .or_default()
            .insert(code.to_string());
    }

    fn scan_remove(&self, bucket: &str, active: bool, code: &str) {
        let key = (bucket.to_string(), active);
        let mut emptied = false;
        if let Some(mut codes) = self.by_bucket.get_mut(&key) {
            codes.remove(code);
            emptied = codes.is_empty();
        }
        if emptied {
            self.by_bucket.remove_if(&key, |_, codes| codes.is_empty());
        }
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, link: ShortLink) -> Result<ShortLink, AppError> {
        match self.by_code.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code is already taken",
                json!({ "code": link.code }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                self.scan_insert(&link.bucket, link.active, &link.code);
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.by_code.get(code).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.by_code.contains_key(code))
    }

    async fn update(&self, code: &str, patch: LinkPatch) -> Result<ShortLink, AppError> {
        let mut entry = self
            .by_code
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let old_bucket = entry.bucket.clone();
        let old_active = entry.active;

        let mut updated = entry.value().clone();
        if let Some(target) = patch.target {
            updated.target = target;
        }
        if let Some(expires_at) = patch.expires_at {
            updated.set_expires_at(expires_at);
            updated.active = true;
        }

        // Scan-index move: the new entry must land before the old one
        // goes away, otherwise a concurrent scan could miss the link
        // entirely.
        let moved = updated.bucket != old_bucket || updated.active != old_active;
        if moved {
            self.scan_insert(&updated.bucket, updated.active, code);
        }
        *entry.value_mut() = updated.clone();
        if moved {
            self.scan_remove(&old_bucket, old_active, code);
        }

        Ok(updated)
    }

    async fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        let Some(mut entry) = self.by_code.get_mut(code) else {
            return Ok(false);
        };
        if !entry.active {
            return Ok(false);
        }

        let bucket = entry.bucket.clone();
        self.scan_insert(&bucket, false, code);
        entry.active = false;
        self.scan_remove(&bucket, true, code);
        Ok(true)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let Some((_, link)) = self.by_code.remove(code) else {
            return Ok(false);
        };
        self.scan_remove(&link.bucket, link.active, code);
        Ok(true)
    }

    async fn scan_bucket(&self, bucket: &str, active: bool) -> Result<Vec<ShortLink>, AppError> {
        // Snapshot the code set first so no index guard is held across
        // the point lookups below.
        let codes: Vec<String> = match self.by_bucket.get(&(bucket.to_string(), active)) {
            Some(codes) => codes.iter().cloned().collect(),
            None => return Ok(Vec::new()),
        };

        let mut links = Vec::with_capacity(codes.len());
        for code in codes {
            if let Some(entry) = self.by_code.get(&code) {
                let link = entry.value();
                // Index entries mid-move or mid-delete can linger; the
                // point view decides what actually belongs here.
                if link.bucket == bucket && link.active == active {
                    links.push(link.clone());
                }
            }
        }
        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
