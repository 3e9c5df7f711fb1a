//! Link lifecycle service: create, inspect, update, delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{Click, LinkPatch, ShortLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_alias};
use crate::utils::retry::{RetryPolicy, retry_with_backoff};
use crate::utils::target_url::validate_target;

/// Owner-facing view of a link together with its click analytics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkDetails {
    pub link: ShortLink,
    pub click_count: u64,
    pub clicks: Vec<Click>,
}

/// Service owning the short link lifecycle.
///
/// Validates input, resolves the short code (caller-chosen alias or a
/// generated one), and leans on the store's conditional insert for the
/// uniqueness guarantee.
pub struct LinkService<L: LinkRepository, C: ClickRepository> {
    links: Arc<L>,
    clicks: Arc<C>,
}

impl<L: LinkRepository, C: ClickRepository> LinkService<L, C> {
    /// Creates a new link service.
    pub fn new(links: Arc<L>, clicks: Arc<C>) -> Self {
        Self { links, clicks }
    }

    /// Creates a short link.
    ///
    /// With `custom_alias` the alias is validated, checked for availability,
    /// and claimed through the conditional insert; racing callers lose with
    /// a conflict, and there is no silent fallback to a generated code.
    /// Without an alias, random codes are drawn until one inserts cleanly,
    /// within a small bounded budget.
    ///
    /// A past `expires_at` is accepted: the record is born expired and will
    /// simply never resolve.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed target or alias,
    /// [`AppError::Conflict`] when the alias is taken, and
    /// [`AppError::Exhausted`] when generated codes keep colliding.
    pub async fn create_link(
        &self,
        target: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, AppError> {
        let target = validate_target(&target).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
        })?;

        match custom_alias {
            Some(alias) => self.create_with_alias(alias, target, expires_at).await,
            None => self.create_with_generated_code(target, expires_at).await,
        }
    }

    async fn create_with_alias(
        &self,
        alias: String,
        target: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, AppError> {
        validate_alias(&alias)?;

        // Cheap early exit. The conditional insert below is what actually
        // guarantees uniqueness; this check only saves a doomed write.
        if self.links.exists(&alias).await? {
            return Err(AppError::conflict(
                "Alias is already taken",
                json!({ "alias": alias }),
            ));
        }

        self.links
            .insert(ShortLink::new(alias, target, expires_at))
            .await
    }

    async fn create_with_generated_code(
        &self,
        target: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, AppError> {
        let policy = RetryPolicy::uniqueness();

        let result = retry_with_backoff(
            "generate_unique_code",
            &policy,
            |e: &AppError| matches!(e, AppError::Conflict { .. }),
            || {
                let target = target.clone();
                async move {
                    let code = generate_code();
                    if self.links.exists(&code).await? {
                        return Err(AppError::conflict(
                            "Generated code collided",
                            json!({ "code": code }),
                        ));
                    }
                    self.links
                        .insert(ShortLink::new(code, target, expires_at))
                        .await
                }
            },
        )
        .await;

        result.map_err(|e| match e {
            // Budget ran out with every draw taken: fatal for this request.
            AppError::Conflict { .. } => AppError::exhausted(
                "Could not find a free short code",
                json!({ "attempts": policy.max_attempts }),
            ),
            other => other,
        })
    }

    /// Full owner view of a link: the record plus its click analytics.
    ///
    /// Inactive and expired links are returned as-is; their state is
    /// readable off the entity. The counter is best-effort and degrades to
    /// zero when its read fails, while an event-list failure propagates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code.
    pub async fn get_link_details(&self, code: &str) -> Result<LinkDetails, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let click_count = match self.clicks.count_by_code(code).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(
                    code = %code,
                    error = %e,
                    "Click counter unavailable, reporting zero"
                );
                0
            }
        };

        let clicks = self.clicks.list_by_code(code).await?;

        Ok(LinkDetails {
            link,
            click_count,
            clicks,
        })
    }

    /// Applies a partial update to a link.
    ///
    /// Checks run in a fixed order: existence, then expiry (must lie in the
    /// future when provided), then target format. Providing an expiry value,
    /// including clearing it, reactivates a deactivated link; a target-only
    /// patch never does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Validation`] for a past expiry or malformed target.
    pub async fn update_link(&self, code: &str, patch: LinkPatch) -> Result<ShortLink, AppError> {
        if self.links.find_by_code(code).await?.is_none() {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        if let Some(Some(expires_at)) = patch.expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::bad_request(
                    "Expiration date must be in the future",
                    json!({ "expires_at": expires_at }),
                ));
            }
        }

        let LinkPatch { target, expires_at } = patch;
        let target = match target {
            Some(raw) => Some(validate_target(&raw).map_err(|e| {
                AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
            })?),
            None => None,
        };

        self.links.update(code, LinkPatch { target, expires_at }).await
    }

    /// Permanently removes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if self.links.delete(code).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ))
        }
    }
}
