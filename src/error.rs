//! Application error type shared across services, repositories, and workers.

use serde_json::Value;

/// Typed failure kinds raised by the core.
///
/// Every variant carries a human-readable `message` and a structured
/// `details` payload for the adapter layer to serialize. The adapter maps
/// variants to its own response categories via [`AppError::kind`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: bad target URL, invalid alias, past expiry on update.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown code, or a non-live record on the redirect path.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The code or alias is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// A bounded retry budget ran out; fatal for the request.
    #[error("{message}")]
    Exhausted { message: String, details: Value },

    /// Transient backing-store failure; callers may retry.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::Exhausted {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the adapter layer.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Exhausted { .. } => "exhausted",
            AppError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    /// True for transient backend failures that a startup gate may retry.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable { .. })
    }
}
