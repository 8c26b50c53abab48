//! Errors raised while building views from server payloads.

/// Result type alias
pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A payload field is missing, has the wrong type, or breaks a range invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A `days` key is not a `YYYY-MM-DD` calendar date.
    #[error("Malformed day key {key:?}{}: {reason}", located(.location))]
    MalformedDayKey {
        key: String,
        reason: String,
        /// Payload path of the enclosing `days` object, e.g. `cameras[1].days`.
        location: String,
    },

    /// The input text was not JSON at all.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn located(location: &str) -> String {
    if location.is_empty() {
        String::new()
    } else {
        format!(" in {location}")
    }
}

impl ViewError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ViewError::Validation(message.into())
    }

    pub(crate) fn malformed_day_key(key: &str, reason: impl Into<String>) -> Self {
        ViewError::MalformedDayKey {
            key: key.to_string(),
            reason: reason.into(),
            location: String::new(),
        }
    }

    /// Records the payload location an error came from.
    pub(crate) fn in_context(self, context: &str) -> Self {
        if context.is_empty() {
            return self;
        }
        match self {
            ViewError::Validation(msg) => ViewError::Validation(format!("{context}: {msg}")),
            ViewError::MalformedDayKey {
                key,
                reason,
                location,
            } if location.is_empty() => ViewError::MalformedDayKey {
                key,
                reason,
                location: context.to_string(),
            },
            other => other,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ViewError::Validation(_))
    }

    pub fn is_malformed_day_key(&self) -> bool {
        matches!(self, ViewError::MalformedDayKey { .. })
    }
}
