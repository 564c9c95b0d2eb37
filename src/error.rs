use thiserror::Error;

/// Error type for the usage core
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        capability: &'static str,
        reason: String,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UsageError {
    pub fn unavailable(capability: &'static str, reason: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability,
            reason: reason.into(),
        }
    }
}

// For bridge error payloads - converts UsageError to String
impl From<UsageError> for String {
    fn from(e: UsageError) -> Self {
        e.to_string()
    }
}
