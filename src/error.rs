//! Error types for the EmotiLive log service
//!
//! One failed ingestion or query must never take the process down: every
//! variant here is surfaced to the caller, logged, and forgotten.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// EmotiLive log service error types
#[derive(Error, Debug)]
pub enum Error {
    /// Required field missing or empty on ingestion (maps to HTTP 400)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Underlying log store could not serve the request (maps to HTTP 500)
    #[error("log store unavailable: {0}")]
    StoreUnavailable(String),

    /// A logs response did not have the expected `{{logs: [...]}}` shape.
    /// Consumers treat this as an empty record set, never as a crash.
    #[error("malformed logs response: {0}")]
    MalformedResponse(String),

    /// External model trigger failed (non-zero exit or stderr output)
    #[error("model trigger failed: {0}")]
    Trigger(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error should be reported to HTTP clients as a 400.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
