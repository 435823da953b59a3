//! Error types for CodeRunner

use thiserror::Error;

/// Result type alias using CodeRunner's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CodeRunner
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid execution request (empty source code, empty language label)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Engine unreachable or its inventory endpoint returned a failure
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Engine has no runtimes installed at all
    #[error("Engine has no runtimes installed")]
    NoRuntimesInstalled,

    /// Requested language absent from the engine's runtime inventory
    #[error("Language '{language}' is not supported by this engine (available: {})", .available.join(", "))]
    LanguageNotSupported {
        /// Canonical language id that was requested
        language: String,
        /// Languages the engine reported as installed
        available: Vec<String>,
    },

    /// Engine rejected the execution request with a non-2xx status
    #[error("Engine rejected execution ({status}): {body}")]
    ExecutionRejected {
        /// HTTP status returned by the engine
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// Engine returned a body this client cannot interpret
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    /// Both engines failed at the engine level
    #[error("All execution engines failed (primary: {primary}; secondary: {secondary})")]
    EnginesExhausted {
        /// Why the primary engine was abandoned
        primary: String,
        /// Why the secondary engine also failed
        secondary: String,
    },

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this failure is attributable to the engine rather than the
    /// user's code, i.e. whether the orchestrator may fail over to the
    /// secondary engine.
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            Error::EngineUnavailable(_)
                | Error::NoRuntimesInstalled
                | Error::LanguageNotSupported { .. }
                | Error::ExecutionRejected { .. }
                | Error::InvalidResponse(_)
                | Error::Http(_)
        )
    }

    /// Check if this error was raised before any network call
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Config(_))
    }
}
