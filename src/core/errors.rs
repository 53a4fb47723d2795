//! Error types for the helper library
//! Provides structured error handling using thiserror for better error reporting

use thiserror::Error;

/// Main error type for the helper library
#[derive(Error, Debug)]
pub enum HelperError {
    /// Input that could not be turned into the requested value
    #[error("Unparseable input {input:?}: {reason}")]
    Unparseable { input: String, reason: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON decoding errors
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type HelperResult<T> = std::result::Result<T, HelperError>;

impl HelperError {
    /// Create an unparseable-input error
    pub fn unparseable<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Self::Unparseable {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
