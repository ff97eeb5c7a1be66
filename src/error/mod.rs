//! Error types for mstranslate.

pub mod category;

pub use category::{ErrorCategory, RecoverySuggestion};

use reqwest::StatusCode;
use thiserror::Error;

/// Primary error type for token acquisition and translation calls.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote answered with status >= 400. `body` is the raw response body.
    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Access token expired")]
    ExpiredToken,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for TranslateError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<quick_xml::se::SeError> for TranslateError {
    fn from(error: quick_xml::se::SeError) -> Self {
        Self::InvalidArgument(format!("cannot encode request: {error}"))
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<toml::de::Error> for TranslateError {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration(error.to_string())
    }
}

impl TranslateError {
    /// Create an HTTP status error.
    pub fn http_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a missing-parameter error in the remote API's wording.
    pub fn required(param: &str) -> Self {
        Self::InvalidArgument(format!("\"{param}\" is a required parameter"))
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Network,
            Self::HttpStatus { status, .. } => match status.as_u16() {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ExpiredToken => ErrorCategory::Authentication,
            Self::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExpiredToken)
            || matches!(
                self.category(),
                ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
            )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        if matches!(self, Self::ExpiredToken) {
            return RecoverySuggestion::RefreshToken;
        }
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Configuration | ErrorCategory::Io => {
                RecoverySuggestion::CheckConfiguration
            }
            ErrorCategory::InvalidArgument => RecoverySuggestion::FixRequest,
            ErrorCategory::Api | ErrorCategory::Decode => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TranslateError>;
