// src/error.rs

//! Unified error handling for the profile-views tool.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for profile-views operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Badge could not be fetched after all retries
    #[error("Fetch failed after {attempts} attempt(s): {message}")]
    Fetch { attempts: u32, message: String },

    /// Extraction fallback chain found nothing usable
    #[error("No numeric value found in badge markup")]
    NoNumericValueFound,

    /// Persisted state exists but is unreadable or of the wrong shape
    #[error("Malformed state in {path}: {message}")]
    MalformedState { path: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error from the last failure.
    pub fn fetch(attempts: u32, message: impl fmt::Display) -> Self {
        Self::Fetch {
            attempts,
            message: message.to_string(),
        }
    }

    /// Create a malformed-state error for a file.
    pub fn malformed(path: &Path, message: impl fmt::Display) -> Self {
        Self::MalformedState {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Process exit status for this error class.
    ///
    /// Fetch and parse failures get distinct codes so that calling
    /// automation can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Fetch { .. } | Self::Http(_) => 2,
            Self::NoNumericValueFound => 3,
            Self::MalformedState { .. } => 4,
            _ => 1,
        }
    }
}
