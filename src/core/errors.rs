//! Custom error types for relay, probe and asset operations

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Relay-related errors
#[derive(Error, Debug)]
pub enum RelayError {
    /// Malformed client request
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was wrong with the request
        message: String,
    },

    /// Language code not in the supported table
    #[error("No matching Lnx language code: {code}")]
    UnsupportedLanguage {
        /// Rejected language code
        code: String,
    },

    /// Remote returned a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying failure
        message: String,
    },

    /// Invalid response from upstream
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// Parse failure detail
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is misconfigured
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        /// Path involved
        path: String,
        /// Failure detail
        message: String,
    },

    /// External command exited unsuccessfully
    #[error("Command `{command}` failed: {status}")]
    SubprocessError {
        /// Command line that was run
        command: String,
        /// Exit status description
        status: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// URL error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl RelayError {
    /// Status code the relay answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest { .. } | RelayError::UnsupportedLanguage { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
