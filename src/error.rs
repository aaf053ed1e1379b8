//! Error types for the Stratovia CloudAPI client.
//!
//! This module provides the error hierarchy for all operations in the
//! resource lifecycle: configuration, API calls, and asynchronous request
//! polling.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Stratovia operations.
#[derive(Debug, Error)]
pub enum StratoviaError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CloudAPI errors.
    #[error("CloudAPI error: {0}")]
    CloudApi(#[from] CloudApiError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },
}

/// CloudAPI errors.
///
/// Mutation failures reported by the provider fall into four families:
/// the call itself is rejected ([`NotFound`](Self::NotFound),
/// [`ValidationFailed`](Self::ValidationFailed), transport errors), the
/// call is accepted but the provisioning request later reports `FAILED`
/// ([`RequestFailed`](Self::RequestFailed)), or the request never reaches
/// a terminal status within the wait window
/// ([`Timeout`](Self::Timeout)).
#[derive(Debug, Error)]
pub enum CloudApiError {
    /// Authentication failed.
    #[error("CloudAPI authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the auth failure.
        message: String,
    },

    /// API request failed.
    #[error("CloudAPI request failed: {status} - {message}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Rate limited.
    #[error("CloudAPI rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Resource not found.
    #[error("Resource not found: {message}")]
    NotFound {
        /// Error message from the provider.
        message: String,
    },

    /// The provider rejected the request payload.
    #[error("Request validation failed: {message}")]
    ValidationFailed {
        /// Error message from the provider.
        message: String,
    },

    /// Network error.
    #[error("Network error communicating with the CloudAPI: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid response from the CloudAPI: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },

    /// A provisioning request reached the FAILED status.
    #[error("Request {request_id} failed: {message}")]
    RequestFailed {
        /// ID of the failed request.
        request_id: String,
        /// Failure message reported by the provider.
        message: String,
    },

    /// Timeout waiting for a provisioning request to complete.
    #[error("Timeout waiting for request {request_id} (last status: {last_status})")]
    Timeout {
        /// ID of the request still in flight.
        request_id: String,
        /// Last status observed before giving up.
        last_status: String,
    },
}

/// Result type alias for Stratovia operations.
pub type Result<T> = std::result::Result<T, StratoviaError>;

impl StratoviaError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CloudApi(
                CloudApiError::RateLimited { .. } | CloudApiError::NetworkError { .. }
            )
        )
    }

    /// Returns the suggested retry delay in seconds, if applicable.
    #[must_use]
    pub const fn retry_delay_secs(&self) -> Option<u64> {
        match self {
            Self::CloudApi(CloudApiError::RateLimited { retry_after_secs }) => {
                Some(*retry_after_secs)
            }
            Self::CloudApi(CloudApiError::NetworkError { .. }) => Some(5),
            _ => None,
        }
    }

    /// Returns true if this error is the provider's not-found response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::CloudApi(CloudApiError::NotFound { .. }))
    }

    /// Returns true if the provider rejected the request payload.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::CloudApi(CloudApiError::ValidationFailed { .. }))
    }

    /// Returns the provider's error message for API-level failures.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::CloudApi(
                CloudApiError::NotFound { message }
                | CloudApiError::ValidationFailed { message }
                | CloudApiError::RequestFailed { message, .. }
                | CloudApiError::ApiRequestFailed { message, .. },
            ) => Some(message),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a validation error without a specific field.
    #[must_use]
    pub fn validation_general(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }
}

impl CloudApiError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
