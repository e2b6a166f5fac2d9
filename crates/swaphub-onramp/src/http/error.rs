/*
[INPUT]:  Error sources (validation, credentials, signing, HTTP, provider, parsing)
[OUTPUT]: Structured error types with retry and configuration hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the on-ramp pipeline
#[derive(Error, Debug)]
pub enum OnrampError {
    /// Caller input is missing or malformed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Server-held credentials are missing or unusable
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        hint: Option<String>,
    },

    /// Key material rejected by the signing primitive
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Network failure or timeout talking to the provider
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider error (status {status}): {body}")]
    Provider { status: u16, body: String },

    /// Provider answered 2xx but the body was not usable
    #[error("Unexpected provider response: {0}")]
    Parse(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl OnrampError {
    /// Whether the caller may retry (with a freshly signed assertion).
    pub fn is_retryable(&self) -> bool {
        match self {
            OnrampError::Transport(_) => true,
            OnrampError::Provider { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }

    /// Whether the failure is on the server's side of the credential setup.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            OnrampError::Configuration { .. } | OnrampError::Signing(_) => true,
            OnrampError::Provider { status, .. } => {
                *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::FORBIDDEN.as_u16()
            }
            _ => false,
        }
    }

    /// Create a provider error from status code and body
    pub fn provider_error(status: StatusCode, body: impl Into<String>) -> Self {
        OnrampError::Provider {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    pub fn configuration(message: impl Into<String>, hint: impl Into<String>) -> Self {
        OnrampError::Configuration {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// Result type alias for on-ramp operations
pub type Result<T> = std::result::Result<T, OnrampError>;
