//! Result and error types for ollama-probe.

use std::time::Duration;
use thiserror::Error;

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while probing an inference server
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connection refused, DNS failure, reset, or any other transport fault
    #[error("Connection error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request did not complete within its timeout
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        /// URL that timed out
        url: String,
        /// Timeout that expired
        timeout: Duration,
    },

    /// Server answered with a non-200 status
    #[error("Server returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body was not the JSON shape we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Model key not present in the alias table
    #[error("Model '{key}' is not recognized")]
    UnknownModel {
        /// Key given on the command line
        key: String,
    },

    /// Resolved model is not installed on the server
    #[error("Model '{model}' is not installed")]
    ModelNotInstalled {
        /// Resolved model name
        model: String,
    },
}

impl ProbeError {
    /// Classify a reqwest failure, splitting timeouts from other transport errors.
    pub(crate) fn from_reqwest(err: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Self::Transport(err)
        }
    }

    /// Whether the request timed out
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// HTTP status for [`ProbeError::Api`]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
