//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a CLI run with a non-zero exit code
#[derive(Debug, Error)]
pub enum CliError {
    /// Liveness probe failed
    #[error("Ollama is not reachable at {base_url}")]
    ServerUnavailable {
        /// Server base URL
        base_url: String,
    },

    /// Discovery produced nothing to test
    #[error("No models available to test")]
    NoModels,

    /// Probe library error
    #[error(transparent)]
    Probe(#[from] ollama_probe::ProbeError),

    /// One or more generation tests failed
    #[error("Test failed: {message}")]
    TestFailed {
        /// Error message
        message: String,
    },

    /// Async runtime could not be created
    #[error("Failed to create async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl CliError {
    /// Create a server-unavailable error
    #[must_use]
    pub fn server_unavailable(base_url: impl Into<String>) -> Self {
        Self::ServerUnavailable {
            base_url: base_url.into(),
        }
    }

    /// Create a test failure error
    #[must_use]
    pub fn test_failed(message: impl Into<String>) -> Self {
        Self::TestFailed {
            message: message.into(),
        }
    }
}
