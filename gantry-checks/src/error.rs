//! Error types for cluster and endpoint checks

use thiserror::Error;

/// Result type alias for check operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that can occur while querying the cluster or an endpoint
#[derive(Debug, Error)]
pub enum CheckError {
    /// Spawning or waiting on the kubectl subprocess failed
    #[error("failed to run {command}: {source}")]
    Exec {
        /// The command line that was attempted
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// kubectl exited with a non-zero status (other than "not found")
    #[error("{command} failed: {stderr}")]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Captured standard error output
        stderr: String,
    },

    /// kubectl produced output we could not parse
    #[error("failed to parse kubectl output: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP request construction failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl CheckError {
    /// Builds an [`CheckError::Exec`] from the attempted command line
    pub fn exec(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Exec {
            command: command.into(),
            source,
        }
    }

    /// Builds a [`CheckError::CommandFailed`] from the command line and stderr
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}
