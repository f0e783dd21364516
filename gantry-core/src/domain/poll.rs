//! Poll domain types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Specification for a single wait operation
///
/// Immutable once constructed; consumed by exactly one poll run together
/// with the condition check closure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSpec {
    /// Human-readable description of the condition, used in log lines
    pub description: String,
    /// Maximum time to keep retrying before giving up
    pub timeout: Duration,
    /// Sleep between consecutive check attempts
    pub interval: Duration,
}

impl PollSpec {
    /// Creates a new poll specification
    pub fn new(description: impl Into<String>, timeout: Duration, interval: Duration) -> Self {
        Self {
            description: description.into(),
            timeout,
            interval,
        }
    }
}

/// Outcome of a single check attempt
///
/// Produced fresh on every invocation of the check function and never
/// persisted. A check must report expected "not ready" conditions through
/// this type instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollOutcome {
    /// The condition holds; the poll finishes successfully
    Ready,
    /// The condition does not hold yet, with the observed state as reason
    NotReady(String),
    /// The check itself failed (e.g. a transient cluster API error);
    /// absorbed into the retry loop exactly like `NotReady`
    Error(String),
}

impl PollOutcome {
    /// Builds an `Error` outcome from anything displayable
    pub fn error(cause: impl std::fmt::Display) -> Self {
        Self::Error(cause.to_string())
    }
}

/// Final report of a completed poll run
///
/// Returned exactly once per run. A timeout is a normal outcome
/// (`succeeded: false`), not an error; the caller decides whether it is
/// fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResult {
    /// Whether the condition was reached before the deadline
    pub succeeded: bool,
    /// Wall-clock time spent in the poll loop
    pub elapsed: Duration,
    /// Number of check attempts performed, always >= 1
    pub attempts: u32,
    /// Reason reported by the last unsuccessful attempt, if any
    pub last_reason: Option<String>,
}
