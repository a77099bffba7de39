//! Error types and session identifiers.
//!
//! Validation failures are ordinary outcome values, never errors; see
//! [`crate::core::status`]. The error types here cover infrastructure
//! faults only. A panicking check function is not modeled as an error
//! either: in the synchronous stages it propagates to the caller, and on
//! the worker thread it is caught and logged, leaving session state as of
//! the last successful step.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a validation session, used to tag log lines so
/// sessions for different fields can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Infrastructure errors from a reactive session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An asynchronous dispatch could not be queued because the session's
    /// debounce worker thread has exited.
    #[error("debounce worker for session {0} is no longer running")]
    WorkerGone(SessionId),
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new();
        assert_eq!(format!("{}", id).len(), 8);
    }

    #[test]
    fn test_worker_gone_message() {
        let err = SessionError::WorkerGone(SessionId::new());
        assert!(err.to_string().contains("no longer running"));
    }
}
