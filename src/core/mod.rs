//! Core types for the triplecheck validation pipeline.
//!
//! - [`status`]: the statuses and verdicts returned to callers
//! - [`checks`]: the three-stage check set configuration
//! - [`error`]: infrastructure errors and session identifiers

pub mod checks;
pub mod error;
pub mod status;

pub use checks::{AsyncCheckFn, CheckFn, CheckSet, DEFAULT_THROTTLE};
pub use error::{SessionError, SessionId, SessionResult};
pub use status::{ValidationStatus, Verdict};
