//! # Triplecheck - Staged Value Validation
//!
//! Triplecheck classifies a mutating input value through three escalating
//! stages: a synchronous blocking `check`, a synchronous readiness
//! `precheck`, and a debounced asynchronous `async_check`, composing their
//! results into one coherent status for the caller.
//!
//! ## Features
//!
//! - **Four-way status**: `ready` (not enough input yet), `waiting` (async
//!   check outstanding), `pass`, and `fail` with a message
//! - **Readiness latch**: precheck failures report as "ready" until the
//!   precheck has passed once, then as failures; the latch never resets
//! - **Debounced async dispatch**: rapid value changes coalesce into one
//!   asynchronous call per settled burst, on a per-session worker
//! - **Staleness control**: a late-arriving asynchronous result for a
//!   superseded value is discarded, never surfacing over newer state
//! - **Two modes, one ordering**: a stateless single-shot pipeline and a
//!   stateful session driven by caller re-invocation
//!
//! ## Quick Start
//!
//! ```rust
//! use triplecheck::prelude::*;
//! use std::time::Duration;
//!
//! let checks = CheckSet::new()
//!     .with_precheck(|name: &String| {
//!         (name.len() < 3).then(|| "Name must be at least 3 characters long".to_string())
//!     })
//!     .with_check(|name: &String| {
//!         name.contains(' ').then(|| "Name may not contain spaces".to_string())
//!     })
//!     .with_async_check(|name: &String| {
//!         // Usually a remote uniqueness lookup.
//!         (name == "duplicate").then(|| "Name already exists".to_string())
//!     })
//!     .with_throttle(Duration::from_millis(300));
//!
//! let mut session = ReactiveValidationSession::new(checks);
//!
//! // Not enough input yet: "ready", no error shown.
//! assert!(matches!(session.evaluate("ab".to_string()), ValidationStatus::Ready { .. }));
//!
//! // Both synchronous stages pass; the async check is now outstanding.
//! assert!(session.evaluate("abc".to_string()).is_waiting());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: statuses, check sets, errors
//! - [`pipeline`]: [`StagedValidator`](pipeline::StagedValidator), the
//!   single-shot fully-blocking mode
//! - [`session`]: [`ReactiveValidationSession`](session::ReactiveValidationSession),
//!   the stateful re-invoked mode with debounce and staleness control
//!
//! The session assumes one logical caller invoking it serially, the usual
//! UI re-render model; its worker-facing state is internally synchronized,
//! its caller-facing state is `&mut self`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pipeline;
pub mod session;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use triplecheck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::checks::{AsyncCheckFn, CheckFn, CheckSet, DEFAULT_THROTTLE};
    pub use crate::core::error::{SessionError, SessionId, SessionResult};
    pub use crate::core::status::{ValidationStatus, Verdict};
    pub use crate::pipeline::staged::StagedValidator;
    pub use crate::session::reactive::{ReactiveValidationSession, UpdateListener};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
