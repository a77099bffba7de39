//! Check set configuration.
//!
//! A [`CheckSet`] bundles the three optional stage functions and the
//! throttle window. The same set drives both evaluation modes: the
//! single-shot pipeline and the reactive session.
//!
//! Stage functions return `None` to pass and `Some(message)` to fail. They
//! must be deterministic for a given value and must not mutate session
//! state. `check` and `precheck` run synchronously on the caller's thread
//! and must not block on I/O; `async_check` may perform blocking I/O and is
//! shared behind an `Arc` so the session's worker thread can own it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A synchronous stage function: `None` passes, `Some(message)` fails.
pub type CheckFn<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// An asynchronous stage function. Shares the same pass/fail contract as
/// [`CheckFn`] but may block on I/O, and must tolerate being invoked
/// repeatedly for different values with no ordering guarantee on completion.
pub type AsyncCheckFn<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Default quiet period before a dispatched asynchronous check fires.
pub const DEFAULT_THROTTLE: Duration = Duration::from_secs(1);

/// The three optional stage functions plus the throttle window.
pub struct CheckSet<T> {
    pub(crate) precheck: Option<CheckFn<T>>,
    pub(crate) check: Option<CheckFn<T>>,
    pub(crate) async_check: Option<AsyncCheckFn<T>>,
    pub(crate) throttle: Duration,
}

impl<T> CheckSet<T> {
    /// Create an empty check set. With no stages configured, every value
    /// passes.
    pub fn new() -> Self {
        Self {
            precheck: None,
            check: None,
            async_check: None,
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Set the precheck stage. Conventionally used for "not enough input
    /// yet" conditions such as a minimum length.
    pub fn with_precheck<F>(mut self, precheck: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.precheck = Some(Box::new(precheck));
        self
    }

    /// Set the synchronous check stage. Its failure is always surfaced,
    /// regardless of precheck history.
    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.check = Some(Box::new(check));
        self
    }

    /// Set the asynchronous check stage.
    pub fn with_async_check<F>(mut self, async_check: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.async_check = Some(Arc::new(async_check));
        self
    }

    /// Set the throttle window for asynchronous dispatch. Defaults to
    /// [`DEFAULT_THROTTLE`] (one second).
    pub fn with_throttle(mut self, window: Duration) -> Self {
        self.throttle = window;
        self
    }

    /// The configured throttle window.
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Whether an asynchronous check is configured.
    pub fn has_async_check(&self) -> bool {
        self.async_check.is_some()
    }

    /// Run the check stage. `None` when the stage is absent or passes.
    pub(crate) fn run_check(&self, value: &T) -> Option<String> {
        self.check.as_ref().and_then(|check| check(value))
    }

    /// Run the precheck stage. `None` when the stage is absent or passes.
    pub(crate) fn run_precheck(&self, value: &T) -> Option<String> {
        self.precheck.as_ref().and_then(|precheck| precheck(value))
    }
}

impl<T> Default for CheckSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CheckSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckSet")
            .field("precheck", &self.precheck.as_ref().map(|_| "<fn>"))
            .field("check", &self.check.as_ref().map(|_| "<fn>"))
            .field("async_check", &self.async_check.as_ref().map(|_| "<fn>"))
            .field("throttle", &self.throttle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_throttle() {
        let checks: CheckSet<String> = CheckSet::new();
        assert_eq!(checks.throttle(), Duration::from_secs(1));
        assert!(!checks.has_async_check());
    }

    #[test]
    fn test_absent_stages_pass() {
        let checks: CheckSet<String> = CheckSet::new();
        assert_eq!(checks.run_check(&"anything".to_string()), None);
        assert_eq!(checks.run_precheck(&"anything".to_string()), None);
    }

    #[test]
    fn test_builder() {
        let checks = CheckSet::new()
            .with_precheck(|v: &String| (v.len() < 3).then(|| "too short".to_string()))
            .with_check(|v: &String| v.contains(' ').then(|| "no spaces".to_string()))
            .with_throttle(Duration::from_millis(50));

        assert_eq!(checks.throttle(), Duration::from_millis(50));
        assert_eq!(
            checks.run_precheck(&"ab".to_string()),
            Some("too short".to_string())
        );
        assert_eq!(checks.run_precheck(&"abc".to_string()), None);
        assert_eq!(
            checks.run_check(&"a b".to_string()),
            Some("no spaces".to_string())
        );
    }
}
