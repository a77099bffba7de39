//! Single-shot staged validation.
//!
//! [`StagedValidator`] runs all three stages to completion in one call,
//! for contexts that can block until the asynchronous check finishes: a
//! server-side handler re-validating a submitted value, a CLI, a test.
//!
//! Unlike the reactive session there is no history, so a precheck failure
//! is reported as a plain failure rather than being demoted to "ready",
//! and no debouncing or staleness control applies.

use crate::core::checks::CheckSet;
use crate::core::status::Verdict;

/// Stateless three-stage validator. Every call is independent; given
/// deterministic check functions, repeated evaluation of the same value
/// yields the same verdict.
pub struct StagedValidator<T> {
    checks: CheckSet<T>,
}

impl<T> StagedValidator<T> {
    /// Create a validator over the given check set. The set's throttle
    /// window is irrelevant in this mode and ignored.
    pub fn new(checks: CheckSet<T>) -> Self {
        Self { checks }
    }

    /// The check set this validator runs.
    pub fn checks(&self) -> &CheckSet<T> {
        &self.checks
    }

    /// Evaluate all configured stages against a value, blocking until the
    /// asynchronous stage (if any) completes.
    ///
    /// Stage order is precheck, check, async check; each failure
    /// short-circuits the stages after it. A panicking stage function
    /// propagates to the caller.
    pub fn evaluate(&self, value: &T) -> Verdict {
        if let Some(message) = self.checks.run_precheck(value) {
            return Verdict::Fail { message };
        }
        if let Some(message) = self.checks.run_check(value) {
            return Verdict::Fail { message };
        }
        if let Some(async_check) = &self.checks.async_check {
            return Verdict::from_stage(async_check(value));
        }
        Verdict::Pass
    }
}

impl<T> From<CheckSet<T>> for StagedValidator<T> {
    fn from(checks: CheckSet<T>) -> Self {
        Self::new(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Check set for a hosted app name: at least 3 characters before
    /// feedback starts, a strict charset, and a remote uniqueness check
    /// (simulated: "duplicate" is always taken).
    fn app_name_checks() -> CheckSet<String> {
        CheckSet::new()
            .with_precheck(|name: &String| {
                (name.len() < 3).then(|| "Name must be at least 3 characters long".to_string())
            })
            .with_check(|name: &String| {
                if name.is_empty() {
                    return None;
                }
                if name.contains(' ') {
                    return Some("Name may not contain spaces".to_string());
                }
                if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
                    return Some("Name must start with a lowercase letter".to_string());
                }
                if name
                    .chars()
                    .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
                {
                    return Some("Name may only contain letters, numbers and dashes".to_string());
                }
                None
            })
            .with_async_check(|name: &String| {
                (name == "duplicate").then(|| "Name already exists".to_string())
            })
    }

    #[test]
    fn test_passes_all_checks() {
        let validator = StagedValidator::new(app_name_checks());
        assert_eq!(validator.evaluate(&"abracadabra".to_string()), Verdict::Pass);
    }

    #[test]
    fn test_fails_precheck() {
        let validator = StagedValidator::new(app_name_checks());
        let verdict = validator.evaluate(&"a".to_string());
        assert!(verdict.message().is_some_and(|m| m.contains("at least")));
    }

    #[test]
    fn test_fails_regular_check() {
        let validator = StagedValidator::new(app_name_checks());
        let verdict = validator.evaluate(&"abc$".to_string());
        assert!(verdict
            .message()
            .is_some_and(|m| m.contains("may only contain")));
    }

    #[test]
    fn test_fails_async_check() {
        let validator = StagedValidator::new(app_name_checks());
        let verdict = validator.evaluate(&"duplicate".to_string());
        assert_eq!(verdict.message(), Some("Name already exists"));
    }

    #[test]
    fn test_precheck_failure_wins_over_check_failure() {
        // "a$" fails both the precheck (too short) and the check (charset);
        // precheck runs first in single-shot mode.
        let validator = StagedValidator::new(app_name_checks());
        let verdict = validator.evaluate(&"a$".to_string());
        assert!(verdict.message().is_some_and(|m| m.contains("at least")));
    }

    #[test]
    fn test_precheck_failure_never_demoted_to_ready() {
        // Single-shot mode has no session history; a short value is a
        // plain failure, not "ready".
        let validator = StagedValidator::new(app_name_checks());
        assert!(!validator.evaluate(&"ab".to_string()).is_pass());
    }

    #[test]
    fn test_empty_check_set_passes() {
        let validator: StagedValidator<String> = StagedValidator::new(CheckSet::new());
        assert_eq!(validator.evaluate(&"anything at all".to_string()), Verdict::Pass);
    }

    #[test]
    fn test_check_not_run_after_precheck_failure() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let check_calls = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&check_calls);
        let checks = CheckSet::new()
            .with_precheck(|_: &String| Some("not yet".to_string()))
            .with_check(move |_: &String| {
                calls.fetch_add(1, Ordering::SeqCst);
                None
            });

        let validator = StagedValidator::new(checks);
        assert!(!validator.evaluate(&"x".to_string()).is_pass());
        assert_eq!(check_calls.load(Ordering::SeqCst), 0);
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_idempotent(value in "\\PC{0,24}") {
            let validator = StagedValidator::new(app_name_checks());
            let first = validator.evaluate(&value);
            let second = validator.evaluate(&value);
            prop_assert_eq!(first, second);
        }
    }
}
