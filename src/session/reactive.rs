//! Reactive validation session.
//!
//! A session is created once per validated field and re-invoked with the
//! current value on every change (and on any re-render). Each call runs
//! the synchronous stages inline and returns immediately; the
//! asynchronous check runs on the session's own debounce worker and
//! reports into shared state, surfaced by a later call.
//!
//! # Staleness
//!
//! Every dispatch for a changed value increments the session's generation
//! stamp and tags the request with it. When a check completes, the worker
//! compares the request's stamp against the current generation and
//! discards the result on mismatch: a newer value has superseded it.
//! Superseded checks are never cancelled, only ignored on arrival. The
//! generation is read and the stored verdict written under the same lock,
//! so a re-dispatch on the caller thread cannot interleave with a
//! completion.
//!
//! # Reset timing
//!
//! The call that introduces a new value resets the stored verdict to
//! waiting *before* returning. The previous value's settled verdict is
//! never surfaced for the new value, not even for one call.

use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::checks::{AsyncCheckFn, CheckSet};
use crate::core::error::SessionId;
use crate::core::status::{ValidationStatus, Verdict};
use crate::session::debounce::Debouncer;

/// Callback invoked from the worker thread when a completed asynchronous
/// check is stored, so the embedding layer can re-render without waiting
/// for a value change.
pub type UpdateListener = Arc<dyn Fn(ValidationStatus) + Send + Sync>;

/// State shared between the session and its debounce worker.
struct SharedState {
    /// Latest asynchronous outcome; `None` means waiting.
    verdict: Mutex<Option<Verdict>>,
    /// Staleness stamp, bumped on each dispatch for a changed value.
    generation: AtomicU64,
    listener: Mutex<Option<UpdateListener>>,
}

/// Stateful wrapper around the staged ordering rules for callers that
/// re-invoke validation on every value change instead of awaiting it
/// end-to-end.
///
/// One session per field; calls to [`evaluate`](Self::evaluate) must
/// arrive serially from a single logical caller. Dropping the session
/// shuts its worker down.
pub struct ReactiveValidationSession<T> {
    id: SessionId,
    checks: CheckSet<T>,
    shared: Arc<SharedState>,
    /// `None` when no asynchronous check is configured.
    debouncer: Option<Debouncer<T>>,
    /// Value as of the most recently completed evaluation. `None` before
    /// the first call, so the first call always counts as a change.
    last_value: Option<T>,
    /// One-way latch: set once the precheck has passed, never cleared.
    report_prechecks: bool,
}

impl<T: Clone + PartialEq + Send + 'static> ReactiveValidationSession<T> {
    /// Create a session over the given check set. If an asynchronous check
    /// is configured this spawns the session's debounce worker.
    pub fn new(checks: CheckSet<T>) -> Self {
        let id = SessionId::new();
        let shared = Arc::new(SharedState {
            verdict: Mutex::new(None),
            generation: AtomicU64::new(0),
            listener: Mutex::new(None),
        });

        let debouncer = checks.async_check.clone().map(|async_check| {
            let shared = Arc::clone(&shared);
            Debouncer::spawn(id, checks.throttle, move |value: T, generation| {
                complete_async_check(&async_check, &shared, id, &value, generation);
            })
        });

        Self {
            id,
            checks,
            shared,
            debouncer,
            last_value: None,
            report_prechecks: false,
        }
    }

    /// Attach an update listener, invoked from the worker thread whenever
    /// a completed asynchronous check is stored.
    pub fn with_listener<F>(self, listener: F) -> Self
    where
        F: Fn(ValidationStatus) + Send + Sync + 'static,
    {
        *self.shared.listener.lock() = Some(Arc::new(listener));
        self
    }

    /// This session's identifier, as used in its log lines.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Whether the precheck has ever passed for this session. Monotonic:
    /// once true, precheck failures report as failures instead of "ready".
    pub fn reports_prechecks(&self) -> bool {
        self.report_prechecks
    }

    /// Evaluate the current value and return its status.
    ///
    /// Runs the check stage, then the precheck stage, inline; if both
    /// pass and an asynchronous check is configured, a changed value is
    /// handed to the debounce worker and the latest asynchronous outcome
    /// is returned (initially [`ValidationStatus::Waiting`]).
    ///
    /// A panicking check function propagates to the caller before any
    /// session state is updated for this call, so the next invocation
    /// retries from the previous state.
    pub fn evaluate(&mut self, value: T) -> ValidationStatus {
        // Check failures are always surfaced and short-circuit everything
        // else; outstanding async state is left untouched.
        if let Some(message) = self.checks.run_check(&value) {
            self.last_value = Some(value);
            return ValidationStatus::Fail { message };
        }

        if let Some(message) = self.checks.run_precheck(&value) {
            self.last_value = Some(value);
            return if self.report_prechecks {
                ValidationStatus::Fail { message }
            } else {
                ValidationStatus::Ready { message }
            };
        }
        self.report_prechecks = true;

        let Some(debouncer) = &self.debouncer else {
            self.last_value = Some(value);
            return ValidationStatus::Pass;
        };

        if self.last_value.as_ref() != Some(&value) {
            // New value entering the async stage: reset to waiting and
            // bump the generation before dispatching, both under the
            // verdict lock so an in-flight completion cannot interleave.
            let generation = {
                let mut verdict = self.shared.verdict.lock();
                *verdict = None;
                self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1
            };
            log::debug!(
                "[session {}] dispatching async check (generation {})",
                self.id,
                generation
            );
            if let Err(err) = debouncer.request(value.clone(), generation) {
                log::warn!("[session {}] {}", self.id, err);
            }
        }
        self.last_value = Some(value);

        match &*self.shared.verdict.lock() {
            None => ValidationStatus::Waiting,
            Some(verdict) => verdict.clone().into(),
        }
    }
}

/// Runs on the worker thread once a dispatched request's quiet period has
/// elapsed: invoke the asynchronous check and store its verdict, unless a
/// newer value has superseded this request.
fn complete_async_check<T>(
    async_check: &AsyncCheckFn<T>,
    shared: &SharedState,
    id: SessionId,
    value: &T,
    generation: u64,
) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| async_check(value)));
    let message = match result {
        Ok(message) => message,
        Err(_) => {
            log::error!(
                "[session {}] async check panicked; keeping previous outcome",
                id
            );
            return;
        }
    };

    let verdict = Verdict::from_stage(message);
    {
        let mut slot = shared.verdict.lock();
        if generation != shared.generation.load(Ordering::SeqCst) {
            // Stale by design, not a failure.
            log::debug!(
                "[session {}] discarding superseded async result (generation {})",
                id,
                generation
            );
            return;
        }
        *slot = Some(verdict.clone());
        log::debug!(
            "[session {}] async check settled: {} (generation {})",
            id,
            verdict,
            generation
        );
    }

    let listener = shared.listener.lock().clone();
    if let Some(listener) = listener {
        listener(verdict.into());
    }
}
