//! Stateful reactive validation.
//!
//! [`ReactiveValidationSession`] is the re-invoked half of the pipeline:
//! it tracks precheck history, debounces the asynchronous check through a
//! session-owned worker, and discards out-of-order asynchronous results.

mod debounce;
pub mod reactive;

pub use reactive::{ReactiveValidationSession, UpdateListener};

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::{Duration, Instant};

    /// Poll `condition` until it holds or `deadline` elapses. Returns
    /// whether the condition held. Timing-sensitive tests use this instead
    /// of fixed sleeps.
    pub(crate) fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        condition()
    }
}
