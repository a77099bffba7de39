//! Per-session debounced dispatch.
//!
//! A [`Debouncer`] owns one worker thread and a channel into it. Dispatch
//! requests arriving within the throttle window of each other coalesce;
//! only the last-requested value actually runs the job, once the window
//! elapses with no further request. The worker is private to its session,
//! so throttling for different fields never interferes.
//!
//! The job runs on the worker thread and may block for as long as it
//! likes; requests arriving meanwhile queue up and coalesce once the job
//! returns. Dropping the debouncer shuts the worker down after any job
//! already running has finished.

use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::error::{SessionError, SessionId, SessionResult};

enum Command<T> {
    Dispatch { value: T, generation: u64 },
    Shutdown,
}

/// Owned debounce worker. Generic over the value type being validated;
/// each request carries the generation stamp the session assigned to it,
/// passed through to the job untouched.
pub(crate) struct Debouncer<T> {
    tx: Sender<Command<T>>,
    handle: Option<JoinHandle<()>>,
    id: SessionId,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the worker thread. `job` runs once per settled burst with the
    /// last value requested during that burst.
    pub(crate) fn spawn<F>(id: SessionId, window: Duration, job: F) -> Self
    where
        F: Fn(T, u64) + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || worker_loop(rx, window, job));
        Self {
            tx,
            handle: Some(handle),
            id,
        }
    }

    /// Queue a dispatch request. Fails only if the worker thread has
    /// already exited.
    pub(crate) fn request(&self, value: T, generation: u64) -> SessionResult<()> {
        self.tx
            .send(Command::Dispatch { value, generation })
            .map_err(|_| SessionError::WorkerGone(self.id))
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // A pending never-fired request is abandoned along with the session.
        let _ = self.tx.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker_loop<T, F>(rx: Receiver<Command<T>>, window: Duration, job: F)
where
    F: Fn(T, u64),
{
    let mut pending: Option<(T, u64)> = None;
    loop {
        let command = if pending.is_some() {
            // A request is pending: wait out the quiet period, restarting
            // it whenever another request lands.
            match rx.recv_timeout(window) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        } else {
            match rx.recv() {
                Ok(command) => Some(command),
                Err(_) => return,
            }
        };

        match command {
            Some(Command::Dispatch { value, generation }) => {
                pending = Some((value, generation));
            }
            Some(Command::Shutdown) => return,
            None => {
                if let Some((value, generation)) = pending.take() {
                    job(value, generation);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::wait_until;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_rapid_requests_coalesce_to_last_value() {
        let fired: Arc<Mutex<Vec<(String, u64)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::spawn(
            SessionId::new(),
            Duration::from_millis(40),
            move |value: String, generation| {
                sink.lock().push((value, generation));
            },
        );

        for (i, value) in ["j", "jo", "joh", "john"].iter().enumerate() {
            debouncer.request(value.to_string(), i as u64 + 1).unwrap();
        }

        assert!(wait_until(Duration::from_secs(2), || !fired.lock().is_empty()));
        // Give a second fire a chance to happen, then assert there was none.
        thread::sleep(Duration::from_millis(120));
        let fired = fired.lock();
        assert_eq!(fired.as_slice(), &[("john".to_string(), 4)]);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let fired: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::spawn(
            SessionId::new(),
            Duration::from_millis(20),
            move |value: String, _| sink.lock().push(value),
        );

        debouncer.request("first".to_string(), 1).unwrap();
        assert!(wait_until(Duration::from_secs(2), || fired.lock().len() == 1));
        debouncer.request("second".to_string(), 2).unwrap();
        assert!(wait_until(Duration::from_secs(2), || fired.lock().len() == 2));

        assert_eq!(
            fired.lock().as_slice(),
            &["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_drop_joins_worker() {
        let debouncer: Debouncer<String> =
            Debouncer::spawn(SessionId::new(), Duration::from_millis(10), |_, _| {});
        drop(debouncer);
    }
}
