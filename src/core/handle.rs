//! Future-style result handles for submitted tasks.
//!
//! A [`TaskHandle`] is bound one-to-one with a task's eventual outcome at
//! submission time and fulfilled exactly once by the worker that runs the
//! task. The slot is a `Mutex` + `Condvar` pair: the lock is held only for
//! the brief store/take, and waiters sleep on the condvar rather than poll.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::error::TaskError;

/// The outcome of a task: its return value, or the captured failure.
pub type TaskOutcome<R> = Result<R, TaskError>;

/// Shared slot between a handle and the worker that fulfills it.
pub(crate) struct ResultSlot<R> {
    outcome: Mutex<Option<TaskOutcome<R>>>,
    ready: Condvar,
}

impl<R> ResultSlot<R> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(None),
            ready: Condvar::new(),
        })
    }

    /// Store the outcome and wake any waiter. Called exactly once.
    pub(crate) fn fulfill(&self, outcome: TaskOutcome<R>) {
        let mut slot = self.outcome.lock();
        *slot = Some(outcome);
        self.ready.notify_all();
    }
}

/// Caller-held handle used to retrieve a task's eventual value or error.
///
/// Created by [`TaskPool::submit`](crate::core::TaskPool::submit). Waiting
/// consumes the handle: the outcome is delivered exactly once.
///
/// # Examples
///
/// ```rust,ignore
/// let handle = pool.submit(|| 40 + 2);
/// assert_eq!(handle.wait()?, 42);
/// ```
pub struct TaskHandle<R> {
    slot: Arc<ResultSlot<R>>,
}

impl<R> TaskHandle<R> {
    /// Create a handle and the slot the worker will fulfill.
    pub(crate) fn pair() -> (Self, Arc<ResultSlot<R>>) {
        let slot = ResultSlot::new();
        (Self { slot: Arc::clone(&slot) }, slot)
    }

    /// Whether the outcome has been delivered and [`wait`](Self::wait)
    /// would return without blocking.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.slot.outcome.lock().is_some()
    }

    /// Block until the task completes and return its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Panicked`] if the task panicked during
    /// execution.
    pub fn wait(self) -> TaskOutcome<R> {
        let mut slot = self.slot.outcome.lock();
        loop {
            if let Some(outcome) = slot.take() {
                return outcome;
            }
            self.slot.ready.wait(&mut slot);
        }
    }

    /// Block until the task completes or `timeout` elapses.
    ///
    /// The handle is consumed either way; a timed-out task keeps running in
    /// the pool, but its outcome is no longer observable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Timeout`] if the deadline passed first, or
    /// [`TaskError::Panicked`] if the task panicked.
    pub fn wait_timeout(self, timeout: Duration) -> TaskOutcome<R> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.slot.outcome.lock();
        loop {
            if let Some(outcome) = slot.take() {
                return outcome;
            }
            if self.slot.ready.wait_until(&mut slot, deadline).timed_out() {
                // One last check: the worker may have fulfilled the slot
                // right as the deadline fired.
                return slot.take().unwrap_or(Err(TaskError::Timeout));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn fulfilled_before_wait() {
        let (handle, slot) = TaskHandle::pair();
        slot.fulfill(Ok(7));
        assert!(handle.is_ready());
        assert_eq!(handle.wait().unwrap(), 7);
    }

    #[test]
    fn wait_blocks_until_fulfilled() {
        let (handle, slot) = TaskHandle::<&'static str>::pair();
        let fulfiller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            slot.fulfill(Ok("done"));
        });
        assert_eq!(handle.wait().unwrap(), "done");
        fulfiller.join().unwrap();
    }

    #[test]
    fn wait_timeout_expires() {
        let (handle, _slot) = TaskHandle::<u32>::pair();
        let outcome = handle.wait_timeout(Duration::from_millis(10));
        assert!(matches!(outcome, Err(TaskError::Timeout)));
    }

    #[test]
    fn error_outcome_is_delivered() {
        let (handle, slot) = TaskHandle::<u32>::pair();
        slot.fulfill(Err(TaskError::Panicked("kaboom".into())));
        match handle.wait() {
            Err(TaskError::Panicked(msg)) => assert_eq!(msg, "kaboom"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
