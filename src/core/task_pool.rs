//! Fixed-size worker pool with future-based result delivery.
//!
//! The pool decouples call sites from execution latency: zero-argument
//! closures are enqueued without blocking and run on one of N dedicated OS
//! threads. Results come back through a [`TaskHandle`]; fire-and-forget
//! submission is available for work nobody observes.
//!
//! # Design
//!
//! - **One lock, two condvars**: a single `parking_lot::Mutex` guards the
//!   queue, the outstanding-task counter, and the shutdown flag.
//!   `work_available` wakes idle workers; `work_done` wakes `wait()` /
//!   `wait_for()` and the destructor.
//! - **No lock during execution**: workers hold the lock only to dequeue and
//!   to update counters, so task bodies run fully concurrently.
//! - **Drain on drop**: dropping the pool blocks until every queued and
//!   in-flight task has completed, then stops and joins the workers. No
//!   task is ever abandoned mid-execution.
//! - **No cancellation**: once enqueued, a task runs to completion.
//!
//! # Caller responsibility
//!
//! A task must not block on the pool it was submitted to (`wait`,
//! `wait_for`, or a `TaskHandle` of a task queued behind it): if every
//! worker does so simultaneously, the pool deadlocks. This is documented,
//! not internally prevented.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use crate::config::TaskPoolConfig;

use super::error::{PoolError, TaskError};
use super::handle::TaskHandle;

/// Type-erased unit of work. Boxing keeps the queue homogeneous over
/// arbitrary closure types.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Queue and counters; every field is guarded by the pool mutex.
struct PoolState {
    /// Tasks not yet claimed by a worker.
    queue: VecDeque<Job>,
    /// Tasks submitted and not yet fully completed (queued + running).
    total: usize,
    /// Set by the destructor once the queue has drained.
    shutdown: bool,
}

struct PoolShared {
    state: Mutex<PoolState>,
    /// Signaled when a task is enqueued (wakes idle workers).
    work_available: Condvar,
    /// Signaled when a task finishes (wakes `wait`/`wait_for`/drop).
    work_done: Condvar,
}

/// A fixed-size pool of worker threads executing submitted closures.
///
/// # Examples
///
/// ```rust,ignore
/// use stagehand::config::TaskPoolConfig;
/// use stagehand::core::TaskPool;
///
/// let pool = TaskPool::new(TaskPoolConfig::new().with_worker_count(4))?;
/// let handle = pool.submit(|| heavy_compute());
/// let value = handle.wait()?;
/// ```
pub struct TaskPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskPool {
    /// Create a pool, spawning `max(1, worker_count)` worker threads
    /// immediately. A configured count of zero means hardware concurrency.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the configuration fails
    /// validation, or [`PoolError::Spawn`] if the OS refuses a thread.
    pub fn new(config: TaskPoolConfig) -> Result<Self, PoolError> {
        config.validate().map_err(PoolError::InvalidConfig)?;
        let worker_count = config.effective_worker_count();

        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                total: 0,
                shutdown: false,
            }),
            work_available: Condvar::new(),
            work_done: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let mut builder = std::thread::Builder::new()
                .name(format!("{}-{worker_id}", config.thread_name_prefix));
            if let Some(stack_size) = config.thread_stack_size {
                builder = builder.stack_size(stack_size);
            }
            let worker_shared = Arc::clone(&shared);
            match builder.spawn(move || worker_loop(worker_id, &worker_shared)) {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    // Failed construction must not leak the workers
                    // already started: stop and join them first.
                    shared.state.lock().shutdown = true;
                    shared.work_available.notify_all();
                    for worker in workers {
                        let _ = worker.join();
                    }
                    return Err(PoolError::Spawn(err));
                }
            }
        }

        info!(worker_count, "task pool started");
        Ok(Self { shared, workers })
    }

    /// Create a pool with an explicit thread count and default settings
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Spawn`] if the OS refuses a thread.
    pub fn with_threads(worker_count: usize) -> Result<Self, PoolError> {
        Self::new(TaskPoolConfig::new().with_worker_count(worker_count))
    }

    fn enqueue(&self, job: Job) {
        {
            let mut state = self.shared.state.lock();
            state.queue.push_back(job);
            state.total += 1;
        }
        self.shared.work_available.notify_one();
    }

    /// Enqueue a closure for fire-and-forget execution.
    ///
    /// Returns immediately. A panic during later execution is caught and
    /// discarded (logged at warning level, invisible to the caller). This
    /// is a documented limitation of the contract, not an oversight:
    /// callers that need error visibility use [`submit`](Self::submit).
    pub fn exec<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue(Box::new(move || {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                warn!(
                    panic = %panic_message(payload.as_ref()),
                    "fire-and-forget task panicked; outcome discarded"
                );
            }
        }));
    }

    /// Enqueue a closure and return a handle to its eventual outcome.
    ///
    /// Returns immediately. On success the handle is fulfilled with the
    /// closure's return value (`()` for procedures); on a panic it is
    /// fulfilled with [`TaskError::Panicked`] carrying the panic message.
    /// Either way the worker survives and keeps serving the queue.
    pub fn submit<F, R>(&self, task: F) -> TaskHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (handle, slot) = TaskHandle::pair();
        self.enqueue(Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task))
                .map_err(|payload| TaskError::Panicked(panic_message(payload.as_ref())));
            slot.fulfill(outcome);
        }));
        handle
    }

    /// Number of tasks waiting in the queue, not yet claimed by a worker.
    #[must_use]
    pub fn tasks_queued(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Number of tasks currently being executed by workers.
    #[must_use]
    pub fn tasks_running(&self) -> usize {
        let state = self.shared.state.lock();
        state.total - state.queue.len()
    }

    /// Total outstanding tasks: queued plus running.
    #[must_use]
    pub fn tasks_total(&self) -> usize {
        self.shared.state.lock().total
    }

    /// Number of worker threads owned by the pool.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Block until every task submitted so far has fully completed.
    ///
    /// Work submitted concurrently by other callers extends the wait: the
    /// condition is `tasks_total() == 0`, observed under the pool lock.
    pub fn wait(&self) {
        let mut state = self.shared.state.lock();
        self.shared.work_done.wait_while(&mut state, |s| s.total > 0);
    }

    /// Bounded [`wait`](Self::wait): returns whether the zero-outstanding
    /// condition was reached before `timeout` elapsed.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let mut state = self.shared.state.lock();
        let _ = self
            .shared
            .work_done
            .wait_while_for(&mut state, |s| s.total > 0, timeout);
        state.total == 0
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        // Drain first: destruction never abandons queued or in-flight work.
        {
            let mut state = self.shared.state.lock();
            self.shared.work_done.wait_while(&mut state, |s| s.total > 0);
            state.shutdown = true;
        }
        self.shared.work_available.notify_all();

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                // Unreachable in practice: every job is wrapped in
                // catch_unwind before it reaches a worker.
                warn!("worker thread terminated abnormally during shutdown");
            }
        }
        debug!("task pool shut down");
    }
}

fn worker_loop(worker_id: usize, shared: &PoolShared) {
    debug!(worker_id, "worker thread started");
    loop {
        let job = {
            let mut state = shared.state.lock();
            shared
                .work_available
                .wait_while(&mut state, |s| s.queue.is_empty() && !s.shutdown);
            match state.queue.pop_front() {
                Some(job) => job,
                // Shutdown requested and the queue is drained.
                None => break,
            }
        };

        // Execute without holding the lock.
        job();

        let mut state = shared.state.lock();
        state.total -= 1;
        drop(state);
        shared.work_done.notify_all();
    }
    debug!(worker_id, "worker thread exiting");
}

/// Render a panic payload as a message for [`TaskError::Panicked`].
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
