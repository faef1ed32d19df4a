//! Task pool configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`TaskPool`](crate::core::TaskPool).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPoolConfig {
    /// Number of worker threads. `0` means hardware concurrency; the
    /// effective count is always at least 1.
    pub worker_count: usize,
    /// Prefix for worker thread names (`<prefix>-<index>`).
    pub thread_name_prefix: String,
    /// Stack size per worker thread, or `None` for the platform default.
    pub thread_stack_size: Option<usize>,
}

impl Default for TaskPoolConfig {
    fn default() -> Self {
        Self {
            worker_count: 0,
            thread_name_prefix: "pool-worker".into(),
            thread_stack_size: None,
        }
    }
}

impl TaskPoolConfig {
    /// Default configuration: hardware-concurrency workers, default
    /// stacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread count (`0` = hardware concurrency).
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the per-worker stack size in bytes.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        if let Some(stack_size) = self.thread_stack_size {
            if stack_size == 0 {
                return Err("thread_stack_size must be greater than 0".into());
            }
        }
        Ok(())
    }

    /// The number of workers that will actually be spawned:
    /// `max(1, worker_count)`, with `0` standing in for hardware
    /// concurrency.
    #[must_use]
    pub fn effective_worker_count(&self) -> usize {
        let requested = if self.worker_count == 0 {
            num_cpus::get()
        } else {
            self.worker_count
        };
        requested.max(1)
    }
}
