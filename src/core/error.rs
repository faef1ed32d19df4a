//! Error types for the task pool and the scoped resource stack.

use thiserror::Error;

/// Errors produced while constructing a [`TaskPool`](crate::core::TaskPool).
#[derive(Debug, Error)]
pub enum PoolError {
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Outcome errors delivered through a [`TaskHandle`](crate::core::TaskHandle).
///
/// A panic inside a `submit`-ted task is captured into [`TaskError::Panicked`]
/// rather than propagated, so one failing task can never kill a worker or
/// starve the pool.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The task panicked during execution; carries the panic message.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// The bounded wait elapsed before the task completed.
    #[error("timed out waiting for task result")]
    Timeout,
}

/// Usage errors on a [`ScopedStack`](crate::core::ScopedStack).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    /// `pop` was called without a matching prior `push`.
    ///
    /// The seeded baseline entry (the first resource ever loaded) is
    /// permanent, so this fires when only the baseline (or nothing at
    /// all) remains on the stack.
    #[error("pop without matching push")]
    PopWithoutPush,
}

/// Application-facing result using anyhow for higher-level contexts, such as
/// [`FontBackend`](crate::font::FontBackend) implementations wrapping
/// renderer-specific failures.
pub type AppResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            PoolError::InvalidConfig("worker_count".into()).to_string(),
            "invalid configuration: worker_count"
        );
        assert_eq!(
            TaskError::Panicked("boom".into()).to_string(),
            "task panicked: boom"
        );
        assert_eq!(
            TaskError::Timeout.to_string(),
            "timed out waiting for task result"
        );
        assert_eq!(
            StackError::PopWithoutPush.to_string(),
            "pop without matching push"
        );
    }
}
