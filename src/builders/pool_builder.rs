//! Construct a task pool from configuration.

use crate::config::HarnessConfig;
use crate::core::{PoolError, TaskPool};

/// Build the background [`TaskPool`] from a harness configuration.
///
/// # Errors
///
/// Returns [`PoolError::InvalidConfig`] if any section of the
/// configuration fails validation, or [`PoolError::Spawn`] if a worker
/// thread cannot be created.
pub fn build_task_pool(cfg: &HarnessConfig) -> Result<TaskPool, PoolError> {
    cfg.validate().map_err(PoolError::InvalidConfig)?;
    TaskPool::new(cfg.pool.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let pool = build_task_pool(&HarnessConfig::default()).unwrap();
        assert!(pool.thread_count() >= 1);
    }
}
