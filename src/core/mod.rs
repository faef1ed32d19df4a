//! Core components: the worker task pool and the scoped resource stack.
//!
//! The two components are independent; both are consumed by a presentation
//! layer that lives outside this crate.

pub mod error;
pub mod handle;
pub mod scoped_stack;
pub mod task_pool;

pub use error::{AppResult, PoolError, StackError, TaskError};
pub use handle::TaskHandle;
pub use scoped_stack::{ResourceLoader, ScopeGuard, ScopedStack};
pub use task_pool::TaskPool;
