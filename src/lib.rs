//! # Stagehand
//!
//! Backstage support for immediate-mode GUI harnesses: a worker-thread task
//! pool and a scope-stacked resource cache (specialized for fonts).
//!
//! The presentation layer of a GUI demo harness has two recurring needs that
//! have nothing to do with widgets:
//!
//! - **Offloading**: a button press kicks off a long-running action; the UI
//!   thread must not block, and the result (or failure) must be retrievable
//!   later from a handle.
//! - **Scoped resources**: a panel temporarily switches to a large or
//!   different font, and the previous font must be restored when the panel
//!   is done drawing, on every exit path, however deeply scopes nest.
//!
//! ## TaskPool - Offloading work to background threads
//!
//! [`TaskPool`](core::TaskPool) owns a fixed set of worker threads fed from
//! a single queue. Submission never blocks; results come back through a
//! [`TaskHandle`](core::TaskHandle) fulfilled exactly once.
//!
//! ```rust,ignore
//! use stagehand::config::TaskPoolConfig;
//! use stagehand::core::TaskPool;
//!
//! let pool = TaskPool::new(TaskPoolConfig::new().with_worker_count(4))?;
//!
//! // Future-style result delivery
//! let handle = pool.submit(|| expensive_scan());
//! let outcome = handle.wait()?;
//!
//! // Fire-and-forget (failures are logged, not observable)
//! pool.exec(|| touch_cache_file());
//!
//! // Block until every submitted task has fully completed
//! pool.wait();
//! ```
//!
//! Dropping the pool drains all pending and in-flight work before the
//! workers are stopped and joined; no task is ever abandoned.
//!
//! ## FontLibrary - Memoized fonts with push/pop scoping
//!
//! [`FontLibrary`](font::FontLibrary) lazily builds a font the first time a
//! `(family, size)` pair is referenced, caches it for the process lifetime,
//! and maintains a stack of "currently active" fonts with guaranteed
//! restoration via RAII guards:
//!
//! ```rust,ignore
//! use stagehand::font::{FontFamily, FontLibrary, DEFAULT_FONT_SIZE, LARGE_FONT_SIZE};
//!
//! let fonts = FontLibrary::new(catalog, backend, &config);
//! fonts.preload(FontFamily::DroidSansMono, DEFAULT_FONT_SIZE);
//!
//! {
//!     let _large = fonts.scoped_size(LARGE_FONT_SIZE);
//!     draw_heading();
//! } // previous font restored here, even if draw_heading panics
//! ```
//!
//! Font construction never hard-fails: a missing or corrupt face degrades to
//! the backend's built-in fallback, and a failed icon-overlay merge simply
//! disables icons. Both are logged at warning level.
//!
//! The generic layer underneath the font cache,
//! [`ScopedStack`](core::ScopedStack), works for any hashable key and any
//! [`ResourceLoader`](core::ResourceLoader) and is exported for reuse.
//!
//! For complete examples, see:
//! - `tests/task_pool_test.rs` - Full pool integration tests
//! - `tests/font_library_test.rs` - Font degradation and scoping tests

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Task pool, result handles, and the generic scoped resource stack.
pub mod core;
/// Configuration models for the pool and the font cache.
pub mod config;
/// Builders to construct components from configuration.
pub mod builders;
/// Font keys, asset catalog, render-binding trait, and the font library.
pub mod font;
/// Shared utilities.
pub mod util;

pub use crate::core::{
    AppResult, PoolError, ResourceLoader, ScopeGuard, ScopedStack, StackError, TaskError,
    TaskHandle, TaskPool,
};
pub use crate::font::{FontFamily, FontKey, FontLibrary, FontSize};
