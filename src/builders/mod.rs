//! Builders to construct components from a validated configuration.

mod font_builder;
mod pool_builder;

pub use font_builder::build_font_library;
pub use pool_builder::build_task_pool;
