//! Configuration models for the pool and the font cache.

pub mod fonts;
pub mod harness;
pub mod pool;

pub use fonts::FontConfig;
pub use harness::HarnessConfig;
pub use pool::TaskPoolConfig;
