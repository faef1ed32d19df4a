//! Font cache configuration.

use serde::{Deserialize, Serialize};

use crate::font::{FontFamily, DEFAULT_FONT_SIZE, DEFAULT_ICON_SCALE};

/// Configuration for a [`FontLibrary`](crate::font::FontLibrary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Family used by size-only pushes when nothing is on the stack.
    pub default_family: FontFamily,
    /// Default pixel size.
    pub default_size: f32,
    /// Icon overlay scale relative to the base size, in `(0, 1]`.
    pub icon_scale: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            default_family: FontFamily::DEFAULT,
            default_size: DEFAULT_FONT_SIZE.get(),
            icon_scale: DEFAULT_ICON_SCALE,
        }
    }
}

impl FontConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_size.is_nan() || self.default_size <= 0.0 {
            return Err("default_size must be greater than 0".into());
        }
        if self.icon_scale.is_nan() || self.icon_scale <= 0.0 || self.icon_scale > 1.0 {
            return Err("icon_scale must be in (0, 1]".into());
        }
        Ok(())
    }
}
