//! Font identity types and the scope-stacked font cache.
//!
//! A font is identified by a [`FontKey`]: an embedded [`FontFamily`] plus a
//! pixel [`FontSize`]. The [`FontLibrary`] memoizes one built font per key
//! and exposes push/pop scoping over the generic
//! [`ScopedStack`](crate::core::ScopedStack).

pub mod backend;
pub mod catalog;
pub mod library;
pub mod loader;

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

pub use backend::{FontBackend, OverlayConfig};
pub use catalog::{FontCatalog, FontSource};
pub use library::FontLibrary;
pub use loader::FontLoader;

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: FontSize = FontSize::px(15.0);
/// Larger size used for headings and emphasized panels.
pub const LARGE_FONT_SIZE: FontSize = FontSize::px(22.0);
/// Scale applied to the icon overlay relative to the base size.
pub const DEFAULT_ICON_SCALE: f32 = 0.9;

/// The embedded monospace font families shipped with the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Droid Sans Mono (the default family).
    DroidSansMono,
    /// Intel One Mono.
    IntelOneMono,
    /// Noto Sans Mono.
    NotoSansMono,
    /// Roboto Mono.
    RobotoMono,
    /// Cousine.
    Cousine,
    /// Source Code Pro.
    SourceCodePro,
}

impl FontFamily {
    /// The family used when none is specified.
    pub const DEFAULT: Self = Self::DroidSansMono;
}

impl Default for FontFamily {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Font size in pixels.
///
/// Sizes participate in cache keys, so unlike a bare `f32` this type is
/// `Eq + Hash`: comparison and hashing use the IEEE-754 bit pattern.
/// Identical literals produce identical bits, which is all a cache key
/// needs; `NaN` sizes are nonsensical and compare equal only to themselves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSize(f32);

impl FontSize {
    /// A size from a pixel value.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self(value)
    }

    /// The pixel value.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl PartialEq for FontSize {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FontSize {}

impl Hash for FontSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}

/// Composite cache key for a built font: family plus pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontKey {
    /// Embedded family providing the raw face data.
    pub family: FontFamily,
    /// Pixel size the face is built at.
    pub size: FontSize,
}

impl FontKey {
    /// A key from a family and size.
    #[must_use]
    pub const fn new(family: FontFamily, size: FontSize) -> Self {
        Self { family, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn font_size_is_a_usable_hash_key() {
        let mut map = HashMap::new();
        map.insert(FontSize::px(15.0), "default");
        map.insert(FontSize::px(22.0), "large");
        assert_eq!(map.get(&FontSize::px(15.0)), Some(&"default"));
        assert_eq!(map.get(&FontSize::px(22.0)), Some(&"large"));
        assert_eq!(map.get(&FontSize::px(13.0)), None);
    }

    #[test]
    fn font_key_equality_covers_both_components() {
        let a = FontKey::new(FontFamily::Cousine, FontSize::px(15.0));
        assert_eq!(a, FontKey::new(FontFamily::Cousine, FontSize::px(15.0)));
        assert_ne!(a, FontKey::new(FontFamily::Cousine, FontSize::px(16.0)));
        assert_ne!(a, FontKey::new(FontFamily::RobotoMono, FontSize::px(15.0)));
    }

    #[test]
    fn family_serde_uses_snake_case() {
        let json = serde_json::to_string(&FontFamily::SourceCodePro).unwrap();
        assert_eq!(json, "\"source_code_pro\"");
        let back: FontFamily = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FontFamily::SourceCodePro);
    }
}
