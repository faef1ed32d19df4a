//! Build-time font asset table.
//!
//! The harness embeds its font files at build time; this crate only ever
//! sees opaque `(bytes)` blobs per family. The catalog is an explicit,
//! injectable table rather than a compiled-in switch, so applications
//! decide which blobs they ship and tests can supply tiny stand-ins.

use std::collections::HashMap;

use super::FontFamily;

/// An embedded font blob (compressed TTF data, opaque to this crate).
#[derive(Debug, Clone, Copy)]
pub struct FontSource {
    /// Raw embedded bytes, alive for the whole process.
    pub bytes: &'static [u8],
}

impl FontSource {
    /// A source from embedded bytes.
    #[must_use]
    pub const fn new(bytes: &'static [u8]) -> Self {
        Self { bytes }
    }
}

/// Table mapping each shipped family to its embedded data, plus an
/// optional icon-glyph overlay blob merged into every built font.
#[derive(Debug, Default)]
pub struct FontCatalog {
    sources: HashMap<FontFamily, FontSource>,
    icon_overlay: Option<FontSource>,
}

impl FontCatalog {
    /// An empty catalog. Families without data degrade to the backend
    /// fallback when loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the embedded data for `family`, replacing any previous
    /// registration.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily, bytes: &'static [u8]) -> Self {
        self.sources.insert(family, FontSource::new(bytes));
        self
    }

    /// Register the icon-glyph overlay blob (e.g. an icon font) merged
    /// into every built font.
    #[must_use]
    pub fn with_icon_overlay(mut self, bytes: &'static [u8]) -> Self {
        self.icon_overlay = Some(FontSource::new(bytes));
        self
    }

    /// The embedded data for `family`, if registered.
    #[must_use]
    pub fn source(&self, family: FontFamily) -> Option<FontSource> {
        self.sources.get(&family).copied()
    }

    /// The icon overlay blob, if registered.
    #[must_use]
    pub const fn icon_overlay(&self) -> Option<FontSource> {
        self.icon_overlay
    }
}
