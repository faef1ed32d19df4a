//! Render-binding trait for font construction and activation.
//!
//! The actual rasterizing/atlas machinery lives in the GUI layer outside
//! this crate. [`FontBackend`] is the narrow seam the font cache talks to:
//! build a face from embedded bytes, merge an icon overlay, install the
//! result into the active render frame, and switch the effective font on
//! push/pop. Backend calls are assumed to be confined to the presentation
//! thread.

use crate::core::AppResult;

/// Sizing and placement parameters for merging an icon overlay into a
/// base font.
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Pixel size the overlay glyphs are built at (base size scaled down
    /// so icons sit on the text baseline).
    pub size_px: f32,
    /// Minimum horizontal advance, set to the base size so icons align in
    /// monospace columns.
    pub min_advance: f32,
    /// Snap glyphs to the pixel grid.
    pub pixel_snap: bool,
}

/// Black-box binding between the font cache and the renderer.
///
/// All fallible methods return [`AppResult`] so implementations can wrap
/// whatever error type their renderer produces; the cache only logs these
/// failures and degrades, it never propagates them.
pub trait FontBackend {
    /// Handle to a built font, cheap to clone (typically an id or `Arc`).
    type Font: Clone;

    /// Build a font from embedded compressed-TTF bytes at `size_px`.
    ///
    /// # Errors
    ///
    /// Any renderer-specific failure; the cache substitutes
    /// [`build_fallback`](Self::build_fallback) and logs at warning level.
    fn build(&mut self, bytes: &[u8], size_px: f32) -> AppResult<Self::Font>;

    /// Build the renderer's built-in fallback face at `size_px`. Must not
    /// fail: this is the last resort.
    fn build_fallback(&mut self, size_px: f32) -> Self::Font;

    /// Merge overlay glyphs (icons) into `base`, returning the combined
    /// font.
    ///
    /// # Errors
    ///
    /// Any renderer-specific failure; the cache keeps `base` unmerged and
    /// logs that icons are disabled.
    fn merge(
        &mut self,
        base: &Self::Font,
        bytes: &[u8],
        config: &OverlayConfig,
    ) -> AppResult<Self::Font>;

    /// Install a newly built font into the active render frame. Invoked
    /// once after each construction; the cache does not inspect the
    /// effect.
    fn install(&mut self, font: &Self::Font);

    /// Make `font` the effective font (push in the renderer).
    fn activate(&mut self, font: &Self::Font);

    /// Restore the previously effective font (pop in the renderer).
    fn deactivate(&mut self);
}
