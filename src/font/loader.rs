//! Cache-miss construction of fonts: primary build, fallback, overlay.

use tracing::{debug, warn};

use crate::core::ResourceLoader;

use super::backend::{FontBackend, OverlayConfig};
use super::catalog::FontCatalog;
use super::FontKey;

/// [`ResourceLoader`] implementation for fonts.
///
/// On a cache miss the loader runs the degradation chain:
///
/// 1. build the primary face from the catalog bytes at the requested size;
///    if the family has no data or the build fails, substitute the
///    backend's built-in fallback and log at warning level;
/// 2. merge the icon overlay (if the catalog carries one) at
///    `size * icon_scale`; if the merge fails, keep the unmerged base and
///    log that icons are disabled;
/// 3. install the result into the active render frame.
///
/// Nothing in this chain is surfaced as an error to the caller.
pub struct FontLoader<B: FontBackend> {
    backend: B,
    catalog: FontCatalog,
    icon_scale: f32,
}

impl<B: FontBackend> FontLoader<B> {
    /// A loader over `backend` drawing data from `catalog`.
    pub const fn new(backend: B, catalog: FontCatalog, icon_scale: f32) -> Self {
        Self {
            backend,
            catalog,
            icon_scale,
        }
    }
}

impl<B: FontBackend> ResourceLoader<FontKey> for FontLoader<B> {
    type Resource = B::Font;

    fn load(&mut self, key: &FontKey) -> B::Font {
        let size_px = key.size.get();

        let base = match self.catalog.source(key.family) {
            Some(source) => match self.backend.build(source.bytes, size_px) {
                Ok(font) => {
                    debug!(family = ?key.family, size_px, "loaded font");
                    font
                }
                Err(e) => {
                    warn!(
                        family = ?key.family,
                        size_px,
                        error = %e,
                        "failed to build font: using fallback face"
                    );
                    self.backend.build_fallback(size_px)
                }
            },
            None => {
                warn!(
                    family = ?key.family,
                    "no embedded data for family: using fallback face"
                );
                self.backend.build_fallback(size_px)
            }
        };

        let font = match self.catalog.icon_overlay() {
            Some(overlay) => {
                let config = OverlayConfig {
                    size_px: size_px * self.icon_scale,
                    min_advance: size_px,
                    pixel_snap: true,
                };
                match self.backend.merge(&base, overlay.bytes, &config) {
                    Ok(merged) => {
                        debug!(size_px = config.size_px, "merged icon overlay");
                        merged
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to merge icon overlay: icons disabled");
                        base
                    }
                }
            }
            None => base,
        };

        self.backend.install(&font);
        font
    }

    fn activate(&mut self, resource: &B::Font) {
        self.backend.activate(resource);
    }

    fn deactivate(&mut self) {
        self.backend.deactivate();
    }
}
