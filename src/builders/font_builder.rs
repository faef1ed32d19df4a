//! Construct a font library from configuration.

use crate::config::HarnessConfig;
use crate::font::{FontBackend, FontCatalog, FontLibrary, FontSize};

/// Build a [`FontLibrary`] from a harness configuration, an asset catalog,
/// and the render binding.
///
/// The configured default font is preloaded, so it becomes the stack
/// baseline and [`FontLibrary::current`] reports it before any push.
///
/// # Errors
///
/// Returns the first validation failure of the configuration.
pub fn build_font_library<B: FontBackend>(
    cfg: &HarnessConfig,
    catalog: FontCatalog,
    backend: B,
) -> Result<FontLibrary<B>, String> {
    cfg.validate()?;
    let library = FontLibrary::new(catalog, backend, &cfg.fonts);
    library.preload(cfg.fonts.default_family, FontSize::px(cfg.fonts.default_size));
    Ok(library)
}
