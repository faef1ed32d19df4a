//! The font library: typed facade over the generic scoped stack.

use crate::config::FontConfig;
use crate::core::{ScopeGuard, ScopedStack, StackError};

use super::backend::FontBackend;
use super::catalog::FontCatalog;
use super::loader::FontLoader;
use super::{FontFamily, FontKey, FontSize};

/// Guard returned by the scoped push helpers; pops on drop.
pub type FontScope<'a, B> = ScopeGuard<'a, FontKey, FontLoader<B>>;

/// Memoized font cache with push/pop scoping.
///
/// Fonts are built lazily on first reference, cached by `(family, size)`
/// for the process lifetime, and stacked: the top of the stack is the
/// effective font, and popping restores the previous one. The first font
/// ever loaded becomes the implicit default.
///
/// An explicit object, not a process-wide registry: create one per atlas
/// at startup and hand it to the panels that draw with it.
///
/// # Examples
///
/// ```rust,ignore
/// let fonts = FontLibrary::new(catalog, backend, &FontConfig::default());
/// fonts.preload(FontFamily::DroidSansMono, DEFAULT_FONT_SIZE);
///
/// {
///     let _heading = fonts.scoped_size(LARGE_FONT_SIZE);
///     // draw with the same family, 22px
/// } // 15px restored
/// ```
pub struct FontLibrary<B: FontBackend> {
    stack: ScopedStack<FontKey, FontLoader<B>>,
    default_family: FontFamily,
}

impl<B: FontBackend> FontLibrary<B> {
    /// A library drawing font data from `catalog` and building through
    /// `backend`, configured by `config`.
    pub fn new(catalog: FontCatalog, backend: B, config: &FontConfig) -> Self {
        Self {
            stack: ScopedStack::new(FontLoader::new(backend, catalog, config.icon_scale)),
            default_family: config.default_family,
        }
    }

    /// Ensure the font for `(family, size)` is built and cached.
    /// Idempotent. The first font ever loaded is seeded as the permanent
    /// baseline of the stack, so there is always a "current" font to fall
    /// back to.
    pub fn preload(&self, family: FontFamily, size: FontSize) {
        self.stack.preload(&FontKey::new(family, size));
    }

    /// Make `(family, size)` the effective font, building it first if
    /// needed. Balanced by [`pop`](Self::pop).
    pub fn push(&self, family: FontFamily, size: FontSize) {
        self.stack.push(FontKey::new(family, size));
    }

    /// Push the current family at a different size.
    ///
    /// Reuses the family of the stack top, or the configured default
    /// family if nothing has been loaded yet.
    pub fn push_size(&self, size: FontSize) {
        let default_family = self.default_family;
        self.stack.push_derived(|top| {
            let family = top.map_or(default_family, |key| key.family);
            FontKey::new(family, size)
        });
    }

    /// Restore the previously effective font.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::PopWithoutPush`] without a matching prior
    /// push.
    pub fn pop(&self) -> Result<(), StackError> {
        self.stack.pop()
    }

    /// The currently effective font key, if any font has been loaded.
    #[must_use]
    pub fn current(&self) -> Option<FontKey> {
        self.stack.current()
    }

    /// Clone the built font handle for `(family, size)` if it is cached.
    #[must_use]
    pub fn font(&self, family: FontFamily, size: FontSize) -> Option<B::Font> {
        self.stack.get(&FontKey::new(family, size))
    }

    /// Number of distinct fonts built so far.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.stack.loaded_count()
    }

    /// Push `(family, size)` for the lifetime of the returned guard.
    pub fn scoped(&self, family: FontFamily, size: FontSize) -> FontScope<'_, B> {
        self.stack.scoped(FontKey::new(family, size))
    }

    /// Push the current family at `size` for the lifetime of the returned
    /// guard.
    pub fn scoped_size(&self, size: FontSize) -> FontScope<'_, B> {
        let default_family = self.default_family;
        self.stack.scoped_derived(|top| {
            let family = top.map_or(default_family, |key| key.family);
            FontKey::new(family, size)
        })
    }
}
