//! Themes: ordered rule sets
//!
//! Rule order is precedence order. Index 0 is written first and so loses to
//! every later rule on overlapping spans.

use std::fmt;
use std::sync::Arc;

use super::builtin;
use super::cache::RegexCache;
use super::rules::StyleRule;
use super::style::{Attributes, Color, Font, FontFamily, FontResolver, FontWeight, SystemFonts};

/// Base point size for the default theme
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// An ordered rule set plus the base font and background
///
/// Themes are built once per session and not mutated afterwards; a style
/// change builds a new theme.
#[derive(Clone)]
pub struct Theme {
    rules: Vec<StyleRule>,
    font: Font,
    background: Color,
    fonts: Arc<dyn FontResolver>,
    cache: Arc<RegexCache>,
}

impl Theme {
    /// Create a theme from rules compiled against `cache`
    pub fn new(rules: Vec<StyleRule>, cache: Arc<RegexCache>) -> Self {
        let fonts: Arc<dyn FontResolver> = Arc::new(SystemFonts);
        let font = fonts.resolve(FontFamily::System, DEFAULT_FONT_SIZE, FontWeight::Regular);
        Self {
            rules,
            font,
            background: Color::Clear,
            fonts,
            cache,
        }
    }

    /// The built-in markdown theme with its own pattern cache
    pub fn markdown(base_size: f32) -> Self {
        Self::markdown_with_cache(base_size, Arc::new(RegexCache::new()))
    }

    /// The built-in markdown theme sharing an existing pattern cache
    pub fn markdown_with_cache(base_size: f32, cache: Arc<RegexCache>) -> Self {
        let rules = builtin::markdown_rules(base_size, &cache);
        Self::new(rules, cache).with_font_size(base_size)
    }

    /// Builder: set the host font resolver; re-resolves the base font
    pub fn with_font_resolver(mut self, fonts: Arc<dyn FontResolver>) -> Self {
        self.font = fonts.resolve(self.font.family, self.font.size, self.font.weight);
        self.fonts = fonts;
        self
    }

    /// Builder: set the base font size
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font = self.fonts.resolve(self.font.family, size, self.font.weight);
        self
    }

    /// Builder: set the background used to reset a window
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// A copy in which every rule uses the base font size
    ///
    /// Used for read-only previews where headings should not change the
    /// line height.
    pub fn with_uniform_size(&self) -> Self {
        let size = self.font.size;
        let mut theme = self.clone();
        theme.rules = self
            .rules
            .iter()
            .cloned()
            .map(|rule| rule.with_size(size))
            .collect();
        theme
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn fonts(&self) -> &dyn FontResolver {
        self.fonts.as_ref()
    }

    pub fn cache(&self) -> &Arc<RegexCache> {
        &self.cache
    }

    /// Attributes a window is reset to before rules are applied
    pub fn base_attributes(&self) -> Attributes {
        Attributes::plain(self.font.clone(), self.background)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::markdown(DEFAULT_FONT_SIZE)
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("rules", &self.rules.len())
            .field("font", &self.font)
            .field("background", &self.background)
            .finish()
    }
}
