//! Style rules
//!
//! A `StyleRule` pairs a pattern with the visual directives written onto
//! each of its matches and a policy for which marker glyphs get muted.

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use super::cache::{MatchOptions, RegexCache};
use super::glyphs::GlyphPolicy;
use super::style::{
    Alignment, AttributePatch, Baseline, Color, Font, FontFamily, FontResolver, FontStyle,
    FontWeight, ParagraphSpacing, ParagraphStyle,
};

/// Pattern of the catch-all base rule
pub const CATCH_ALL: &str = ".*";

/// Default point size for rules built without an explicit size
pub const DEFAULT_SIZE: f32 = 12.0;

/// A single match of a rule against the current text snapshot
///
/// Offsets are absolute byte offsets and only valid for the snapshot
/// they were produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    pub range: Range<usize>,
    pub captured: &'t str,
}

/// A pattern plus the attributes applied to each of its matches
#[derive(Debug, Clone)]
pub struct StyleRule {
    pattern: String,
    options: MatchOptions,
    /// Shared with the cache; `None` if the pattern did not compile
    matcher: Option<Arc<Regex>>,
    pub color: Color,
    pub background: Color,
    pub font: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub baseline: Baseline,
    pub spacing: Vec<ParagraphSpacing>,
    pub alignment: Alignment,
    pub hidden: GlyphPolicy,
}

impl StyleRule {
    /// Create a rule from a raw pattern
    ///
    /// An uncompilable pattern produces an inert rule rather than an error.
    pub fn new(pattern: &str, options: MatchOptions, cache: &RegexCache) -> Self {
        Self {
            pattern: pattern.to_string(),
            options,
            matcher: cache.get_or_compile(pattern, options),
            color: Color::Default,
            background: Color::Clear,
            font: FontFamily::System,
            weight: FontWeight::Regular,
            size: DEFAULT_SIZE,
            italic: false,
            underline: false,
            strikethrough: false,
            baseline: Baseline::Base,
            spacing: Vec::new(),
            alignment: Alignment::Left,
            hidden: GlyphPolicy::None,
        }
    }

    /// Rule for text wrapped in a delimiter, e.g. `==marked==`
    pub fn glyphs(glyph: &str, cache: &RegexCache) -> Self {
        let glyph = regex::escape(glyph);
        Self::new(&format!("{glyph}.*?{glyph}"), MatchOptions::NONE, cache)
    }

    /// Rule for text wrapped in any one of several delimiters
    ///
    /// The opening and closing delimiter must be the same alternative.
    pub fn glyph_set(glyphs: &[&str], cache: &RegexCache) -> Self {
        let pattern = glyphs
            .iter()
            .map(|glyph| {
                let glyph = regex::escape(glyph);
                format!("{glyph}(.+?){glyph}")
            })
            .collect::<Vec<_>>()
            .join("|");
        Self::new(&pattern, MatchOptions::NONE, cache)
    }

    /// Builder: set foreground color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: set background color
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Builder: set font family
    pub fn with_font(mut self, font: FontFamily) -> Self {
        self.font = font;
        self
    }

    /// Builder: set point size
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Builder: set weight explicitly
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Builder: set font traits; bold sets the weight
    pub fn with_style(mut self, styles: &[FontStyle]) -> Self {
        self.weight = if styles.contains(&FontStyle::Bold) {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        };
        self.italic = styles.contains(&FontStyle::Italic);
        self.underline = styles.contains(&FontStyle::Underline);
        self.strikethrough = styles.contains(&FontStyle::Strikethrough);
        self
    }

    /// Builder: set horizontal alignment
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set paragraph directives
    pub fn with_spacing(mut self, spacing: Vec<ParagraphSpacing>) -> Self {
        self.spacing = spacing;
        self
    }

    /// Builder: set baseline shift
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Builder: set hidden glyph policy
    pub fn with_hidden(mut self, hidden: GlyphPolicy) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Compiled matcher, if the pattern compiled
    pub fn matcher(&self) -> Option<&Arc<Regex>> {
        self.matcher.as_ref()
    }

    /// Check if this rule can never match
    pub fn is_inert(&self) -> bool {
        self.matcher.is_none()
    }

    /// Check if this is the catch-all base rule
    pub fn is_catch_all(&self) -> bool {
        self.pattern == CATCH_ALL
    }

    /// Non-empty matches within `window` of `text`
    ///
    /// Only the window's text is searched, so anchors see the window edges
    /// as text edges.
    pub fn matches_in<'t>(&self, text: &'t str, window: Range<usize>) -> Vec<RuleMatch<'t>> {
        let Some(regex) = &self.matcher else {
            return Vec::new();
        };
        let base = window.start;
        regex
            .find_iter(&text[window])
            .filter(|m| !m.is_empty())
            .map(|m| RuleMatch {
                range: base + m.start()..base + m.end(),
                captured: &text[base + m.start()..base + m.end()],
            })
            .collect()
    }

    /// Resolve the font this rule writes
    pub fn resolve_font(&self, fonts: &dyn FontResolver) -> Font {
        let mut font = fonts.resolve(self.font, self.size, self.weight);
        if self.italic {
            font = font.with_italic();
        }
        if self.weight == FontWeight::Bold {
            font = font.with_bold();
        }
        font
    }

    /// The attribute write for each match of this rule
    pub fn patch(&self, fonts: &dyn FontResolver) -> AttributePatch {
        AttributePatch {
            font: Some(self.resolve_font(fonts)),
            foreground: Some(self.color),
            background: Some(self.background),
            underline: self.underline.then_some(true),
            strikethrough: self.strikethrough.then_some(true),
            baseline_offset: Some(self.baseline.offset()),
            paragraph: Some(ParagraphStyle::from_directives(&self.spacing, self.alignment)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::SystemFonts;

    #[test]
    fn test_glyph_rule_escapes_delimiter() {
        let cache = RegexCache::new();
        let rule = StyleRule::glyphs("==", &cache);
        assert!(!rule.is_inert());
        let matches = rule.matches_in("a ==b== c", 0..9);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].range, 2..7);

        let star = StyleRule::glyphs("*", &cache);
        assert!(!star.is_inert());
        assert_eq!(star.matches_in("*x*", 0..3)[0].captured, "*x*");
    }

    #[test]
    fn test_glyph_set_requires_same_delimiter() {
        let cache = RegexCache::new();
        let rule = StyleRule::glyph_set(&["_", "*", "/"], &cache);
        assert!(rule.matches_in("*a_", 0..3).is_empty());

        let matches = rule.matches_in("_a_ and *b*", 0..11);
        let ranges: Vec<_> = matches.iter().map(|m| m.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 8..11]);
    }

    #[test]
    fn test_matches_are_windowed_and_absolute() {
        let cache = RegexCache::new();
        let rule = StyleRule::new(r"^\w+", MatchOptions::NONE.with_multi_line(), &cache);
        let text = "one\ntwo\nthree";
        let matches = rule.matches_in(text, 4..13);
        let captured: Vec<_> = matches.iter().map(|m| m.captured).collect();
        assert_eq!(captured, vec!["two", "three"]);
        assert_eq!(matches[0].range, 4..7);
    }

    #[test]
    fn test_inert_rule() {
        let cache = RegexCache::new();
        let rule = StyleRule::new("[unclosed", MatchOptions::NONE, &cache);
        assert!(rule.is_inert());
        assert!(rule.matches_in("[unclosed", 0..9).is_empty());
    }

    #[test]
    fn test_catch_all() {
        let cache = RegexCache::new();
        assert!(StyleRule::new(".*", MatchOptions::NONE, &cache).is_catch_all());
        assert!(!StyleRule::new(".+", MatchOptions::NONE, &cache).is_catch_all());
    }

    #[test]
    fn test_patch_contents() {
        let cache = RegexCache::new();
        let rule = StyleRule::glyphs("~~", &cache)
            .with_style(&[FontStyle::Bold, FontStyle::Strikethrough])
            .with_baseline(Baseline::Lowered)
            .with_size(16.0);
        let patch = rule.patch(&SystemFonts);

        let font = patch.font.unwrap();
        assert!(font.bold);
        assert!(!font.italic);
        assert_eq!(font.size, 16.0);
        assert_eq!(patch.strikethrough, Some(true));
        assert_eq!(patch.underline, None);
        assert_eq!(patch.baseline_offset, Some(-3.0));
        assert_eq!(patch.foreground, Some(Color::Default));
    }
}
