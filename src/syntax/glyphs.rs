//! Hidden glyph computation
//!
//! Marker glyphs (the `**` around bold text, the `# ` before a heading)
//! stay in the text but are drawn in a muted color. Each rule's policy
//! decides which sub-ranges of its matches are markers.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::rules::{RuleMatch, StyleRule};

/// Custom marker function: `(match, full text) -> ranges to mute`
pub type GlyphFn = Arc<dyn Fn(&RuleMatch<'_>, &str) -> Vec<Range<usize>> + Send + Sync>;

/// Which parts of a match are marker glyphs
///
/// Counts are in characters, not bytes.
#[derive(Clone, Default)]
pub enum GlyphPolicy {
    #[default]
    None,
    /// Mute the first `n` characters if the match has at least `2n`
    LeadingOnly(usize),
    /// Mute the first `a` and last `b` characters if the match has at least `2a`
    LeadingAndTrailing(usize, usize),
    Custom(GlyphFn),
}

impl GlyphPolicy {
    /// Wrap a function as a custom policy
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&RuleMatch<'_>, &str) -> Vec<Range<usize>> + Send + Sync + 'static,
    {
        GlyphPolicy::Custom(Arc::new(f))
    }

    /// Marker ranges for a single match
    pub fn ranges_for(&self, m: &RuleMatch<'_>, text: &str) -> Vec<Range<usize>> {
        let chars = m.captured.chars().count();
        let mut ranges = Vec::new();

        match self {
            GlyphPolicy::None => {}
            GlyphPolicy::LeadingOnly(n) => {
                if chars >= 2 * n {
                    ranges.push(m.range.start..m.range.start + leading_bytes(m.captured, *n));
                }
            }
            GlyphPolicy::LeadingAndTrailing(a, b) => {
                if chars >= 2 * a {
                    ranges.push(m.range.start..m.range.start + leading_bytes(m.captured, *a));
                    ranges.push(m.range.end - trailing_bytes(m.captured, *b)..m.range.end);
                }
            }
            GlyphPolicy::Custom(f) => {
                ranges = f(m, text)
                    .into_iter()
                    .filter_map(|r| sanitize(r, text))
                    .collect();
            }
        }

        ranges.retain(|r| !r.is_empty());
        ranges
    }
}

impl fmt::Debug for GlyphPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphPolicy::None => write!(f, "None"),
            GlyphPolicy::LeadingOnly(n) => write!(f, "LeadingOnly({n})"),
            GlyphPolicy::LeadingAndTrailing(a, b) => write!(f, "LeadingAndTrailing({a}, {b})"),
            GlyphPolicy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Byte length of the first `n` characters
fn leading_bytes(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Byte length of the last `n` characters
fn trailing_bytes(s: &str, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    s.char_indices()
        .rev()
        .nth(n - 1)
        .map_or(s.len(), |(i, _)| s.len() - i)
}

/// Clamp a custom range to the text; drop it if it splits a character
fn sanitize(range: Range<usize>, text: &str) -> Option<Range<usize>> {
    let start = range.start.min(text.len());
    let end = range.end.min(text.len());
    if start >= end || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return None;
    }
    Some(start..end)
}

/// Heading marker: the run of `#` and spaces that opens the match
pub fn heading_marker(m: &RuleMatch<'_>, _text: &str) -> Vec<Range<usize>> {
    let prefix: usize = m
        .captured
        .chars()
        .take_while(|&c| c == '#' || c == ' ')
        .map(char::len_utf8)
        .sum();
    vec![m.range.start..m.range.start + prefix]
}

impl StyleRule {
    /// Marker ranges for every match of this rule over the whole text
    ///
    /// This rescans the full text rather than reusing the windowed match
    /// set, so a match straddling the window edge is still muted correctly.
    pub fn hidden_ranges(&self, text: &str) -> Vec<Range<usize>> {
        if matches!(self.hidden, GlyphPolicy::None) {
            return Vec::new();
        }
        self.matches_in(text, 0..text.len())
            .iter()
            .flat_map(|m| self.hidden.ranges_for(m, text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::cache::{MatchOptions, RegexCache};

    fn rule(pattern: &str, hidden: GlyphPolicy) -> StyleRule {
        StyleRule::new(pattern, MatchOptions::NONE.with_multi_line(), &RegexCache::new())
            .with_hidden(hidden)
    }

    #[test]
    fn test_none_policy() {
        let rule = rule(r"\*\w+\*", GlyphPolicy::None);
        assert!(rule.hidden_ranges("*word*").is_empty());
    }

    #[test]
    fn test_leading_only() {
        let rule = rule(r"^> .*", GlyphPolicy::LeadingOnly(1));
        assert_eq!(rule.hidden_ranges("> quoted\nplain\n> again"), vec![0..1, 15..16]);
    }

    #[test]
    fn test_leading_only_needs_twice_the_length() {
        let rule = rule(r"ab", GlyphPolicy::LeadingOnly(2));
        assert!(rule.hidden_ranges("ab").is_empty());
    }

    #[test]
    fn test_leading_and_trailing() {
        let rule = rule(r"\[\^.*?\]", GlyphPolicy::LeadingAndTrailing(2, 1));
        assert_eq!(rule.hidden_ranges("see [^12] here"), vec![4..6, 8..9]);
    }

    #[test]
    fn test_leading_and_trailing_bounds() {
        let rule = rule(r"=+", GlyphPolicy::LeadingAndTrailing(2, 5));
        let text = "x ==== y";
        let ranges = rule.hidden_ranges(text);
        // match is 2..6; trailing count exceeds the match and is clamped to it
        assert_eq!(ranges, vec![2..4, 2..6]);
        for r in &ranges {
            assert!(r.start >= 2 && r.end <= 6);
        }

        let short = rule.hidden_ranges("x === y");
        assert!(short.is_empty());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let rule = rule(r"^•\s.*", GlyphPolicy::LeadingOnly(1));
        let text = "• item";
        assert_eq!(rule.hidden_ranges(text), vec![0..'•'.len_utf8()]);
    }

    #[test]
    fn test_heading_marker() {
        let rule = rule(r"^#{2} \S.*$", GlyphPolicy::custom(heading_marker));
        let text = "intro\n## Section\n";
        assert_eq!(rule.hidden_ranges(text), vec![6..9]);
    }

    #[test]
    fn test_custom_ranges_are_sanitized() {
        let rule = rule(
            r"x",
            GlyphPolicy::custom(|m, _| vec![m.range.clone(), 50..60, 3..3]),
        );
        assert_eq!(rule.hidden_ranges("axb"), vec![1..2]);

        let empty = rule_with_empty_custom();
        assert!(empty.hidden_ranges("x").is_empty());
    }

    fn rule_with_empty_custom() -> StyleRule {
        rule(r"x", GlyphPolicy::custom(|_, _| Vec::new()))
    }

    #[test]
    fn test_deterministic() {
        let rule = rule(r"`[^`]+`", GlyphPolicy::LeadingAndTrailing(1, 1));
        let text = "`a` and `b`";
        assert_eq!(rule.hidden_ranges(text), rule.hidden_ranges(text));
    }
}
