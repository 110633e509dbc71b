//! Markdown rule set

use crate::syntax::cache::{MatchOptions, RegexCache};
use crate::syntax::glyphs::{heading_marker, GlyphPolicy};
use crate::syntax::rules::{StyleRule, CATCH_ALL};
use crate::syntax::style::{
    Alignment, Baseline, Color, FontFamily, FontStyle, ParagraphSpacing,
};

/// Heading levels with their own rule
const HEADING_LEVELS: usize = 5;

fn list_spacing() -> Vec<ParagraphSpacing> {
    vec![
        ParagraphSpacing::HeadIndent(4.0),
        ParagraphSpacing::SpacingBefore(4.0),
        ParagraphSpacing::SpacingAfter(4.0),
    ]
}

/// Create the markdown rules, lowest precedence first
pub fn markdown_rules(base_size: f32, cache: &RegexCache) -> Vec<StyleRule> {
    let lines = MatchOptions::NONE.with_multi_line();

    let mut rules = vec![
        // Base: resets everything to body text
        StyleRule::new(CATCH_ALL, MatchOptions::NONE, cache).with_size(base_size),
        // Fenced code blocks
        StyleRule::new("```[^`]+```", MatchOptions::NONE.with_dot_matches_new_line(), cache)
            .with_font(FontFamily::Monospace)
            .with_size(base_size)
            .with_hidden(GlyphPolicy::LeadingAndTrailing(3, 3)),
        // Block quotes
        StyleRule::new("^>.*", lines, cache)
            .with_font(FontFamily::Quote)
            .with_size(base_size)
            .with_alignment(Alignment::Right)
            .with_hidden(GlyphPolicy::LeadingOnly(1)),
        // Bullet list markers
        StyleRule::new(r"^(\t*)[\-\*•]\s", lines, cache)
            .with_size(base_size)
            .with_spacing(list_spacing())
            .with_hidden(GlyphPolicy::LeadingOnly(1)),
        // Numbered list markers
        StyleRule::new(r"^(\t*)\d+[\.\)]\s", lines, cache)
            .with_size(base_size)
            .with_spacing(list_spacing())
            .with_hidden(GlyphPolicy::LeadingOnly(1)),
        // Comment lines
        StyleRule::new("^//.*$", lines, cache)
            .with_color(Color::Gray)
            .with_size(base_size),
        // Footnotes
        StyleRule::new(r"\[\^(.*?)\]", MatchOptions::NONE, cache)
            .with_size(base_size - 3.0)
            .with_baseline(Baseline::Raised)
            .with_hidden(GlyphPolicy::LeadingAndTrailing(2, 1)),
        // Inline code
        StyleRule::glyphs("`", cache)
            .with_font(FontFamily::Monospace)
            .with_size(base_size)
            .with_hidden(GlyphPolicy::LeadingAndTrailing(1, 1)),
        StyleRule::glyphs("==", cache)
            .with_size(base_size)
            .with_style(&[FontStyle::Underline])
            .with_hidden(GlyphPolicy::LeadingAndTrailing(2, 2)),
        StyleRule::glyphs("~~", cache)
            .with_size(base_size)
            .with_style(&[FontStyle::Strikethrough])
            .with_hidden(GlyphPolicy::LeadingAndTrailing(2, 2)),
        StyleRule::glyph_set(&["_", "*", "/"], cache)
            .with_size(base_size)
            .with_style(&[FontStyle::Italic])
            .with_hidden(GlyphPolicy::LeadingAndTrailing(1, 1)),
        StyleRule::glyph_set(&["__", "**", "//"], cache)
            .with_size(base_size)
            .with_style(&[FontStyle::Bold])
            .with_hidden(GlyphPolicy::LeadingAndTrailing(2, 2)),
        StyleRule::glyph_set(&["___", "***", "///"], cache)
            .with_size(base_size)
            .with_style(&[FontStyle::Bold, FontStyle::Italic])
            .with_hidden(GlyphPolicy::LeadingAndTrailing(3, 3)),
    ];

    for level in 1..=HEADING_LEVELS {
        rules.push(
            StyleRule::new(&format!(r"^#{{{level}}} \S.*$"), lines, cache)
                .with_size(base_size + 12.0 - 2.0 * level as f32)
                .with_style(&[FontStyle::Bold])
                .with_spacing(vec![ParagraphSpacing::LineSpacing(8.0)])
                .with_hidden(GlyphPolicy::custom(heading_marker)),
        );
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for<'a>(rules: &'a [StyleRule], pattern: &str) -> &'a StyleRule {
        rules.iter().find(|r| r.pattern() == pattern).unwrap()
    }

    #[test]
    fn test_all_rules_compile() {
        let cache = RegexCache::new();
        let rules = markdown_rules(12.0, &cache);
        assert_eq!(rules.len(), 13 + HEADING_LEVELS);
        for rule in &rules {
            assert!(!rule.is_inert(), "inert: {}", rule.pattern());
        }
    }

    #[test]
    fn test_heading_sizes() {
        let cache = RegexCache::new();
        let rules = markdown_rules(12.0, &cache);
        assert_eq!(rule_for(&rules, r"^#{1} \S.*$").size, 22.0);
        assert_eq!(rule_for(&rules, r"^#{5} \S.*$").size, 14.0);
    }

    #[test]
    fn test_heading_levels_are_exclusive() {
        let cache = RegexCache::new();
        let rules = markdown_rules(12.0, &cache);
        let h1 = rule_for(&rules, r"^#{1} \S.*$");
        let h2 = rule_for(&rules, r"^#{2} \S.*$");
        let text = "# One\n## Two";
        assert_eq!(h1.matches_in(text, 0..text.len()).len(), 1);
        assert_eq!(h2.matches_in(text, 0..text.len())[0].captured, "## Two");
    }

    #[test]
    fn test_fenced_code_spans_lines() {
        let cache = RegexCache::new();
        let rules = markdown_rules(12.0, &cache);
        let fence = &rules[1];
        let text = "```\nlet x = 1;\n```";
        let matches = fence.matches_in(text, 0..text.len());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].range, 0..text.len());
        assert_eq!(fence.hidden_ranges(text), vec![0..3, 15..18]);
    }

    #[test]
    fn test_bullet_marker() {
        let cache = RegexCache::new();
        let rules = markdown_rules(12.0, &cache);
        let bullet = &rules[3];
        let text = "- one\n\t• two\nthree";
        let captured: Vec<_> = bullet
            .matches_in(text, 0..text.len())
            .into_iter()
            .map(|m| m.captured)
            .collect();
        assert_eq!(captured, vec!["- ", "\t• "]);
    }
}
