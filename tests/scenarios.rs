//! End-to-end styling scenarios

use std::sync::Arc;

use restyle::syntax::{
    expand, style, Color, Dirty, FontWeight, MatchOptions, RegexCache, StyleRule, Styler, Theme,
    TriggerSet,
};
use restyle::Document;

#[test]
fn test_italic_glyphs_are_muted() {
    let text = "*hello*";
    let theme = Theme::default();
    let output = style(text, 0..text.len(), &theme, &TriggerSet::from_chars("#@&!["));

    for offset in 1..=5 {
        let attrs = output.window.attributes_at(offset).unwrap();
        assert!(attrs.font.italic, "offset {offset} not italic");
        assert_eq!(attrs.foreground, Color::Default);
    }
    for offset in [0, 6] {
        assert_eq!(output.window.attributes_at(offset).unwrap().foreground, Color::Muted);
    }
    assert!(output.labels.is_empty());
}

#[test]
fn test_heading_is_bold_larger_and_prefix_hidden() {
    let text = "# Title\n\nBody";
    let theme = Theme::default();
    let output = style(text, 0..text.len(), &theme, &TriggerSet::default());
    let window = &output.window;
    let base = theme.font().size;

    for offset in 0..7 {
        let attrs = window.attributes_at(offset).unwrap();
        assert_eq!(attrs.font.weight, FontWeight::Bold);
        assert!(attrs.font.size > base);
        assert_eq!(attrs.paragraph.line_spacing, 8.0);
    }
    assert_eq!(window.attributes_at(0).unwrap().foreground, Color::Muted);
    assert_eq!(window.attributes_at(1).unwrap().foreground, Color::Muted);
    assert_eq!(window.attributes_at(2).unwrap().foreground, Color::Default);

    let body = window.attributes_at(10).unwrap();
    assert_eq!(body.font.weight, FontWeight::Regular);
    assert_eq!(body.font.size, base);

    let h1 = theme
        .rules()
        .iter()
        .find(|rule| rule.pattern() == r"^#{1} \S.*$")
        .unwrap();
    assert_eq!(h1.hidden_ranges(text), vec![0..2]);
}

#[test]
fn test_edit_window_for_five_paragraphs() {
    // p0 0..6, p1 6..12, p2 12..18, p3 18..24, p4 24..29
    let text = "alpha\nbravo\ncharl\ndelta\necho!";
    assert_eq!(expand(15..15, text, 2), 0..29);
    assert_eq!(expand(15..15, text, 1), 6..24);
    assert_eq!(expand(15..15, text, 0), 12..18);
    assert_eq!(expand(2..3, text, 2), 0..18);
    assert_eq!(expand(27..28, text, 2), 12..29);

    let styler = Styler::default();
    assert_eq!(styler.window_for(text, &Dirty::Range(15..16)), 0..29);
}

#[test]
fn test_later_rules_take_precedence() {
    let cache = Arc::new(RegexCache::new());
    let rules = vec![
        StyleRule::new("overlap", MatchOptions::NONE, &cache).with_color(Color::Red),
        StyleRule::new("lap", MatchOptions::NONE, &cache).with_color(Color::Blue),
    ];
    let theme = Theme::new(rules, cache);
    let output = style("overlap", 0..7, &theme, &TriggerSet::empty());
    assert_eq!(output.window.attributes_at(2).unwrap().foreground, Color::Red);
    assert_eq!(output.window.attributes_at(4).unwrap().foreground, Color::Blue);
}

#[test]
fn test_styling_is_idempotent() {
    let text = "# Notes\n\n- item with @mention\n- [^1] footnote\n\n```\nfn main() {}\n```\n";
    let theme = Theme::default();
    let triggers = TriggerSet::default();
    let window = expand(0..text.len(), text, 2);

    let first = style(text, window.clone(), &theme, &triggers);
    let second = style(text, window, &theme, &triggers);
    assert_eq!(first, second);
    assert!(!first.labels.is_empty());
}

#[test]
fn test_trigger_labels() {
    let cache = Arc::new(RegexCache::new());
    let line = StyleRule::new("^.*$", MatchOptions::NONE.with_multi_line(), &cache);
    let theme = Theme::new(vec![line], cache);
    let triggers = TriggerSet::from_chars("#@");

    let text = "#tag more text";
    let output = style(text, 0..text.len(), &theme, &triggers);
    let labels: Vec<_> = output.labels.iter().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].label, "#tag more text");
    assert_eq!(labels[0].offset, 0);
    assert_eq!(labels[0].trigger, "#");

    let output = style("# ", 0..2, &theme, &triggers);
    assert!(output.labels.is_empty());
}

#[test]
fn test_regex_cache_identity() {
    let cache = RegexCache::new();
    let a = cache.get_or_compile("x+", MatchOptions::NONE).unwrap();
    let b = cache.get_or_compile("x+", MatchOptions::NONE).unwrap();
    let c = cache
        .get_or_compile("x+", MatchOptions::NONE.with_case_insensitive())
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_malformed_custom_rule_leaves_text_intact() {
    let cache = Arc::new(RegexCache::new());
    let rules = vec![
        StyleRule::new("(((", MatchOptions::NONE, &cache).with_color(Color::Red),
        StyleRule::new("world", MatchOptions::NONE, &cache).with_color(Color::Green),
    ];
    let styler = Styler::new(Theme::new(rules, cache));
    let mut doc = Document::new("hello world", styler);
    doc.replace_range(5..5, ",");

    assert_eq!(doc.text(), "hello, world");
    assert_eq!(doc.attributes_at(0).unwrap().foreground, Color::Default);
    assert_eq!(doc.attributes_at(8).unwrap().foreground, Color::Green);
}
