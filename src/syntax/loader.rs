//! Rule sets from TOML
//!
//! A theme file lists rules as `[[rule]]` tables, lowest precedence first:
//!
//! ```toml
//! [[rule]]
//! pattern = "^>.*"
//! options = ["multi-line"]
//! font = "quote"
//! alignment = "right"
//! hidden = { leading = 1 }
//!
//! [[rule]]
//! glyphs = ["**", "__"]
//! style = ["bold"]
//! hidden = { leading = 2, trailing = 2 }
//! ```

use toml::{Table, Value};

use crate::error::{Result, StyleError};

use super::cache::{MatchOptions, RegexCache};
use super::glyphs::{heading_marker, GlyphPolicy};
use super::rules::StyleRule;
use super::style::{Alignment, Baseline, Color, FontFamily, FontStyle, ParagraphSpacing};

/// Parse every `[[rule]]` table
///
/// Returns `None` if the document has no rules, so the caller keeps its
/// built-in set. Malformed values are errors; a pattern that does not
/// compile only makes that rule inert.
pub fn load_rules(doc: &Table, base_size: f32, cache: &RegexCache) -> Result<Option<Vec<StyleRule>>> {
    let Some(entries) = doc.get("rule") else {
        return Ok(None);
    };
    let entries = entries
        .as_array()
        .ok_or_else(|| StyleError::invalid("rule", "expected an array of tables"))?;

    let mut rules = Vec::with_capacity(entries.len());
    for entry in entries {
        let table = entry
            .as_table()
            .ok_or_else(|| StyleError::invalid("rule", entry))?;
        rules.push(parse_rule(table, base_size, cache)?);
    }
    Ok(Some(rules))
}

fn parse_rule(table: &Table, base_size: f32, cache: &RegexCache) -> Result<StyleRule> {
    let mut rule = match (table.get("pattern"), table.get("glyphs")) {
        (Some(pattern), None) => {
            let pattern = string(pattern, "pattern")?;
            let mut options = MatchOptions::NONE;
            for name in strings(table.get("options"), "options")? {
                if !options.set_by_name(name) {
                    return Err(StyleError::invalid("options", name));
                }
            }
            StyleRule::new(pattern, options, cache)
        }
        (None, Some(Value::String(glyph))) => StyleRule::glyphs(glyph, cache),
        (None, Some(glyphs)) => {
            let glyphs = strings(Some(glyphs), "glyphs")?;
            StyleRule::glyph_set(&glyphs, cache)
        }
        _ => {
            return Err(StyleError::Message(
                "rule needs exactly one of `pattern` or `glyphs`".to_string(),
            ))
        }
    };

    rule = rule.with_size(match table.get("size") {
        Some(size) => number(size, "size")?,
        None => base_size,
    });

    if let Some(value) = table.get("color") {
        rule = rule.with_color(named(value, "color", Color::from_name)?);
    }
    if let Some(value) = table.get("background") {
        rule = rule.with_background(named(value, "background", Color::from_name)?);
    }
    if let Some(value) = table.get("font") {
        rule = rule.with_font(named(value, "font", FontFamily::from_name)?);
    }
    if let Some(value) = table.get("alignment") {
        rule = rule.with_alignment(named(value, "alignment", Alignment::from_name)?);
    }
    if let Some(value) = table.get("baseline") {
        rule = rule.with_baseline(named(value, "baseline", Baseline::from_name)?);
    }
    if table.contains_key("style") {
        let styles = strings(table.get("style"), "style")?
            .into_iter()
            .map(|name| FontStyle::from_name(name).ok_or_else(|| StyleError::invalid("style", name)))
            .collect::<Result<Vec<_>>>()?;
        rule = rule.with_style(&styles);
    }
    if let Some(value) = table.get("spacing") {
        rule = rule.with_spacing(parse_spacing(value)?);
    }
    if let Some(value) = table.get("hidden") {
        rule = rule.with_hidden(parse_hidden(value)?);
    }

    Ok(rule)
}

fn parse_spacing(value: &Value) -> Result<Vec<ParagraphSpacing>> {
    let table = value
        .as_table()
        .ok_or_else(|| StyleError::invalid("spacing", value))?;

    let mut spacing = Vec::new();
    for (key, value) in table {
        let amount = number(value, key)?;
        spacing.push(match key.as_str() {
            "line" => ParagraphSpacing::LineSpacing(amount),
            "before" => ParagraphSpacing::SpacingBefore(amount),
            "after" => ParagraphSpacing::SpacingAfter(amount),
            "head-indent" => ParagraphSpacing::HeadIndent(amount),
            "tail-indent" => ParagraphSpacing::TailIndent(amount),
            "first-indent" => ParagraphSpacing::FirstLineIndent(amount),
            other => return Err(StyleError::invalid("spacing", other)),
        });
    }
    Ok(spacing)
}

fn parse_hidden(value: &Value) -> Result<GlyphPolicy> {
    match value {
        Value::String(name) => match name.as_str() {
            "none" => Ok(GlyphPolicy::None),
            "heading" => Ok(GlyphPolicy::custom(heading_marker)),
            other => Err(StyleError::invalid("hidden", other)),
        },
        Value::Table(table) => {
            let count = |key: &str| -> Result<Option<usize>> {
                match table.get(key) {
                    None => Ok(None),
                    Some(Value::Integer(n)) if *n >= 0 => Ok(Some(*n as usize)),
                    Some(other) => Err(StyleError::invalid(key, other)),
                }
            };
            match (count("leading")?, count("trailing")?) {
                (Some(leading), Some(trailing)) => Ok(GlyphPolicy::LeadingAndTrailing(leading, trailing)),
                (Some(leading), None) => Ok(GlyphPolicy::LeadingOnly(leading)),
                (None, _) => Err(StyleError::invalid("hidden", "missing `leading`")),
            }
        }
        other => Err(StyleError::invalid("hidden", other)),
    }
}

fn string<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| StyleError::invalid(key, value))
}

/// A string or array of strings; absent means empty
fn strings<'a>(value: Option<&'a Value>, key: &str) -> Result<Vec<&'a str>> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.as_str()]),
        Some(Value::Array(items)) => items.iter().map(|item| string(item, key)).collect(),
        Some(other) => Err(StyleError::invalid(key, other)),
    }
}

fn number(value: &Value, key: &str) -> Result<f32> {
    match value {
        Value::Integer(n) => Ok(*n as f32),
        Value::Float(f) => Ok(*f as f32),
        other => Err(StyleError::invalid(key, other)),
    }
}

fn named<T>(value: &Value, key: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    let name = string(value, key)?;
    parse(name).ok_or_else(|| StyleError::invalid(key, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(source: &str) -> Result<Option<Vec<StyleRule>>> {
        let doc: Table = source.parse()?;
        load_rules(&doc, 12.0, &RegexCache::new())
    }

    #[test]
    fn test_no_rules() {
        assert!(load("[engine]\nparagraph-padding = 1\n").unwrap().is_none());
    }

    #[test]
    fn test_pattern_rule() {
        let rules = load(
            r##"
[[rule]]
pattern = "^>.*"
options = ["multi-line"]
color = "#336699"
font = "quote"
alignment = "right"
size = 14
style = ["italic", "underline"]
spacing = { before = 4, head-indent = 2.5 }
hidden = { leading = 1 }
"##,
        )
        .unwrap()
        .unwrap();

        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.pattern(), "^>.*");
        assert!(rule.options().multi_line);
        assert_eq!(rule.color, Color::Rgb(0x33, 0x66, 0x99));
        assert_eq!(rule.font, FontFamily::Quote);
        assert_eq!(rule.alignment, Alignment::Right);
        assert_eq!(rule.size, 14.0);
        assert!(rule.italic && rule.underline && !rule.strikethrough);
        assert_eq!(rule.spacing.len(), 2);
        assert!(matches!(rule.hidden, GlyphPolicy::LeadingOnly(1)));
    }

    #[test]
    fn test_glyph_rules() {
        let rules = load(
            r#"
[[rule]]
glyphs = "=="
hidden = { leading = 2, trailing = 2 }

[[rule]]
glyphs = ["**", "__"]
style = "bold"
hidden = "none"

[[rule]]
pattern = '^#{1} \S.*$'
options = "multi-line"
hidden = "heading"
"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].size, 12.0);
        assert!(matches!(rules[0].hidden, GlyphPolicy::LeadingAndTrailing(2, 2)));
        assert_eq!(rules[1].matches_in("**a** __b__", 0..11).len(), 2);
        assert_eq!(rules[2].hidden_ranges("# Title"), vec![0..2]);
    }

    #[test]
    fn test_bad_pattern_is_inert_not_error() {
        let rules = load("[[rule]]\npattern = \"(oops\"\n").unwrap().unwrap();
        assert!(rules[0].is_inert());
    }

    #[test]
    fn test_invalid_values() {
        assert!(load("[[rule]]\npattern = \"x\"\ncolor = \"plaid\"\n").is_err());
        assert!(load("[[rule]]\npattern = \"x\"\noptions = [\"sideways\"]\n").is_err());
        assert!(load("[[rule]]\npattern = \"x\"\nhidden = { trailing = 1 }\n").is_err());
        assert!(load("[[rule]]\ncolor = \"red\"\n").is_err());
        assert!(load("[[rule]]\npattern = \"x\"\nglyphs = \"*\"\n").is_err());
        assert!(load("rule = 3\n").is_err());
    }
}
