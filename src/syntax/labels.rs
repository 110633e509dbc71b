//! Trigger label extraction
//!
//! Matches that start with a trigger character (`#tag`, `@name`) are
//! reported to the host so it can drive tag or mention completion.

use std::collections::BTreeSet;

use super::rules::StyleRule;
use super::style::AttributePatch;

/// Trigger characters used when the host configures none
pub const DEFAULT_TRIGGERS: &str = "#@&![";

/// A matched token of interest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelWithOffset {
    /// The matched text
    pub label: String,
    /// Absolute start offset in the document at pass time
    pub offset: usize,
    /// The leading character that qualified the match
    pub trigger: String,
}

impl LabelWithOffset {
    /// Decide whether a match is a trigger label
    ///
    /// The match must start with a trigger character, be longer than one
    /// character once trimmed, carry a non-empty attribute write, and not
    /// come from the catch-all rule.
    pub fn extract(
        captured: &str,
        offset: usize,
        triggers: &TriggerSet,
        rule: &StyleRule,
        patch: &AttributePatch,
    ) -> Option<Self> {
        let first = captured.chars().next()?;
        if !triggers.contains(first) || patch.is_empty() || rule.is_catch_all() {
            return None;
        }
        if captured.trim().chars().count() <= 1 {
            return None;
        }
        Some(Self {
            label: captured.to_string(),
            offset,
            trigger: first.to_string(),
        })
    }
}

/// The set of characters that make a match a trigger label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSet {
    chars: BTreeSet<char>,
}

impl TriggerSet {
    /// Build from every character in `chars`
    pub fn from_chars(chars: &str) -> Self {
        Self {
            chars: chars.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// A set that never triggers
    pub fn empty() -> Self {
        Self {
            chars: BTreeSet::new(),
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self::from_chars(DEFAULT_TRIGGERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::cache::{MatchOptions, RegexCache};
    use crate::syntax::style::SystemFonts;

    fn line_rule(cache: &RegexCache) -> StyleRule {
        StyleRule::new(r"^.+$", MatchOptions::NONE.with_multi_line(), cache)
    }

    #[test]
    fn test_trigger_label_emitted() {
        let cache = RegexCache::new();
        let rule = line_rule(&cache);
        let patch = rule.patch(&SystemFonts);
        let triggers = TriggerSet::from_chars("#@");

        let label = LabelWithOffset::extract("#tag more text", 10, &triggers, &rule, &patch).unwrap();
        assert_eq!(label.label, "#tag more text");
        assert_eq!(label.offset, 10);
        assert_eq!(label.trigger, "#");
    }

    #[test]
    fn test_trimmed_single_char_is_ignored() {
        let cache = RegexCache::new();
        let rule = line_rule(&cache);
        let patch = rule.patch(&SystemFonts);
        let triggers = TriggerSet::from_chars("#@");
        assert!(LabelWithOffset::extract("# ", 0, &triggers, &rule, &patch).is_none());
        assert!(LabelWithOffset::extract("#", 0, &triggers, &rule, &patch).is_none());
    }

    #[test]
    fn test_non_trigger_and_catch_all() {
        let cache = RegexCache::new();
        let rule = line_rule(&cache);
        let patch = rule.patch(&SystemFonts);
        let triggers = TriggerSet::from_chars("#@");
        assert!(LabelWithOffset::extract("*bold*", 0, &triggers, &rule, &patch).is_none());
        assert!(LabelWithOffset::extract("", 0, &triggers, &rule, &patch).is_none());

        let catch_all = StyleRule::new(".*", MatchOptions::NONE, &cache);
        let patch = catch_all.patch(&SystemFonts);
        assert!(LabelWithOffset::extract("@someone", 0, &triggers, &catch_all, &patch).is_none());
    }

    #[test]
    fn test_empty_patch_is_ignored() {
        let cache = RegexCache::new();
        let rule = line_rule(&cache);
        let triggers = TriggerSet::default();
        let empty = AttributePatch::default();
        assert!(LabelWithOffset::extract("@someone", 0, &triggers, &rule, &empty).is_none());
    }

    #[test]
    fn test_trigger_is_first_char_only() {
        let cache = RegexCache::new();
        let rule = line_rule(&cache);
        let patch = rule.patch(&SystemFonts);
        let triggers = TriggerSet::default();
        let label = LabelWithOffset::extract("[^note]", 3, &triggers, &rule, &patch).unwrap();
        assert_eq!(label.trigger, "[");
    }

    #[test]
    fn test_default_triggers() {
        let triggers = TriggerSet::default();
        for c in ['#', '@', '&', '!', '['] {
            assert!(triggers.contains(c));
        }
        assert!(!triggers.contains('*'));
        assert!(TriggerSet::empty().is_empty());
        assert_eq!(TriggerSet::from_chars("# @").iter().count(), 2);
    }
}
