//! Styling engine
//!
//! This module turns plain text plus an ordered set of pattern rules into
//! attributed runs:
//! - `range` grows an edit's dirty span to padded paragraph windows
//! - `pass` matches rules over a window and flattens their attribute layers
//! - `glyphs` finds the marker glyphs to draw muted
//! - `labels` extracts trigger tokens for completion features

mod builtin;
mod cache;
mod glyphs;
mod labels;
mod loader;
mod pass;
mod range;
mod rules;
mod style;
mod theme;

pub use builtin::markdown_rules;
pub use cache::{MatchOptions, RegexCache};
pub use glyphs::{heading_marker, GlyphFn, GlyphPolicy};
pub use labels::{LabelWithOffset, TriggerSet, DEFAULT_TRIGGERS};
pub use loader::load_rules;
pub use pass::{style, StyledRun, StyledWindow, Styler, StylingOutput};
pub use range::{clamp, expand, paragraph_at, paragraph_range, Dirty, DEFAULT_PADDING};
pub use rules::{RuleMatch, StyleRule, CATCH_ALL, DEFAULT_SIZE};
pub use style::{
    Alignment, AttributePatch, Attributes, Baseline, Color, Font, FontFamily, FontResolver,
    FontStyle, FontWeight, ParagraphSpacing, ParagraphStyle, SystemFonts,
};
pub use theme::{Theme, DEFAULT_FONT_SIZE};
