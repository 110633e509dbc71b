//! Dirty range expansion
//!
//! An edit only dirties a small span, but rules can match across lines
//! (fenced code blocks, for one). Before restyling, the dirty span is grown
//! to whole paragraphs and padded with neighbouring paragraphs.

use std::ops::Range;

/// Default number of padding paragraphs for edit-driven passes
pub const DEFAULT_PADDING: usize = 2;

/// What part of the document needs restyling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dirty {
    /// The whole document
    All,
    /// A raw edit-affected span
    Range(Range<usize>),
}

impl Dirty {
    /// Resolve against a text, clamping to its bounds
    pub fn resolve(&self, text: &str) -> Range<usize> {
        match self {
            Dirty::All => 0..text.len(),
            Dirty::Range(range) => clamp(range.clone(), text),
        }
    }
}

/// Clamp a range to `[0, len]`, ordered, on char boundaries
pub fn clamp(range: Range<usize>, text: &str) -> Range<usize> {
    let mut start = range.start.min(text.len());
    let mut end = range.end.min(text.len()).max(start);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    start..end.max(start)
}

/// The paragraph containing `pos`, including its trailing newline
///
/// At the end of a text that ends in a newline this is the empty range
/// `len..len`.
pub fn paragraph_at(text: &str, pos: usize) -> Range<usize> {
    let pos = pos.min(text.len());
    let start = text.as_bytes()[..pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let end = text.as_bytes()[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |i| pos + i + 1);
    start..end
}

/// The paragraphs touched by `range`
pub fn paragraph_range(text: &str, range: Range<usize>) -> Range<usize> {
    let range = clamp(range, text);
    let first = paragraph_at(text, range.start);
    // Look up the last contained byte so aligned ranges stay put
    let last_pos = if range.is_empty() {
        range.end
    } else {
        range.end - 1
    };
    let last = paragraph_at(text, last_pos);
    first.start.min(last.start)..first.end.max(last.end)
}

/// Grow `range` to whole paragraphs plus `padding` paragraphs on each side
///
/// The result always contains the (clamped) input and is paragraph-aligned
/// at both ends.
pub fn expand(range: Range<usize>, text: &str, padding: usize) -> Range<usize> {
    let range = clamp(range, text);
    let len = text.len();

    let mut lower = paragraph_range(text, range.start..range.start);
    let mut upper = paragraph_range(text, range);

    for _ in 0..padding {
        if lower.start == 0 {
            break;
        }
        let previous = paragraph_at(text, lower.start - 1);
        lower = previous.start..lower.end.max(previous.end);
    }

    for _ in 0..padding {
        if upper.end >= len {
            break;
        }
        let next = paragraph_at(text, upper.end);
        upper = upper.start..next.end;
    }

    lower.start.min(upper.start)..lower.end.max(upper.end)
}
