//! Terminal rendering of attributed runs
//!
//! Maps engine attributes onto ANSI styling: bold and italic traits,
//! underline, strikethrough and colors. Muted glyphs are dimmed. Sizes,
//! fonts and paragraph styles have no terminal equivalent except that
//! larger-than-base text is drawn bold.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};

use crate::syntax::{Attributes, Color, StyledRun};

/// Map an engine color to a terminal color; `None` means terminal default
fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Default | Color::Clear => None,
        Color::Muted => Some(TermColor::DarkGrey),
        Color::Gray => Some(TermColor::Grey),
        Color::Black => Some(TermColor::Black),
        Color::Red => Some(TermColor::Red),
        Color::Green => Some(TermColor::Green),
        Color::Yellow => Some(TermColor::Yellow),
        Color::Blue => Some(TermColor::Blue),
        Color::Magenta => Some(TermColor::Magenta),
        Color::Cyan => Some(TermColor::Cyan),
        Color::White => Some(TermColor::White),
        Color::Rgb(r, g, b) => Some(TermColor::Rgb { r, g, b }),
    }
}

/// Terminal attributes for a run
fn term_attributes(attrs: &Attributes, base_size: f32) -> Vec<Attribute> {
    let mut out = Vec::new();
    if attrs.font.bold || attrs.font.size > base_size {
        out.push(Attribute::Bold);
    }
    if attrs.font.italic {
        out.push(Attribute::Italic);
    }
    if attrs.underline {
        out.push(Attribute::Underlined);
    }
    if attrs.strikethrough {
        out.push(Attribute::CrossedOut);
    }
    if attrs.foreground == Color::Muted {
        out.push(Attribute::Dim);
    }
    out
}

/// Write `text` styled by `runs` (which must cover it)
pub fn render<W: Write>(out: &mut W, text: &str, runs: &[StyledRun], base_size: f32) -> io::Result<()> {
    for run in runs {
        let Some(slice) = text.get(run.range.clone()) else {
            continue;
        };

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        if let Some(color) = term_color(run.attributes.foreground) {
            queue!(out, SetForegroundColor(color))?;
        }
        if let Some(color) = term_color(run.attributes.background) {
            queue!(out, SetBackgroundColor(color))?;
        }
        for attribute in term_attributes(&run.attributes, base_size) {
            queue!(out, SetAttribute(attribute))?;
        }
        queue!(out, Print(slice))?;
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()
}
