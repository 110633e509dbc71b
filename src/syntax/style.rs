//! Style types for attributed text
//!
//! This module provides the visual vocabulary the styling pass writes:
//! colors, fonts, paragraph styles, and the per-key attribute patches that
//! rules layer on top of each other.

/// Text colors
///
/// `Default` is the host's label color and `Muted` its secondary label
/// color, which is what hidden glyphs are drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    /// Transparent (used for backgrounds)
    Clear,
    /// Secondary label color for syntax markers
    Muted,
    Gray,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a name or `#rrggbb` (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(hex) = name.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        match name.to_lowercase().as_str() {
            "default" | "label" => Some(Color::Default),
            "clear" | "none" => Some(Color::Clear),
            "muted" | "secondary" => Some(Color::Muted),
            "gray" | "grey" => Some(Color::Gray),
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            _ => None,
        }
    }
}

/// Font family selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    System,
    Monospace,
    Quote,
}

impl FontFamily {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "system" => Some(FontFamily::System),
            "monospace" | "mono" => Some(FontFamily::Monospace),
            "quote" => Some(FontFamily::Quote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// Font traits a rule can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl FontStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bold" => Some(FontStyle::Bold),
            "italic" => Some(FontStyle::Italic),
            "underline" => Some(FontStyle::Underline),
            "strikethrough" => Some(FontStyle::Strikethrough),
            _ => None,
        }
    }
}

/// A concrete font handle
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Selector this font was resolved from
    pub family: FontFamily,
    /// Concrete family name
    pub name: String,
    /// Point size
    pub size: f32,
    pub weight: FontWeight,
    pub italic: bool,
    pub bold: bool,
}

impl Font {
    /// Builder: add the italic trait
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: add the bold trait
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Maps a family selector, size and weight to a concrete font
///
/// This is the host's font lookup; the engine only applies traits on top.
pub trait FontResolver: Send + Sync {
    fn resolve(&self, family: FontFamily, size: f32, weight: FontWeight) -> Font;
}

/// Default resolver using generic platform family names
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFonts;

impl FontResolver for SystemFonts {
    fn resolve(&self, family: FontFamily, size: f32, weight: FontWeight) -> Font {
        let name = match family {
            FontFamily::System => "system-ui",
            FontFamily::Monospace => "monospace",
            FontFamily::Quote => "Palatino",
        };
        Font {
            family,
            name: name.to_string(),
            size,
            weight,
            italic: false,
            bold: weight == FontWeight::Bold,
        }
    }
}

/// Vertical baseline shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    #[default]
    Base,
    Raised,
    Lowered,
}

impl Baseline {
    /// Baseline offset in points
    pub fn offset(&self) -> f32 {
        match self {
            Baseline::Base => 0.0,
            Baseline::Raised => 6.0,
            Baseline::Lowered => -3.0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "base" => Some(Baseline::Base),
            "raised" | "superscript" => Some(Baseline::Raised),
            "lowered" | "subscript" => Some(Baseline::Lowered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

impl Alignment {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" | "centre" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            "justified" | "justify" => Some(Alignment::Justified),
            _ => None,
        }
    }
}

/// A single paragraph-level directive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParagraphSpacing {
    LineSpacing(f32),
    SpacingBefore(f32),
    SpacingAfter(f32),
    HeadIndent(f32),
    TailIndent(f32),
    FirstLineIndent(f32),
}

/// Paragraph style assembled from a rule's directives
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParagraphStyle {
    pub line_spacing: f32,
    pub spacing_before: f32,
    pub spacing_after: f32,
    pub head_indent: f32,
    pub tail_indent: f32,
    pub first_line_indent: f32,
    pub alignment: Alignment,
}

impl ParagraphStyle {
    /// Apply directives in order; later directives of the same kind win
    pub fn from_directives(directives: &[ParagraphSpacing], alignment: Alignment) -> Self {
        let mut style = ParagraphStyle {
            alignment,
            ..Default::default()
        };
        for directive in directives {
            match *directive {
                ParagraphSpacing::LineSpacing(v) => style.line_spacing = v,
                ParagraphSpacing::SpacingBefore(v) => style.spacing_before = v,
                ParagraphSpacing::SpacingAfter(v) => style.spacing_after = v,
                ParagraphSpacing::HeadIndent(v) => style.head_indent = v,
                ParagraphSpacing::TailIndent(v) => style.tail_indent = v,
                ParagraphSpacing::FirstLineIndent(v) => style.first_line_indent = v,
            }
        }
        style
    }
}

/// Fully-resolved attributes at a text offset
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub font: Font,
    pub foreground: Color,
    pub background: Color,
    pub underline: bool,
    pub strikethrough: bool,
    pub baseline_offset: f32,
    pub paragraph: ParagraphStyle,
}

impl Attributes {
    /// Plain attributes in the given font and background
    pub fn plain(font: Font, background: Color) -> Self {
        Self {
            font,
            foreground: Color::Default,
            background,
            underline: false,
            strikethrough: false,
            baseline_offset: 0.0,
            paragraph: ParagraphStyle::default(),
        }
    }

    /// Overwrite every key the patch carries
    pub fn apply(&mut self, patch: &AttributePatch) {
        if let Some(font) = &patch.font {
            self.font = font.clone();
        }
        if let Some(color) = patch.foreground {
            self.foreground = color;
        }
        if let Some(color) = patch.background {
            self.background = color;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(strikethrough) = patch.strikethrough {
            self.strikethrough = strikethrough;
        }
        if let Some(offset) = patch.baseline_offset {
            self.baseline_offset = offset;
        }
        if let Some(paragraph) = patch.paragraph {
            self.paragraph = paragraph;
        }
    }
}

/// A partial attribute write; `None` keys leave earlier values in place
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributePatch {
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub baseline_offset: Option<f32>,
    pub paragraph: Option<ParagraphStyle>,
}

impl AttributePatch {
    /// Patch that only mutes the foreground
    pub fn muted() -> Self {
        Self {
            foreground: Some(Color::Muted),
            ..Default::default()
        }
    }

    /// Check if this patch writes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
