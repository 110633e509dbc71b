//! Configuration file support
//!
//! Loads settings from ~/.restyle.toml (or %USERPROFILE%\.restyle.toml on
//! Windows), or from an explicit path.
//!
//! Engine settings live in an `[engine]` table. Any `[[rule]]` tables
//! replace the built-in markdown rules (see `syntax::load_rules`).
//!
//! Example:
//! ```text
//! [engine]
//! paragraph-padding = 2
//! trigger-characters = "#@"
//! font-size = 14
//! ignore-font-size = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use toml::{Table, Value};

use crate::error::{Result, StyleError};
use crate::syntax::{
    load_rules, RegexCache, Styler, Theme, TriggerSet, DEFAULT_FONT_SIZE, DEFAULT_PADDING,
};

const CONFIG_FILE: &str = ".restyle.toml";

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Paragraphs of padding around each edit
    pub paragraph_padding: usize,
    /// Characters that make a match a trigger label
    pub triggers: TriggerSet,
    /// Base font size
    pub font_size: f32,
    /// Render every rule at the base size (read-only previews)
    pub ignore_font_size: bool,
    /// The parsed file, kept for its `[[rule]]` tables
    document: Table,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paragraph_padding: DEFAULT_PADDING,
            triggers: TriggerSet::default(),
            font_size: DEFAULT_FONT_SIZE,
            ignore_font_size: false,
            document: Table::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default path; a missing file gives defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let document: Table = contents.parse()?;
        let mut config = Config::default();
        if let Some(engine) = document.get("engine") {
            let engine = engine
                .as_table()
                .ok_or_else(|| StyleError::invalid("engine", "expected a table"))?;
            config.apply(engine)?;
        }
        config.document = document;
        Ok(config)
    }

    /// Apply settings from the `[engine]` table
    fn apply(&mut self, settings: &Table) -> Result<()> {
        if let Some(value) = settings.get("paragraph-padding") {
            let n = value
                .as_integer()
                .ok_or_else(|| StyleError::invalid("paragraph-padding", value))?;
            self.paragraph_padding = n.clamp(0, 16) as usize;
        }

        if let Some(value) = settings.get("trigger-characters") {
            let chars = value
                .as_str()
                .ok_or_else(|| StyleError::invalid("trigger-characters", value))?;
            self.triggers = TriggerSet::from_chars(chars);
        }

        if let Some(value) = settings.get("font-size") {
            let size = match value {
                Value::Integer(n) => *n as f32,
                Value::Float(f) => *f as f32,
                other => return Err(StyleError::invalid("font-size", other)),
            };
            self.font_size = size.clamp(6.0, 96.0);
        }

        if let Some(value) = settings.get("ignore-font-size") {
            self.ignore_font_size = match value {
                Value::Boolean(b) => *b,
                Value::String(s) => parse_bool(s),
                other => return Err(StyleError::invalid("ignore-font-size", other)),
            };
        }

        Ok(())
    }

    /// Build the theme: file rules if any, else the built-in markdown set
    pub fn theme(&self) -> Result<Theme> {
        let cache = Arc::new(RegexCache::new());
        let theme = match load_rules(&self.document, self.font_size, &cache)? {
            Some(rules) => Theme::new(rules, cache).with_font_size(self.font_size),
            None => Theme::markdown_with_cache(self.font_size, cache),
        };
        Ok(if self.ignore_font_size {
            theme.with_uniform_size()
        } else {
            theme
        })
    }

    /// Build a styler for these settings
    pub fn styler(&self) -> Result<Styler> {
        Ok(Styler::new(self.theme()?)
            .with_padding(self.paragraph_padding)
            .with_triggers(self.triggers.clone()))
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
