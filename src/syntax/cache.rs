//! Compiled pattern cache
//!
//! Rules share compiled regexes through a `RegexCache` keyed by the pattern
//! text and its match options. Entries are inserted on first use and never
//! evicted; the number of distinct rule patterns is small and fixed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use regex::{Regex, RegexBuilder};

use crate::error::{Result, StyleError};

/// Regex flags that are part of the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchOptions {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries
    pub multi_line: bool,
    /// `.` also matches `\n`
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

impl MatchOptions {
    /// No flags set
    pub const NONE: MatchOptions = MatchOptions {
        case_insensitive: false,
        multi_line: false,
        dot_matches_new_line: false,
        ignore_whitespace: false,
    };

    /// Builder: anchors match at line boundaries
    pub fn with_multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    /// Builder: dot matches newlines
    pub fn with_dot_matches_new_line(mut self) -> Self {
        self.dot_matches_new_line = true;
        self
    }

    /// Builder: case-insensitive matching
    pub fn with_case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Builder: verbose patterns
    pub fn with_ignore_whitespace(mut self) -> Self {
        self.ignore_whitespace = true;
        self
    }

    /// Parse a single option name (for TOML loading)
    pub fn set_by_name(&mut self, name: &str) -> bool {
        match name.to_lowercase().as_str() {
            "case-insensitive" | "i" => self.case_insensitive = true,
            "multi-line" | "anchors-match-lines" | "m" => self.multi_line = true,
            "dot-all" | "dot-matches-new-line" | "s" => self.dot_matches_new_line = true,
            "ignore-whitespace" | "x" => self.ignore_whitespace = true,
            _ => return false,
        }
        true
    }

    fn compile(&self, pattern: &str) -> std::result::Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .build()
    }
}

type CacheKey = (String, MatchOptions);

/// Shared cache of compiled patterns
///
/// Lookups take a read lock; only a miss takes the write lock. Failed
/// compilations are not stored, so a bad pattern is retried (and fails
/// again) on its next lookup.
#[derive(Debug, Default)]
pub struct RegexCache {
    entries: RwLock<HashMap<CacheKey, Arc<Regex>>>,
}

impl RegexCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a compiled pattern, compiling and inserting it on a miss
    pub fn try_get_or_compile(&self, pattern: &str, options: MatchOptions) -> Result<Arc<Regex>> {
        let key = (pattern.to_string(), options);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(regex) = entries.get(&key) {
                return Ok(Arc::clone(regex));
            }
        }

        let compiled = options.compile(pattern).map_err(|source| StyleError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have raced us here; keep whichever landed first
        let regex = entries.entry(key).or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(regex))
    }

    /// Like `try_get_or_compile`, but a bad pattern is logged and yields `None`
    pub fn get_or_compile(&self, pattern: &str, options: MatchOptions) -> Option<Arc<Regex>> {
        match self.try_get_or_compile(pattern, options) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::warn!(%pattern, error = %err, "pattern failed to compile; rule is inert");
                None
            }
        }
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
