//! restyle - incremental regex-rule styling for plain-text documents
//!
//! A document is styled by matching an ordered set of pattern rules against
//! its text. Edits only restyle a paragraph-aligned window around the
//! change, and marker glyphs are kept in the text but drawn muted.

pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod syntax;

pub use config::Config;
pub use document::Document;
pub use error::{Result, StyleError};
pub use syntax::{Dirty, LabelWithOffset, StyleRule, Styler, StylingOutput, Theme, TriggerSet};
