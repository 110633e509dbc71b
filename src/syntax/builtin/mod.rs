//! Built-in rule sets
//!
//! Only markdown ships today; hosts wanting other flavours build their own
//! rules or load them from a theme file.

mod markdown;

pub use markdown::markdown_rules;
