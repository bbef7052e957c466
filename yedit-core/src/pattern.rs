//! Anchored regular-expression matching for paths and field values.

use crate::error::{EditError, Result};
use regex::Regex;

/// Anchor `pattern` at both ends unless it already is.
pub fn anchor(pattern: &str) -> String {
    let mut anchored = String::with_capacity(pattern.len() + 2);
    if !pattern.starts_with('^') {
        anchored.push('^');
    }
    anchored.push_str(pattern);
    if !pattern.ends_with('$') {
        anchored.push('$');
    }
    anchored
}

/// Compile `pattern` as a full-string matcher.
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&anchor(pattern)).map_err(|source| EditError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

pub fn matches(pattern: &str, text: &str) -> Result<bool> {
    Ok(compile(pattern)?.is_match(text))
}
