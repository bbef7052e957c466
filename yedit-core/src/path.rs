//! Dotted path codec and direct value lookup.
//!
//! A canonical path joins escaped keys with unescaped dots. Inside a key a
//! backslash is written `\\` and a dot `\.`, so any key survives a
//! join-then-parse round trip.

use crate::error::{EditError, Result};
use crate::node::Node;

/// Path that resolves to the value it is applied to.
pub const IDENTITY: &str = ".";

/// Escape a single key for embedding in a dotted path.
pub fn escape(key: &str) -> String {
    // Backslashes first, or the escaped dots would be escaped again.
    key.replace('\\', "\\\\").replace('.', "\\.")
}

/// Canonical path of a child keyed `key` under `parent`.
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        escape(key)
    } else {
        format!("{}.{}", parent, escape(key))
    }
}

/// Escape and join segments into a canonical path.
///
/// A leading empty segment renders as a leading dot, which [`parse_path`]
/// strips, so such a path does not parse back to the same segments.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| escape(s.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a dotted path into unescaped segments.
///
/// One leading dot is optional. `\.` and `\\` decode to `.` and `\`; any
/// other backslash is kept literally.
pub fn parse_path(path: &str) -> Vec<String> {
    let path = path.strip_prefix('.').unwrap_or(path);
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => segments.push(std::mem::take(&mut current)),
            '\\' => match chars.peek() {
                Some(&next @ ('.' | '\\')) => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            other => current.push(other),
        }
    }
    segments.push(current);
    segments
}

/// Resolve `path` against `node`.
pub fn resolve<'a>(node: &'a Node, path: &str) -> Result<&'a Node> {
    if path == IDENTITY {
        return Ok(node);
    }

    let mut current = node;
    for segment in parse_path(path) {
        current = step(current, &segment).ok_or_else(|| EditError::Unresolvable {
            path: path.to_string(),
            segment: segment.clone(),
        })?;
    }
    Ok(current)
}

fn step<'a>(node: &'a Node, segment: &str) -> Option<&'a Node> {
    match node {
        Node::Mapping(_) => node.get(segment),
        Node::Sequence(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        Node::Scalar(_) => None,
    }
}
