use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    TypeMismatch(String),
    UnknownAction(String),
    Unresolvable {
        path: String,
        segment: String,
    },
    Script(String),
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EditError::Pattern { pattern, source } => {
                write!(f, "Invalid pattern '{}': {}", pattern, source)
            }
            EditError::TypeMismatch(s) => write!(f, "Type mismatch: {}", s),
            EditError::UnknownAction(s) => write!(f, "Unknown action: '{}'", s),
            EditError::Unresolvable { path, segment } => {
                write!(f, "No such node: '{}' (at segment '{}')", path, segment)
            }
            EditError::Script(s) => write!(f, "Script error: {}", s),
        }
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
