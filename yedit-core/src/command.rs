//! Edit commands and their compiled selectors.

use crate::error::{EditError, Result};
use crate::fields::FieldCriteria;
use crate::node::Node;
use crate::pattern;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Delete,
    Replace,
    Merge,
    Append,
    Read,
}

/// When an action is evaluated relative to a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Before descending; a match stops traversal into the node.
    PreOrder,
    /// After the children have been rebuilt.
    PostOrder,
}

impl Action {
    pub fn timing(self) -> Timing {
        match self {
            Action::Delete | Action::Read => Timing::PreOrder,
            Action::Replace | Action::Merge | Action::Append => Timing::PostOrder,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Delete => "delete",
            Action::Replace => "replace",
            Action::Merge => "merge",
            Action::Append => "append",
            Action::Read => "read",
        }
    }
}

impl FromStr for Action {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "delete" => Ok(Action::Delete),
            "replace" => Ok(Action::Replace),
            "merge" => Ok(Action::Merge),
            "append" => Ok(Action::Append),
            "read" => Ok(Action::Read),
            other => Err(EditError::UnknownAction(other.to_string())),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selection-plus-action directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Pattern over canonical paths; empty selects every path.
    pub path: String,
    /// Required `key -> pattern` over scalar siblings.
    pub fields: Vec<(String, String)>,
    pub action: Action,
    pub params: Node,
}

impl Command {
    pub fn new(action: Action) -> Self {
        Self {
            path: String::new(),
            fields: Vec::new(),
            action,
            params: Node::null(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.fields.push((key.into(), pattern.into()));
        self
    }

    pub fn with_params(mut self, params: impl Into<Node>) -> Self {
        self.params = params.into();
        self
    }

    /// The single `read` command built from the command-line shortcut.
    pub fn read(path: impl Into<String>, fields: Vec<(String, String)>, read: &str) -> Self {
        Self {
            path: path.into(),
            fields,
            action: Action::Read,
            params: Node::string(read),
        }
    }
}

/// A command's constraints, compiled once per pass.
#[derive(Debug)]
pub struct Selector {
    path: Option<Regex>,
    fields: FieldCriteria,
    timing: Timing,
}

impl Selector {
    pub fn compile(command: &Command) -> Result<Self> {
        let path = if command.path.is_empty() {
            None
        } else {
            Some(pattern::compile(&command.path)?)
        };
        Ok(Self {
            path,
            fields: FieldCriteria::compile(&command.fields)?,
            timing: command.action.timing(),
        })
    }

    /// Whether the command selects `node` at canonical `path` during `timing`.
    pub fn selects(&self, timing: Timing, path: &str, node: &Node) -> bool {
        if timing != self.timing {
            return false;
        }
        if let Some(regex) = &self.path {
            if !regex.is_match(path) {
                return false;
            }
        }
        self.fields.matches(node)
    }
}
