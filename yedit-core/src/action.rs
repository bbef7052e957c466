use crate::command::{Action, Command};
use crate::error::{EditError, Result};
use crate::merge::merge_into;
use crate::node::Node;
use crate::path;

/// What a selected node becomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Install this node in place of the selected one.
    Keep(Node),
    /// Drop the node and its subtree from the parent.
    Omit,
    /// Stop the whole run and report this value.
    Halt(Node),
}

/// Apply `command` to a node it selected.
pub fn execute(command: &Command, node: Node) -> Result<Effect> {
    match command.action {
        Action::Delete => Ok(Effect::Omit),
        Action::Replace => Ok(Effect::Keep(command.params.clone())),
        Action::Merge => merge_into(node, command.params.clone()).map(Effect::Keep),
        Action::Append => match node {
            Node::Sequence(mut items) => {
                items.push(command.params.clone());
                Ok(Effect::Keep(Node::Sequence(items)))
            }
            other => Err(EditError::TypeMismatch(format!(
                "cannot append to {} node",
                other.kind()
            ))),
        },
        Action::Read => {
            let Some(read_path) = command.params.as_str() else {
                return Err(EditError::TypeMismatch(format!(
                    "read expects a path string, got {} node",
                    command.params.kind()
                )));
            };
            let value = path::resolve(&node, read_path)?;
            Ok(Effect::Halt(value.clone()))
        }
    }
}
