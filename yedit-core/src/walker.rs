//! Tree walker: applies commands over a whole document.
//!
//! Each pass visits every node root to leaves. Pre-order actions (delete,
//! read) are checked before descending and end traversal into a node they
//! select. Post-order actions (replace, merge, append) are checked once the
//! node's children have been rebuilt. Containers are rebuilt level by level
//! from their children's results, so nothing is mutated in place.

use crate::action::{execute, Effect};
use crate::command::{Action, Command, Selector, Timing};
use crate::error::Result;
use crate::node::Node;
use crate::path::child_path;
use tracing::{debug, trace};

/// Result of running a command list over a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every command ran; this is the edited document.
    Finished(Node),
    /// A read command fired; nothing after it ran.
    Read(Node),
}

struct Walker<'a> {
    command: &'a Command,
    selector: Selector,
}

impl<'a> Walker<'a> {
    fn new(command: &'a Command) -> Result<Self> {
        Ok(Self {
            command,
            selector: Selector::compile(command)?,
        })
    }

    fn visit(&self, path: &str, mut node: Node) -> Result<Effect> {
        if self.selector.selects(Timing::PreOrder, path, &node) {
            trace!(path, action = %self.command.action, "selected before descent");
            match execute(self.command, node)? {
                Effect::Keep(kept) => node = kept,
                stop => return Ok(stop),
            }
        }

        let node = match node {
            Node::Mapping(pairs) => {
                let mut rebuilt = Vec::with_capacity(pairs.len());
                for (key, value) in pairs {
                    let child = child_path(path, &key.to_string());
                    match self.visit(&child, value)? {
                        Effect::Keep(value) => rebuilt.push((key, value)),
                        Effect::Omit => {}
                        halt @ Effect::Halt(_) => return Ok(halt),
                    }
                }
                Node::Mapping(rebuilt)
            }
            Node::Sequence(items) => {
                let mut rebuilt = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let child = child_path(path, &index.to_string());
                    match self.visit(&child, item)? {
                        Effect::Keep(item) => rebuilt.push(item),
                        Effect::Omit => {}
                        halt @ Effect::Halt(_) => return Ok(halt),
                    }
                }
                Node::Sequence(rebuilt)
            }
            scalar @ Node::Scalar(_) => scalar,
        };

        if self.selector.selects(Timing::PostOrder, path, &node) {
            trace!(path, action = %self.command.action, "selected after descent");
            return execute(self.command, node);
        }
        Ok(Effect::Keep(node))
    }
}

/// Run a single command over `document`.
///
/// The root has no parent to drop it from, so a delete that selects the
/// root leaves the document untouched and nothing below it is visited.
pub fn apply(document: Node, command: &Command) -> Result<Outcome> {
    let walker = Walker::new(command)?;
    if command.action == Action::Delete
        && walker.selector.selects(Timing::PreOrder, "", &document)
    {
        debug!("delete selected the root; document left unchanged");
        return Ok(Outcome::Finished(document));
    }
    let outcome = match walker.visit("", document)? {
        Effect::Keep(node) => Outcome::Finished(node),
        Effect::Halt(value) => Outcome::Read(value),
        // Only a delete omits, and a root delete returned above.
        Effect::Omit => Outcome::Finished(Node::null()),
    };
    Ok(outcome)
}

/// Run `commands` in order, stopping early if one of them reads.
pub fn apply_all(mut document: Node, commands: &[Command]) -> Result<Outcome> {
    for (index, command) in commands.iter().enumerate() {
        debug!(
            index,
            action = %command.action,
            path = %command.path,
            "applying command"
        );
        match apply(document, command)? {
            Outcome::Finished(next) => document = next,
            read @ Outcome::Read(_) => return Ok(read),
        }
    }
    Ok(Outcome::Finished(document))
}
