//! Selection-and-mutation engine for hierarchical documents.
//!
//! A [`Command`] selects nodes by canonical path pattern and by the values
//! of their scalar sibling fields, then deletes, replaces, merges into,
//! appends to, or reads each selected node. [`apply_all`] threads a document
//! through a command list and reports an [`Outcome`].

pub mod action;
pub mod command;
pub mod encode;
pub mod error;
pub mod fields;
pub mod merge;
pub mod node;
pub mod path;
pub mod pattern;
pub mod walker;

pub use command::{Action, Command, Timing};
pub use encode::{render_read, Encoder};
pub use error::{EditError, Result};
pub use node::{Node, NodeKind, Scalar};
pub use walker::{apply, apply_all, Outcome};
