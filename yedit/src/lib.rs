//! Script-driven YAML editor built on `yedit-core`.

pub mod cli;
pub mod codec;
pub mod script;

pub use cli::{execute, process, Args, Invocation, Rendered};
pub use codec::{DocumentCodec, OutputFormat};
