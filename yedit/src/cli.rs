use crate::codec::{self, DocumentCodec, OutputFormat};
use crate::script;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info_span};
use yedit_core::{apply_all, render_read, Command, Encoder, Outcome};

#[derive(Parser, Debug)]
#[command(name = "yedit")]
#[command(about = "Declarative, path-driven editor for YAML documents")]
#[command(version)]
pub struct Args {
    /// Command script (YAML with a top-level `commands` list)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Source document (reads stdin when omitted or `-`)
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Print the value at this path under the first selected node, then stop
    #[arg(short, long)]
    pub read: Option<String>,

    /// Field criteria for --read, as `key=pattern,key2=pattern2`
    #[arg(short = 'm', long = "match", default_value = "")]
    pub match_fields: String,

    /// Path pattern for --read (empty matches every node)
    #[arg(short, long, default_value = "")]
    pub path: String,

    /// Output format
    #[arg(short = 'o', long, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Write the edited document back to --file instead of stdout
    #[arg(short, long, requires = "file")]
    pub in_place: bool,
}

/// Where the commands for a run come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// The `--read` shortcut; takes precedence over a script.
    Read(Command),
    Script(PathBuf),
}

impl Args {
    pub fn invocation(&self) -> Result<Invocation> {
        if let Some(read) = self.read.as_deref().filter(|r| !r.is_empty()) {
            let command = script::read_shortcut(&self.path, &self.match_fields, read)?;
            return Ok(Invocation::Read(command));
        }
        match &self.script {
            Some(path) => Ok(Invocation::Script(path.clone())),
            None => bail!("no script defined (use --script or --read)"),
        }
    }
}

/// Text produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Document(String),
    Read(String),
}

/// Apply `commands` to `document` and encode the outcome.
pub fn process(
    document: yedit_core::Node,
    commands: &[Command],
    format: OutputFormat,
) -> Result<Rendered> {
    let codec = DocumentCodec::new(format);
    match apply_all(document, commands)? {
        Outcome::Finished(node) => Ok(Rendered::Document(codec.encode(&node)?)),
        Outcome::Read(value) => Ok(Rendered::Read(render_read(&value, &codec)?)),
    }
}

pub fn execute(args: Args) -> Result<()> {
    let invocation = args.invocation()?;
    let commands = match invocation {
        Invocation::Read(command) => vec![command],
        Invocation::Script(path) => script::load_script(&path)?,
    };

    let span = info_span!("edit", commands = commands.len());
    let _enter = span.enter();

    let document = codec::load_document(args.file.as_deref())?;
    match process(document, &commands, args.output_format)? {
        Rendered::Document(text) => {
            if args.in_place {
                let file = args.file.as_deref().context("--in-place needs --file")?;
                codec::write_file(file, &text)?;
                debug!(file = ?file, "document written in place");
            } else {
                print!("{}", text);
            }
        }
        Rendered::Read(text) => {
            debug!("read command ended the run");
            print!("{}", text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::parse_document;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("yedit").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_read_takes_precedence_over_script() {
        let args = args(&["-s", "script.yaml", "-r", "name", "-p", "a", "-m", "k=v"]);
        match args.invocation().unwrap() {
            Invocation::Read(command) => {
                assert_eq!(command.path, "a");
                assert_eq!(command.fields, vec![("k".to_string(), "v".to_string())]);
            }
            other => panic!("unexpected invocation {:?}", other),
        }
    }

    #[test]
    fn test_script_invocation() {
        let args = args(&["--script", "edits.yaml", "--file", "doc.yaml"]);
        assert_eq!(
            args.invocation().unwrap(),
            Invocation::Script(PathBuf::from("edits.yaml"))
        );
    }

    #[test]
    fn test_no_script_defined() {
        let err = args(&["-f", "doc.yaml"]).invocation().unwrap_err();
        assert!(err.to_string().contains("no script defined"));
        assert!(args(&["-r", ""]).invocation().is_err());
    }

    #[test]
    fn test_in_place_requires_file() {
        assert!(Args::try_parse_from(["yedit", "-s", "x.yaml", "-i"]).is_err());
    }

    #[test]
    fn test_process_renders_scalar_read_without_newline() {
        let document = parse_document("a: {b: 42}\n", "test").unwrap();
        let command = script::read_shortcut("a", "", "b").unwrap();
        let rendered = process(document, &[command], OutputFormat::Yaml).unwrap();
        assert_eq!(rendered, Rendered::Read("42".to_string()));
    }

    #[test]
    fn test_process_renders_container_read_as_yaml() {
        let document = parse_document("a: {b: [1, 2]}\n", "test").unwrap();
        let command = script::read_shortcut("", "", "a.b").unwrap();
        let rendered = process(document, &[command], OutputFormat::Yaml).unwrap();
        assert_eq!(rendered, Rendered::Read("- 1\n- 2\n".to_string()));
    }

    #[test]
    fn test_process_reports_edit_errors() {
        let document = parse_document("a: 1\n", "test").unwrap();
        let commands = script::parse_script(
            "commands:\n  - path: a\n    action: append\n    params: 2\n",
        )
        .unwrap();
        let err = process(document, &commands, OutputFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("cannot append"));
    }
}
