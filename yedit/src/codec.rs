//! Document text codec: file/stdin I/O plus YAML and JSON encoding.

use anyhow::{Context, Result};
use serde_yaml_ng as serde_yaml;
use serde_yaml::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use yedit_core::{Encoder, Node};

/// Output encodings for edited documents and read results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    JsonPretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Read from a file, or from stdin when `file` is absent or `-`.
pub fn read_file_or_stdin(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.to_str() != Some("-") => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .with_context(|| "Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Parse YAML text into a document tree; empty input is a null document.
pub fn parse_document(content: &str, source: &str) -> Result<Node> {
    let value: Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML in {}", source))?;
    Ok(Node::from(value))
}

pub fn load_document(file: Option<&Path>) -> Result<Node> {
    let content = read_file_or_stdin(file)?;
    let source = match file {
        Some(path) if path.to_str() != Some("-") => format!("file: {:?}", path),
        _ => "stdin".to_string(),
    };
    parse_document(&content, &source)
}

pub fn write_file(file: &Path, text: &str) -> Result<()> {
    fs::write(file, text).with_context(|| format!("Failed to write file: {:?}", file))
}

/// Encodes nodes in the selected [`OutputFormat`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCodec {
    pub format: OutputFormat,
}

impl DocumentCodec {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Encoder for DocumentCodec {
    type Error = anyhow::Error;

    fn encode(&self, node: &Node) -> Result<String> {
        let value = Value::from(node.clone());
        let text = match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(&value)?,
            OutputFormat::Json => {
                serde_json::to_string(&value).context("Document cannot be encoded as JSON")? + "\n"
            }
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(&value)
                    .context("Document cannot be encoded as JSON")?
                    + "\n"
            }
        };
        Ok(text)
    }
}
