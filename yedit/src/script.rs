//! Command-script loading.
//!
//! A script is a YAML document with a top-level `commands` list:
//!
//! ```yaml
//! commands:
//!   - path: users\.\d+
//!     has_fields:
//!       role: admin
//!     action: merge
//!     params:
//!       active: true
//! ```

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml_ng as serde_yaml;
use serde_yaml::Value;
use std::path::Path;
use yedit_core::{Action, Command, EditError, Node};

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    commands: Vec<CommandEntry>,
}

#[derive(Debug, Deserialize)]
struct CommandEntry {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    has_fields: IndexMap<String, Value>,
    action: String,
    #[serde(default)]
    params: Value,
}

impl CommandEntry {
    fn into_command(self) -> Result<Command> {
        let action: Action = self.action.parse()?;

        let mut fields = Vec::with_capacity(self.has_fields.len());
        for (key, pattern) in self.has_fields {
            let pattern = match Node::from(pattern) {
                Node::Scalar(scalar) => scalar.to_string(),
                other => {
                    return Err(EditError::Script(format!(
                        "has_fields.{} must be a scalar pattern, got {} node",
                        key,
                        other.kind()
                    ))
                    .into())
                }
            };
            fields.push((key, pattern));
        }

        Ok(Command {
            path: self.path.unwrap_or_default(),
            fields,
            action,
            params: Node::from(self.params),
        })
    }
}

/// Decode a script's text into commands, keeping `params` as authored.
pub fn parse_script(content: &str) -> Result<Vec<Command>> {
    let script: ScriptFile =
        serde_yaml::from_str(content).context("Invalid command script")?;

    script
        .commands
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_command()
                .with_context(|| format!("Invalid command #{}", index + 1))
        })
        .collect()
}

pub fn load_script(file: &Path) -> Result<Vec<Command>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read script: {:?}", file))?;
    let commands =
        parse_script(&content).with_context(|| format!("In script: {:?}", file))?;
    tracing::debug!(count = commands.len(), script = ?file, "loaded command script");
    Ok(commands)
}

/// Parse the `key=pattern,key2=pattern2` shortcut syntax.
///
/// Pieces that are not exactly one `key=pattern` pair are skipped.
pub fn parse_match_fields(expr: &str) -> Vec<(String, String)> {
    expr.split(',')
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(pattern), None) => Some((key.to_string(), pattern.to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Build the single read command for the shortcut flags.
pub fn read_shortcut(path: &str, match_fields: &str, read: &str) -> Result<Command> {
    if read.is_empty() {
        return Err(anyhow!("read path must not be empty"));
    }
    Ok(Command::read(path, parse_match_fields(match_fields), read))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_script() {
        let script = r#"
commands:
  - path: users\.\d+
    has_fields:
      role: admin
      id: 7
    action: merge
    params:
      zeta: 1
      alpha: 2
  - path: tmp
    action: delete
  - action: append
    params: [1, 2]
"#;
        let commands = parse_script(script).unwrap();
        assert_eq!(commands.len(), 3);

        assert_eq!(commands[0].path, "users\\.\\d+");
        assert_eq!(
            commands[0].fields,
            vec![
                ("role".to_string(), "admin".to_string()),
                ("id".to_string(), "7".to_string())
            ]
        );
        assert_eq!(commands[0].action, Action::Merge);
        assert_eq!(commands[0].params.to_string(), "{zeta: 1, alpha: 2}");

        assert_eq!(commands[1].action, Action::Delete);
        assert_eq!(commands[1].params, Node::null());

        assert_eq!(commands[2].path, "");
        assert_eq!(commands[2].params.to_string(), "[1, 2]");
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = parse_script("commands:\n  - action: upsert\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("command #1"), "{}", message);
        assert!(message.contains("upsert"), "{}", message);
    }

    #[test]
    fn test_missing_action_is_rejected() {
        assert!(parse_script("commands:\n  - path: a\n").is_err());
    }

    #[test]
    fn test_container_field_pattern_is_rejected() {
        let script = "commands:\n  - action: delete\n    has_fields:\n      a: [1]\n";
        assert!(parse_script(script).is_err());
    }

    #[test]
    fn test_empty_script_has_no_commands() {
        assert!(parse_script("commands: []\n").unwrap().is_empty());
        assert!(parse_script("{}\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_match_fields() {
        assert_eq!(
            parse_match_fields("a=b,c=d"),
            vec![
                ("a".to_string(), "b".to_string()),
                ("c".to_string(), "d".to_string())
            ]
        );
        assert_eq!(
            parse_match_fields("a=b,broken,x=y=z,k=v"),
            vec![
                ("a".to_string(), "b".to_string()),
                ("k".to_string(), "v".to_string())
            ]
        );
        assert!(parse_match_fields("").is_empty());
    }

    #[test]
    fn test_read_shortcut() {
        let command = read_shortcut("svc\\.\\w+", "kind=web", "port").unwrap();
        assert_eq!(command.action, Action::Read);
        assert_eq!(command.params, Node::from("port"));
        assert_eq!(command.fields.len(), 1);
        assert!(read_shortcut("", "", "").is_err());
    }
}
