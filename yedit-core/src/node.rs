//! Document node model.
//!
//! A document is an ordered tree of [`Node`]s. Mappings keep their pairs in
//! authored order and may carry keys of any kind; nothing here deduplicates
//! keys, so lookups take the first equal key.

use serde_yaml_ng::{Mapping, Number, Value};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Vec<(Node, Node)>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Coarse kind of a node, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "map",
            NodeKind::Sequence => "array",
            NodeKind::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(s.into()))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Node::Scalar(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// First value whose key stringifies to `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(pairs) => pairs
                .iter()
                .find(|(k, _)| k.to_string() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => write!(f, "{}", scalar),
            Node::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Node::Mapping(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Sequence(seq) => Node::Sequence(seq.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Node::from(k), Node::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                tracing::warn!(tag = %tagged.tag, "dropping YAML tag");
                Node::from(tagged.value)
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Node::Scalar(Scalar::Number(n)) => Value::Number(n),
            Node::Scalar(Scalar::String(s)) => Value::String(s),
            Node::Sequence(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            Node::Mapping(pairs) => {
                let mut map = Mapping::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let key = Value::from(k);
                    // The encoder cannot hold duplicates; the first pair wins.
                    if map.contains_key(&key) {
                        tracing::warn!(key = ?key, "duplicate key dropped on output");
                        continue;
                    }
                    map.insert(key, Value::from(v));
                }
                Value::Mapping(map)
            }
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::string(s)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(Scalar::Number(Number::from(n)))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}
