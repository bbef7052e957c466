use crate::error::{EditError, Result};
use crate::node::Node;

/// Deep merge `source` pairs into `target`.
///
/// Equal keys whose values are both mappings merge recursively; otherwise
/// the source value wins. Keys absent from `target` are appended in source
/// order.
pub fn merge_mappings(mut target: Vec<(Node, Node)>, source: Vec<(Node, Node)>) -> Vec<(Node, Node)> {
    for (key, value) in source {
        let mut found = false;
        for slot in target.iter_mut().filter(|(k, _)| *k == key) {
            found = true;
            let existing = std::mem::replace(&mut slot.1, Node::null());
            slot.1 = match (existing, value.clone()) {
                (Node::Mapping(inner), Node::Mapping(overlay)) => {
                    Node::Mapping(merge_mappings(inner, overlay))
                }
                (_, overlay) => overlay,
            };
        }
        if !found {
            target.push((key, value));
        }
    }
    target
}

/// Merge `source` into a node of the same container kind.
///
/// Sequences concatenate. Any other pairing is a type mismatch.
pub fn merge_into(target: Node, source: Node) -> Result<Node> {
    match (target, source) {
        (Node::Mapping(target), Node::Mapping(source)) => {
            Ok(Node::Mapping(merge_mappings(target, source)))
        }
        (Node::Sequence(mut target), Node::Sequence(source)) => {
            target.extend(source);
            Ok(Node::Sequence(target))
        }
        (Node::Mapping(_), source) => Err(EditError::TypeMismatch(format!(
            "cannot merge {} node into map node",
            source.kind()
        ))),
        (Node::Sequence(_), source) => Err(EditError::TypeMismatch(format!(
            "cannot merge {} node into array node",
            source.kind()
        ))),
        (Node::Scalar(_), _) => Err(EditError::TypeMismatch(
            "cannot merge into scalar node".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml_ng::Value;

    fn doc(yaml: &str) -> Node {
        Node::from(serde_yaml_ng::from_str::<Value>(yaml).unwrap())
    }

    #[test]
    fn test_merge_overrides_and_appends() {
        let merged = merge_into(doc("{x: 1, y: 2}"), doc("{y: 9, z: 3}")).unwrap();
        assert_eq!(merged, doc("{x: 1, y: 9, z: 3}"));
    }

    #[test]
    fn test_merge_is_deep() {
        let base = doc("project:\n  name: base\n  host: base.local\nvm:\n  memory: 2048\n");
        let overlay = doc("project:\n  name: overlay\nvm:\n  cpus: 4\n");
        let merged = merge_into(base, overlay).unwrap();
        assert_eq!(
            merged,
            doc("project:\n  name: overlay\n  host: base.local\nvm:\n  memory: 2048\n  cpus: 4\n")
        );
    }

    #[test]
    fn test_kind_change_overwrites_wholesale() {
        let merged = merge_into(doc("{a: {b: 1}, l: [1, 2]}"), doc("{a: 5, l: [3]}")).unwrap();
        assert_eq!(merged, doc("{a: 5, l: [3]}"));

        let merged = merge_into(doc("{a: 5}"), doc("{a: {b: 1}}")).unwrap();
        assert_eq!(merged, doc("{a: {b: 1}}"));
    }

    #[test]
    fn test_sequence_merge_concatenates() {
        let merged = merge_into(doc("[1, 2]"), doc("[2, 3]")).unwrap();
        assert_eq!(merged, doc("[1, 2, 2, 3]"));
    }

    #[test]
    fn test_non_string_keys_compare_structurally() {
        let merged = merge_into(doc("{1: a, \"1\": b}"), doc("{1: c}")).unwrap();
        assert_eq!(merged, doc("{1: c, \"1\": b}"));
    }

    #[test]
    fn test_mismatched_kinds_fail() {
        assert!(matches!(
            merge_into(doc("[1]"), doc("{a: 1}")),
            Err(EditError::TypeMismatch(_))
        ));
        assert!(merge_into(doc("{a: 1}"), doc("[1]")).is_err());
        assert!(merge_into(doc("{a: 1}"), doc("scalar")).is_err());
        assert!(merge_into(doc("1"), doc("{a: 1}")).is_err());
    }
}
