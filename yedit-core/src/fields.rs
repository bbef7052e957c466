//! Sibling-field criteria over mapping nodes.

use crate::error::Result;
use crate::node::Node;
use crate::pattern;
use regex::Regex;
use std::collections::HashMap;

/// Compiled `key -> pattern` criteria.
#[derive(Debug, Clone, Default)]
pub struct FieldCriteria {
    criteria: Vec<(String, Regex)>,
}

impl FieldCriteria {
    pub fn compile<K, P>(fields: &[(K, P)]) -> Result<Self>
    where
        K: AsRef<str>,
        P: AsRef<str>,
    {
        let criteria = fields
            .iter()
            .map(|(k, p)| -> Result<(String, Regex)> {
                Ok((k.as_ref().to_string(), pattern::compile(p.as_ref())?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { criteria })
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// True when every criterion finds a scalar sibling whose value matches.
    ///
    /// Only mappings can satisfy criteria; container-valued pairs are not
    /// consulted. Empty criteria match anything.
    pub fn matches(&self, node: &Node) -> bool {
        if self.criteria.is_empty() {
            return true;
        }
        let Node::Mapping(pairs) = node else {
            return false;
        };

        let mut scalars: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            if let Node::Scalar(scalar) = value {
                // Later duplicates overwrite earlier ones.
                scalars.insert(key.to_string(), scalar.to_string());
            }
        }

        self.criteria.iter().all(|(key, regex)| {
            scalars
                .get(key)
                .is_some_and(|value| regex.is_match(value))
        })
    }
}

/// One-shot form of [`FieldCriteria::matches`].
pub fn fields_match<K, P>(fields: &[(K, P)], node: &Node) -> Result<bool>
where
    K: AsRef<str>,
    P: AsRef<str>,
{
    Ok(FieldCriteria::compile(fields)?.matches(node))
}
