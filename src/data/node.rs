use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::data::{
    error::TreeError,
    path::{Path, Segment},
};

/// Reserved suffix marking a hidden object key.
///
/// Hidden keys are excluded from rendering and recursive descent but are
/// preserved unmodified in the working copy and resubmitted on save.
pub const HIDDEN_SUFFIX: &str = "__HIDDEN";

/// Whether an object key is hidden from the editor.
pub fn is_hidden_key(key: &str) -> bool {
    key.ends_with(HIDDEN_SUFFIX)
}

/// One node of a configuration tree.
///
/// A closed tagged union mirroring the JSON data model, with object member
/// order preserved. `Null` is carried so loaded documents round-trip, but the
/// renderer treats it as "absent" and never produces a widget for it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    /// Absent value. Preserved on save, never rendered.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar (integer or float).
    Number(Number),
    /// String scalar.
    String(String),
    /// Ordered sequence of nodes.
    Array(Vec<ConfigNode>),
    /// Ordered mapping from key to node. Insertion order is significant
    /// for display order.
    Object(IndexMap<String, ConfigNode>),
}

impl ConfigNode {
    /// Kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigNode::Null => "null",
            ConfigNode::Bool(_) => "boolean",
            ConfigNode::Number(_) => "number",
            ConfigNode::String(_) => "string",
            ConfigNode::Array(_) => "array",
            ConfigNode::Object(_) => "object",
        }
    }

    /// Whether this node is a terminal value (string, number or boolean).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ConfigNode::Bool(_) | ConfigNode::Number(_) | ConfigNode::String(_)
        )
    }

    /// Whether this node is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, ConfigNode::Object(_))
    }

    /// Whether this node is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, ConfigNode::Array(_))
    }

    /// The object map, if this node is an object.
    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigNode>> {
        match self {
            ConfigNode::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The element list, if this node is an array.
    pub fn as_array(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The string value, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// Walk `path` and return the addressed node.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] when a key is missing or an index is out of
    /// bounds; [`TreeError::TypeMismatch`] when a segment kind does not match
    /// the node it is applied to (index into an object, key into an array,
    /// any segment into a leaf). Both carry the path up to the failing
    /// segment.
    pub fn get(&self, path: &Path) -> Result<&ConfigNode, TreeError> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = match (current, segment) {
                (ConfigNode::Object(map), Segment::Key(key)) => {
                    map.get(key).ok_or_else(|| TreeError::NotFound {
                        path: path.prefix(depth + 1).to_string(),
                    })?
                }
                (ConfigNode::Array(items), Segment::Index(index)) => {
                    items.get(*index).ok_or_else(|| TreeError::NotFound {
                        path: path.prefix(depth + 1).to_string(),
                    })?
                }
                (node, segment) => {
                    return Err(TreeError::TypeMismatch {
                        path: path.prefix(depth + 1).to_string(),
                        expected: match segment {
                            Segment::Key(_) => "object".to_string(),
                            Segment::Index(_) => "array".to_string(),
                        },
                        actual: node.kind_name().to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Mutable variant of [`ConfigNode::get`].
    pub fn get_mut(&mut self, path: &Path) -> Result<&mut ConfigNode, TreeError> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = match (current, segment) {
                (ConfigNode::Object(map), Segment::Key(key)) => {
                    map.get_mut(key).ok_or_else(|| TreeError::NotFound {
                        path: path.prefix(depth + 1).to_string(),
                    })?
                }
                (ConfigNode::Array(items), Segment::Index(index)) => {
                    items.get_mut(*index).ok_or_else(|| TreeError::NotFound {
                        path: path.prefix(depth + 1).to_string(),
                    })?
                }
                (node, segment) => {
                    return Err(TreeError::TypeMismatch {
                        path: path.prefix(depth + 1).to_string(),
                        expected: match segment {
                            Segment::Key(_) => "object".to_string(),
                            Segment::Index(_) => "array".to_string(),
                        },
                        actual: node.kind_name().to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Replace the node at `path` with `value`, in place.
    ///
    /// Ancestors and unrelated siblings are structurally unchanged.
    /// Intermediate containers are not auto-created: setting a path whose
    /// parent does not exist fails with the same errors as [`ConfigNode::get`].
    pub fn set(&mut self, path: &Path, value: ConfigNode) -> Result<(), TreeError> {
        let slot = self.get_mut(path)?;
        *slot = value;
        Ok(())
    }
}

impl From<Value> for ConfigNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigNode::Null,
            Value::Bool(b) => ConfigNode::Bool(b),
            Value::Number(n) => ConfigNode::Number(n),
            Value::String(s) => ConfigNode::String(s),
            Value::Array(items) => {
                ConfigNode::Array(items.into_iter().map(ConfigNode::from).collect())
            }
            Value::Object(map) => ConfigNode::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        match node {
            ConfigNode::Null => Value::Null,
            ConfigNode::Bool(b) => Value::Bool(b),
            ConfigNode::Number(n) => Value::Number(n),
            ConfigNode::String(s) => Value::String(s),
            ConfigNode::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            ConfigNode::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> ConfigNode {
        ConfigNode::from(json!({
            "app_name": "procedures",
            "window_size": [800, 600],
            "nop": {
                "timeout": 30,
                "pages": [
                    { "page one": { "field_a": { "type": "text", "data_key": "a" } } }
                ]
            }
        }))
    }

    #[test]
    fn get_by_path() {
        let tree = tree();
        let node = tree.get(&Path::parse("nop.timeout")).unwrap();
        assert_eq!(node, &ConfigNode::from(json!(30)));

        let node = tree
            .get(&Path::parse("nop.pages.0.page one.field_a.data_key"))
            .unwrap();
        assert_eq!(node.as_str(), Some("a"));
    }

    #[test]
    fn get_missing_key_is_not_found() {
        let err = tree().get(&Path::parse("nop.missing")).unwrap_err();
        assert_eq!(
            err,
            TreeError::NotFound {
                path: "nop.missing".to_string()
            }
        );
    }

    #[test]
    fn get_index_out_of_bounds_is_not_found() {
        let err = tree().get(&Path::parse("nop.pages.5")).unwrap_err();
        assert_eq!(
            err,
            TreeError::NotFound {
                path: "nop.pages.5".to_string()
            }
        );
    }

    #[test]
    fn index_into_object_is_type_mismatch() {
        let err = tree().get(&Path::parse("nop.0")).unwrap_err();
        assert!(matches!(err, TreeError::TypeMismatch { .. }));
    }

    #[test]
    fn segment_into_leaf_is_type_mismatch() {
        let err = tree().get(&Path::parse("app_name.x")).unwrap_err();
        assert_eq!(
            err,
            TreeError::TypeMismatch {
                path: "app_name.x".to_string(),
                expected: "object".to_string(),
                actual: "string".to_string(),
            }
        );
    }

    #[test]
    fn set_replaces_leaf_without_touching_siblings() {
        let mut tree = tree();
        tree.set(&Path::parse("nop.timeout"), ConfigNode::from(json!(60)))
            .unwrap();
        assert_eq!(tree.get(&Path::parse("nop.timeout")).unwrap(), &ConfigNode::from(json!(60)));
        // Sibling subtree untouched.
        assert_eq!(
            tree.get(&Path::parse("nop.pages.0.page one.field_a.type"))
                .unwrap()
                .as_str(),
            Some("text")
        );
        assert_eq!(
            tree.get(&Path::parse("app_name")).unwrap().as_str(),
            Some("procedures")
        );
    }

    #[test]
    fn set_does_not_auto_create_parents() {
        let mut tree = tree();
        let err = tree
            .set(&Path::parse("nop.extra.deep"), ConfigNode::Null)
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::NotFound {
                path: "nop.extra".to_string()
            }
        );
    }

    #[test]
    fn value_round_trip_preserves_order_and_null() {
        let value = json!({
            "z": 1,
            "a": null,
            "m": { "second": 2, "first": 1 },
            "size": [800, 600]
        });
        let round = Value::from(ConfigNode::from(value.clone()));
        assert_eq!(round, value);
        let keys: Vec<_> = round.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "m", "size"]);
    }

    #[test]
    fn hidden_key_detection() {
        assert!(is_hidden_key("secret__HIDDEN"));
        assert!(!is_hidden_key("secret"));
        assert!(!is_hidden_key("__HIDDENx"));
    }
}
