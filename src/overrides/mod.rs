//! Pluggable override editors for recurring structural idioms.
//!
//! Before generic recursion, the form builder consults the
//! [`OverrideRegistry`] with `(key, node)`. A registration matches on a
//! structural signature: a key name plus a shape predicate over the node.
//! Registrations are consulted in registration order and the first match
//! wins; when none matches, generic rendering applies.
//!
//! Two editors ship built in:
//!
//! - [`field_mapping`] - table editor for `field_mappings` objects
//! - [`pages`] - paginated editor for `pages` arrays

/// Table editor for `field_mappings` objects.
pub mod field_mapping;

/// Paginated editor for `pages` arrays.
pub mod pages;

use crate::data::{CommentMap, ConfigNode, Path};
use crate::form::field::FormNode;

pub use field_mapping::{FieldMappingOverride, MappingEditor, MappingRow};
pub use pages::{Page, PageBook, PageField, PagesOverride};

/// A specialized sub-editor that replaces generic rendering for a
/// structurally-matched subtree.
pub trait SubEditor {
    /// Whether this editor claims the subtree at `key`.
    fn matches(&self, key: &str, node: &ConfigNode) -> bool;

    /// Build the editor's form node. `None` means the subtree renders as
    /// nothing (claimed but empty/unusable shapes are omitted, not errors).
    fn build(&self, path: &Path, node: &ConfigNode, comments: &CommentMap) -> Option<FormNode>;
}

/// Ordered collection of override editors.
pub struct OverrideRegistry {
    editors: Vec<Box<dyn SubEditor>>,
}

impl OverrideRegistry {
    /// A registry with no editors; everything renders generically.
    pub fn empty() -> Self {
        Self {
            editors: Vec::new(),
        }
    }

    /// A registry with the two built-in editors registered.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(FieldMappingOverride);
        registry.register(PagesOverride);
        registry
    }

    /// Append an editor. Earlier registrations take precedence.
    pub fn register(&mut self, editor: impl SubEditor + 'static) {
        self.editors.push(Box::new(editor));
    }

    /// The first registered editor matching `(key, node)`, if any.
    pub fn find(&self, key: &str, node: &ConfigNode) -> Option<&dyn SubEditor> {
        self.editors
            .iter()
            .map(Box::as_ref)
            .find(|editor| editor.matches(key, node))
    }
}

impl Default for OverrideRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct ClaimAll;

    impl SubEditor for ClaimAll {
        fn matches(&self, _key: &str, _node: &ConfigNode) -> bool {
            true
        }

        fn build(
            &self,
            _path: &Path,
            _node: &ConfigNode,
            _comments: &CommentMap,
        ) -> Option<FormNode> {
            None
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = OverrideRegistry::empty();
        registry.register(ClaimAll);
        registry.register(FieldMappingOverride);

        let node = ConfigNode::from(json!({ "Col A": "field_x" }));
        let editor = registry.find("field_mappings", &node).unwrap();
        // ClaimAll was registered first, so it shadows the mapping editor.
        assert!(editor.build(&Path::root(), &node, &CommentMap::new()).is_none());
    }

    #[test]
    fn builtin_signatures() {
        let registry = OverrideRegistry::builtin();
        let object = ConfigNode::from(json!({ "Col A": "field_x" }));
        let array = ConfigNode::from(json!([]));

        assert!(registry.find("field_mappings", &object).is_some());
        // Shape predicate: an array under the mapping key is not claimed.
        assert!(registry.find("field_mappings", &array).is_none());
        assert!(registry.find("pages", &array).is_some());
        assert!(registry.find("pages", &object).is_none());
        assert!(registry.find("anything_else", &object).is_none());
    }
}
