use log::debug;

use crate::data::{CommentMap, ConfigNode, Path, is_hidden_key};
use crate::form::field::{Field, FormNode, Section, SizePair};
use crate::form::{present, widget::WidgetKind};
use crate::overrides::OverrideRegistry;

/// Walks a configuration tree top-down and produces the form to render.
///
/// For each subtree the registry is consulted first; when no override
/// matches, generic recursion applies the presentation policy and widget
/// inference. Hidden keys, `null` leaves and unrecognized array shapes
/// produce nothing.
pub struct FormBuilder<'a> {
    comments: &'a CommentMap,
    registry: &'a OverrideRegistry,
}

impl<'a> FormBuilder<'a> {
    /// A builder over the given comments and override registry.
    pub fn new(comments: &'a CommentMap, registry: &'a OverrideRegistry) -> Self {
        Self { comments, registry }
    }

    /// Build the form for a root object.
    ///
    /// Non-object roots produce an empty form; the document root is always
    /// an object by contract.
    pub fn build(&self, root: &ConfigNode) -> Vec<FormNode> {
        let Some(map) = root.as_object() else {
            debug!("form root is {}, nothing to render", root.kind_name());
            return Vec::new();
        };
        map.iter()
            .filter(|(key, _)| !is_hidden_key(key))
            .filter_map(|(key, value)| self.render_value(key, &Path::root().child_key(key.clone()), value))
            .collect()
    }

    /// Render one keyed value. `None` means "nothing to render here".
    fn render_value(&self, key: &str, path: &Path, value: &ConfigNode) -> Option<FormNode> {
        if is_hidden_key(key) {
            return None;
        }

        // Overrides win over generic recursion; first registration wins.
        if let Some(editor) = self.registry.find(key, value) {
            return editor.build(path, value, self.comments);
        }

        match value {
            ConfigNode::Null => None,
            ConfigNode::Object(map) => {
                let visible = || map.iter().filter(|(k, _)| !is_hidden_key(k));
                let children = visible()
                    .filter_map(|(child_key, child)| {
                        self.render_value(child_key, &path.child_key(child_key.clone()), child)
                    })
                    .collect();
                Some(FormNode::Section(Section {
                    path: path.clone(),
                    title: present::section_title(key),
                    description: self.comments.get(path).map(str::to_string),
                    collapsed: present::collapsed_by_default(key),
                    layout: present::layout_for(visible().map(|(_, v)| v)),
                    children,
                }))
            }
            ConfigNode::Array(items) => self.render_array(key, path, items),
            _ => Some(self.render_leaf(key, path, value)),
        }
    }

    /// Arrays have no generic rendering; only the two-number size pair is
    /// recognized here. Everything else is an override's job.
    fn render_array(&self, key: &str, path: &Path, items: &[ConfigNode]) -> Option<FormNode> {
        if let [ConfigNode::Number(width), ConfigNode::Number(height)] = items {
            let label = present::field_label(key);
            return Some(FormNode::SizePair(SizePair {
                path: path.clone(),
                width_description: self
                    .comments
                    .get_or(path, &format!("{label} width value"))
                    .to_string(),
                height_description: self
                    .comments
                    .get_or(path, &format!("{label} height value"))
                    .to_string(),
                width: width.clone(),
                height: height.clone(),
                label,
            }));
        }
        debug!("skipping array `{path}`: no editor for this shape");
        None
    }

    fn render_leaf(&self, key: &str, path: &Path, value: &ConfigNode) -> FormNode {
        let label = present::field_label(key);
        let fallback = format!("Configure {}", label.to_lowercase());
        FormNode::Field(Field {
            path: path.clone(),
            description: self.comments.get_or(path, &fallback).to_string(),
            widget: WidgetKind::infer(value),
            value: value.clone(),
            required: present::required_by_heuristic(path),
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::present::SectionLayout;
    use serde_json::json;

    fn build(value: serde_json::Value) -> Vec<FormNode> {
        let comments = CommentMap::new();
        let registry = OverrideRegistry::builtin();
        FormBuilder::new(&comments, &registry).build(&ConfigNode::from(value))
    }

    #[test]
    fn scenario_single_numeric_field() {
        // { "a": { "b": 5, "c__HIDDEN": "s" } } renders one numeric field for a.b.
        let nodes = build(json!({ "a": { "b": 5, "c__HIDDEN": "s" } }));
        assert_eq!(nodes.len(), 1);
        let FormNode::Section(section) = &nodes[0] else {
            panic!("expected section");
        };
        assert_eq!(section.children.len(), 1);
        let FormNode::Field(field) = &section.children[0] else {
            panic!("expected field");
        };
        assert_eq!(field.path.to_string(), "a.b");
        assert_eq!(field.widget, WidgetKind::Numeric);
    }

    #[test]
    fn hidden_keys_never_render() {
        let nodes = build(json!({
            "secret__HIDDEN": "x",
            "visible": { "inner__HIDDEN": true, "kept": 1 }
        }));
        assert_eq!(nodes.len(), 1);
        let FormNode::Section(section) = &nodes[0] else {
            panic!("expected section");
        };
        assert_eq!(section.children.len(), 1);
    }

    #[test]
    fn override_beats_generic_section() {
        let nodes = build(json!({ "field_mappings": { "Col A": "field_x" } }));
        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], FormNode::Mapping(_)));
    }

    #[test]
    fn pages_override_beats_generic_array_skip() {
        let nodes = build(json!({
            "pages": [
                { "page one": { "f": { "type": "text", "data_key": "k" } } }
            ]
        }));
        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], FormNode::Pages(_)));
    }

    #[test]
    fn two_number_array_is_size_pair() {
        let nodes = build(json!({ "window_size": [800, 600] }));
        assert_eq!(nodes.len(), 1);
        let FormNode::SizePair(pair) = &nodes[0] else {
            panic!("expected size pair");
        };
        assert_eq!(pair.label, "Window Size");
        assert_eq!(pair.width_path().to_string(), "window_size.0");
        assert_eq!(pair.height_path().to_string(), "window_size.1");
    }

    #[test]
    fn other_arrays_and_nulls_render_nothing() {
        let nodes = build(json!({
            "strings": ["a", "b"],
            "mixed": [1, "b"],
            "three": [1, 2, 3],
            "absent": null
        }));
        assert!(nodes.is_empty());
    }

    #[test]
    fn layout_and_collapse_come_from_policy() {
        let nodes = build(json!({
            "timeouts": { "connect": 5, "read": 30 },
            "outer": { "inner": { "x": 1 } }
        }));
        let FormNode::Section(timeouts) = &nodes[0] else {
            panic!("expected section");
        };
        assert!(timeouts.collapsed);
        assert_eq!(timeouts.layout, SectionLayout::Grid);

        let FormNode::Section(outer) = &nodes[1] else {
            panic!("expected section");
        };
        assert!(!outer.collapsed);
        assert_eq!(outer.layout, SectionLayout::Stacked);
    }

    #[test]
    fn comments_feed_descriptions() {
        let mut comments = CommentMap::new();
        comments.insert("app.name", "Shown in the title bar");
        let registry = OverrideRegistry::builtin();
        let nodes = FormBuilder::new(&comments, &registry)
            .build(&ConfigNode::from(json!({ "app": { "name": "x" } })));
        let FormNode::Section(section) = &nodes[0] else {
            panic!("expected section");
        };
        let FormNode::Field(field) = &section.children[0] else {
            panic!("expected field");
        };
        assert_eq!(field.description, "Shown in the title bar");
    }

    #[test]
    fn generated_fallback_description() {
        let nodes = build(json!({ "max_retries": 3 }));
        let FormNode::Field(field) = &nodes[0] else {
            panic!("expected field");
        };
        assert_eq!(field.description, "Configure max retries");
    }
}
