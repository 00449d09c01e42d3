use indexmap::IndexMap;

use crate::data::{CommentMap, ConfigNode, Path};
use crate::form::field::FormNode;
use crate::overrides::SubEditor;

/// Key name the field-mapping editor claims.
pub const FIELD_MAPPINGS_KEY: &str = "field_mappings";

/// Stored key holding a row's target field.
const TARGET_KEY: &str = "pdf_field";
/// Stored key holding a row's optional type annotation.
const TYPE_KEY: &str = "type";

/// One editable mapping row: source column → target form field.
///
/// An empty `kind` means "no type annotation".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// Source column name (the stored object key).
    pub source: String,
    /// Target form-field name.
    pub target: String,
    /// Optional type annotation; empty when absent.
    pub kind: String,
}

impl MappingRow {
    /// Whether this row survives serialization: both required fields
    /// non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.source.trim().is_empty() && !self.target.trim().is_empty()
    }
}

/// Table editor over a `field_mappings` object.
///
/// The stored form is an object mapping source names to either a bare
/// string (the target, no type) or `{ "pdf_field": ..., "type": ... }`.
/// Internally the editor holds a row list for easy add/remove/edit; every
/// mutation re-serializes with [`MappingEditor::to_node`] and propagates
/// upward through a path-addressed `set`. Incomplete rows stay visible in
/// the editor but are silently dropped from the persisted form.
#[derive(Debug, Clone)]
pub struct MappingEditor {
    /// Tree path of the mapping object.
    pub path: Path,
    /// Editor card title.
    pub title: String,
    /// Editor description (comment or fallback).
    pub description: String,
    rows: Vec<MappingRow>,
}

impl MappingEditor {
    /// Build an editor from the stored object form. `None` unless `node`
    /// is an object.
    pub fn from_node(path: &Path, node: &ConfigNode, comments: &CommentMap) -> Option<Self> {
        let map = node.as_object()?;
        let rows = map
            .iter()
            .map(|(source, value)| {
                let (target, kind) = match value {
                    // Bare string: the target field with no type annotation.
                    ConfigNode::String(s) => (s.clone(), String::new()),
                    ConfigNode::Object(entry) => (
                        entry
                            .get(TARGET_KEY)
                            .and_then(ConfigNode::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        entry
                            .get(TYPE_KEY)
                            .and_then(ConfigNode::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    ),
                    // Anything else shows up as an incomplete row.
                    _ => (String::new(), String::new()),
                };
                MappingRow {
                    source: source.clone(),
                    target,
                    kind,
                }
            })
            .collect();
        Some(Self {
            path: path.clone(),
            title: "Excel to PDF Field Mappings".to_string(),
            description: comments
                .get_or(path, "Map Excel column names to PDF form field names")
                .to_string(),
            rows,
        })
    }

    /// The current rows, including incomplete ones.
    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    /// Append a row. Returns `false` (no-op) when either required field is
    /// blank after trimming. Accepted values are stored trimmed.
    pub fn push_row(&mut self, source: &str, target: &str, kind: &str) -> bool {
        if source.trim().is_empty() || target.trim().is_empty() {
            return false;
        }
        self.rows.push(MappingRow {
            source: source.trim().to_string(),
            target: target.trim().to_string(),
            kind: kind.trim().to_string(),
        });
        true
    }

    /// Remove the row at `index`. Out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    /// Replace the source field of the row at `index`.
    pub fn set_source(&mut self, index: usize, value: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.source = value.to_string();
        }
    }

    /// Replace the target field of the row at `index`.
    pub fn set_target(&mut self, index: usize, value: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.target = value.to_string();
        }
    }

    /// Replace the type annotation of the row at `index`.
    pub fn set_kind(&mut self, index: usize, value: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.kind = value.to_string();
        }
    }

    /// Serialize back to the stored object form.
    ///
    /// Emits one entry per complete row, in row order; the type annotation
    /// is included only when non-empty after trimming. Bare-string inputs
    /// normalize to object form here. Incomplete rows are dropped.
    pub fn to_node(&self) -> ConfigNode {
        let mut map = IndexMap::new();
        for row in &self.rows {
            if !row.is_complete() {
                continue;
            }
            let mut entry = IndexMap::new();
            entry.insert(
                TARGET_KEY.to_string(),
                ConfigNode::String(row.target.clone()),
            );
            if !row.kind.trim().is_empty() {
                entry.insert(TYPE_KEY.to_string(), ConfigNode::String(row.kind.clone()));
            }
            map.insert(row.source.clone(), ConfigNode::Object(entry));
        }
        ConfigNode::Object(map)
    }
}

/// Registry entry claiming `field_mappings` objects.
pub struct FieldMappingOverride;

impl SubEditor for FieldMappingOverride {
    fn matches(&self, key: &str, node: &ConfigNode) -> bool {
        key == FIELD_MAPPINGS_KEY && node.is_object()
    }

    fn build(&self, path: &Path, node: &ConfigNode, comments: &CommentMap) -> Option<FormNode> {
        MappingEditor::from_node(path, node, comments).map(FormNode::Mapping)
    }
}
