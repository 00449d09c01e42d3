use crate::data::{CommentMap, ConfigNode, Path};
use crate::form::field::FormNode;
use crate::overrides::SubEditor;

/// Key name the pages editor claims.
pub const PAGES_KEY: &str = "pages";

/// Stored key holding a field's data binding.
const DATA_KEY: &str = "data_key";
/// Stored key holding a field's widget type (read-only here).
const TYPE_KEY: &str = "type";

/// One field record of a page: `{ type, data_key }`.
///
/// `kind` is display metadata only; the editor lets the operator repoint
/// the data binding but never the structural type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageField {
    /// Field name (the stored key).
    pub name: String,
    /// Widget type tag, shown read-only.
    pub kind: String,
    /// Current data binding.
    pub data_key: String,
}

impl PageField {
    /// Display label: camelCase split into words, first letter capitalized.
    pub fn label(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 4);
        let mut prev_lower = false;
        for ch in self.name.chars() {
            if prev_lower && ch.is_ascii_uppercase() {
                out.push(' ');
            }
            prev_lower = ch.is_ascii_lowercase();
            out.push(ch);
        }
        let mut chars = out.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => out,
        }
    }
}

/// One page: a named map of field records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Index of the page's element in the stored array.
    pub index: usize,
    /// Page name (the single stored key of the element).
    pub name: String,
    /// Field records, in stored order.
    pub fields: Vec<PageField>,
}

impl Page {
    /// Display title: each word's first letter capitalized.
    pub fn title(&self) -> String {
        self.name
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Collapse-state key for this page, independent of tree state.
    pub fn collapse_key(&self) -> String {
        format!("{}-{}", self.index, self.name)
    }
}

/// Paginated editor over a `pages` array.
///
/// The stored form is an array of objects, each mapping a page name to a
/// map of field-name → `{ type, data_key }` records. The editor exposes
/// the structure read-only except for `data_key`, which is rewritten one
/// leaf at a time through a path-addressed `set`; `type`, sibling fields
/// and sibling pages stay untouched. Collapse state is UI-local and never
/// merged into the tree.
#[derive(Debug, Clone)]
pub struct PageBook {
    /// Tree path of the pages array.
    pub path: Path,
    /// Editor card title.
    pub title: String,
    /// Editor description (comment or fallback).
    pub description: String,
    pages: Vec<Page>,
}

impl PageBook {
    /// Build an editor from the stored array form. `None` unless `node`
    /// is an array. Elements and entries that don't look like page records
    /// are skipped rather than rejected.
    pub fn from_node(path: &Path, node: &ConfigNode, comments: &CommentMap) -> Option<Self> {
        let items = node.as_array()?;
        let mut pages = Vec::new();
        for (index, element) in items.iter().enumerate() {
            let Some(entries) = element.as_object() else {
                continue;
            };
            for (page_name, fields_node) in entries {
                let Some(field_map) = fields_node.as_object() else {
                    continue;
                };
                let fields = field_map
                    .iter()
                    .map(|(field_name, record)| PageField {
                        name: field_name.clone(),
                        kind: record
                            .as_object()
                            .and_then(|r| r.get(TYPE_KEY))
                            .and_then(ConfigNode::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        data_key: record
                            .as_object()
                            .and_then(|r| r.get(DATA_KEY))
                            .and_then(ConfigNode::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect();
                pages.push(Page {
                    index,
                    name: page_name.clone(),
                    fields,
                });
            }
        }
        Some(Self {
            path: path.clone(),
            title: "NOP Form Pages Configuration".to_string(),
            description: comments
                .get_or(path, "Configure data key mappings for NOP form pages")
                .to_string(),
            pages,
        })
    }

    /// The pages, in stored order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Path of one field's `data_key` leaf:
    /// `<pages>.<index>.<page>.<field>.data_key`.
    pub fn data_key_path(&self, index: usize, page_name: &str, field_name: &str) -> Path {
        self.path
            .child_index(index)
            .child_key(page_name)
            .child_key(field_name)
            .child_key(DATA_KEY)
    }

    /// Rewrite one field's data binding in the local model.
    ///
    /// Returns the tree path to propagate the edit through, or `None` when
    /// no such record exists (the edit is a no-op).
    pub fn set_data_key(
        &mut self,
        index: usize,
        page_name: &str,
        field_name: &str,
        value: &str,
    ) -> Option<Path> {
        let field = self
            .pages
            .iter_mut()
            .find(|p| p.index == index && p.name == page_name)?
            .fields
            .iter_mut()
            .find(|f| f.name == field_name)?;
        field.data_key = value.to_string();
        Some(self.data_key_path(index, page_name, field_name))
    }
}

/// Registry entry claiming `pages` arrays.
pub struct PagesOverride;

impl SubEditor for PagesOverride {
    fn matches(&self, key: &str, node: &ConfigNode) -> bool {
        key == PAGES_KEY && node.is_array()
    }

    fn build(&self, path: &Path, node: &ConfigNode, comments: &CommentMap) -> Option<FormNode> {
        PageBook::from_node(path, node, comments).map(FormNode::Pages)
    }
}
