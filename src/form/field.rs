use serde_json::Number;

use crate::data::{ConfigNode, Path};
use crate::form::present::SectionLayout;
use crate::form::widget::WidgetKind;
use crate::overrides::field_mapping::MappingEditor;
use crate::overrides::pages::PageBook;

/// One editable leaf bound to a path.
#[derive(Debug, Clone)]
pub struct Field {
    /// Tree path this field writes to.
    pub path: Path,
    /// Display label derived from the key.
    pub label: String,
    /// Human-readable description (comment or generated fallback).
    pub description: String,
    /// Edit widget inferred from the current value.
    pub widget: WidgetKind,
    /// Current value snapshot used to seed the widget.
    pub value: ConfigNode,
    /// Display affordance only; nothing blocks saving.
    pub required: bool,
}

/// A collapsible group of children rendered for an object node.
#[derive(Debug, Clone)]
pub struct Section {
    /// Tree path of the object.
    pub path: Path,
    /// Curated or formatted title.
    pub title: String,
    /// Section description, when a comment exists for the path.
    pub description: Option<String>,
    /// Whether the section starts collapsed.
    pub collapsed: bool,
    /// Grid for flat sections, stacked otherwise.
    pub layout: SectionLayout,
    /// Rendered children, in key order.
    pub children: Vec<FormNode>,
}

/// A two-number array rendered as a linked width/height pair.
#[derive(Debug, Clone)]
pub struct SizePair {
    /// Path of the array node; elements are addressed as `.0` and `.1`.
    pub path: Path,
    /// Label base; the UI appends "Width" / "Height".
    pub label: String,
    /// Description for the width element.
    pub width_description: String,
    /// Description for the height element.
    pub height_description: String,
    /// Current width value.
    pub width: Number,
    /// Current height value.
    pub height: Number,
}

impl SizePair {
    /// Path of the width element.
    pub fn width_path(&self) -> Path {
        self.path.child_index(0)
    }

    /// Path of the height element.
    pub fn height_path(&self) -> Path {
        self.path.child_index(1)
    }
}

/// One node of the built form.
#[derive(Debug, Clone)]
pub enum FormNode {
    /// Collapsible group of children.
    Section(Section),
    /// Editable leaf.
    Field(Field),
    /// Linked width/height numeric pair.
    SizePair(SizePair),
    /// Field-mapping override editor.
    Mapping(MappingEditor),
    /// Paginated structural override editor.
    Pages(PageBook),
}
