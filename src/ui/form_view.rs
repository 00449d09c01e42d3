//! Generic form rendering: sections, fields and size pairs.

use cursive::{
    View,
    traits::{Nameable, Resizable, Scrollable},
    views::{
        BoxedView, Button, Checkbox, Dialog, DummyView, EditView, HideableView, LinearLayout,
        Panel, TextArea, TextView,
    },
};
use serde_json::Number;

use crate::controller::ConfigStore;
use crate::data::{ConfigNode, Path};
use crate::form::{Field, FormNode, Section, SectionLayout, SizePair, WidgetKind};
use crate::ui::{
    apply_edit, handle_quit, handle_reset, handle_save, mapping_view, pages_view, textarea_name,
    toggle_hideable,
};

/// Column width for the two-column grid layout.
const GRID_COLUMN_WIDTH: usize = 46;
/// Width of single-line edit widgets.
const EDIT_WIDTH: usize = 40;

/// Build the fullscreen root layer for a form.
///
/// The returned view owns everything it needs; nothing borrows from the
/// form nodes or the session.
pub fn editor_layer<S: ConfigStore + 'static>(
    title: &str,
    nodes: &[FormNode],
) -> impl View + use<S> {
    let mut body = LinearLayout::vertical();
    for node in nodes {
        body.add_child(node_view::<S>(node));
        body.add_child(DummyView);
    }

    Dialog::around(body.scrollable())
        .title(title)
        .button("Save (s)", handle_save::<S>)
        .button("Reset", handle_reset::<S>)
        .button("Quit (q)", handle_quit::<S>)
}

/// Render one form node.
pub(crate) fn node_view<S: ConfigStore + 'static>(node: &FormNode) -> BoxedView {
    match node {
        FormNode::Section(section) => section_view::<S>(section),
        FormNode::Field(field) => field_view::<S>(field),
        FormNode::SizePair(pair) => size_pair_view::<S>(pair),
        FormNode::Mapping(editor) => mapping_view::mapping_view::<S>(editor),
        FormNode::Pages(book) => pages_view::pages_view::<S>(book),
    }
}

fn section_name(path: &Path) -> String {
    format!("sec:{path}")
}

fn section_button_name(path: &Path) -> String {
    format!("secbtn:{path}")
}

fn section_view<S: ConfigStore + 'static>(section: &Section) -> BoxedView {
    let mut body = LinearLayout::vertical();
    if let Some(description) = &section.description {
        body.add_child(TextView::new(description.clone()));
    }

    match section.layout {
        SectionLayout::Grid => {
            // Two columns; odd tails get a spacer.
            let mut row = LinearLayout::horizontal();
            let mut in_row = 0;
            for child in &section.children {
                row.add_child(node_view::<S>(child).fixed_width(GRID_COLUMN_WIDTH));
                in_row += 1;
                if in_row == 2 {
                    body.add_child(row);
                    row = LinearLayout::horizontal();
                    in_row = 0;
                }
            }
            if in_row > 0 {
                body.add_child(row);
            }
        }
        SectionLayout::Stacked => {
            for child in &section.children {
                body.add_child(node_view::<S>(child));
            }
        }
    }

    let mut hideable = HideableView::new(body);
    if section.collapsed {
        hideable.hide();
    }

    let marker = if section.collapsed { '+' } else { '-' };
    let hide_name = section_name(&section.path);
    let button_name = section_button_name(&section.path);
    let title = section.title.clone();
    let header = Button::new_raw(format!("[{marker}] {title}"), {
        let hide_name = hide_name.clone();
        let button_name = button_name.clone();
        move |siv| toggle_hideable(siv, &hide_name, &button_name, &title)
    })
    .with_name(button_name.clone());

    BoxedView::boxed(Panel::new(
        LinearLayout::vertical()
            .child(header)
            .child(hideable.with_name(hide_name)),
    ))
}

fn field_view<S: ConfigStore + 'static>(field: &Field) -> BoxedView {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    let widget: BoxedView = match field.widget {
        WidgetKind::Checkbox => {
            let path = field.path.clone();
            let mut checkbox = Checkbox::new();
            if let ConfigNode::Bool(checked) = field.value {
                let _ = checkbox.set_checked(checked);
            }
            let checkbox = checkbox.on_change(move |siv, checked| {
                apply_edit::<S>(siv, &path, ConfigNode::Bool(checked));
            });
            BoxedView::boxed(
                LinearLayout::horizontal()
                    .child(checkbox)
                    .child(TextView::new(format!(" {label}"))),
            )
        }
        WidgetKind::Numeric => {
            let path = field.path.clone();
            let content = match &field.value {
                ConfigNode::Number(n) => n.to_string(),
                _ => String::new(),
            };
            let edit = EditView::new()
                .content(content)
                .on_edit(move |siv, content, _| {
                    // Keep the last valid value when the buffer does not parse.
                    if let Some(number) = parse_number(content) {
                        apply_edit::<S>(siv, &path, ConfigNode::Number(number));
                    }
                })
                .fixed_width(EDIT_WIDTH);
            labeled(&label, edit)
        }
        WidgetKind::TextArea => {
            let content = field.value.as_str().unwrap_or_default().to_string();
            let area = TextArea::new()
                .content(content)
                .with_name(textarea_name(&field.path))
                .min_height(3)
                .fixed_width(EDIT_WIDTH);
            labeled(&label, area)
        }
        WidgetKind::Url | WidgetKind::Text => {
            let path = field.path.clone();
            let content = field.value.as_str().unwrap_or_default().to_string();
            let edit = EditView::new()
                .content(content)
                .on_edit(move |siv, content, _| {
                    apply_edit::<S>(siv, &path, ConfigNode::String(content.to_string()));
                })
                .fixed_width(EDIT_WIDTH);
            labeled(&label, edit)
        }
    };

    BoxedView::boxed(
        LinearLayout::vertical()
            .child(widget)
            .child(TextView::new(field.description.clone())),
    )
}

fn size_pair_view<S: ConfigStore + 'static>(pair: &SizePair) -> BoxedView {
    let width_column = number_column::<S>(
        format!("{} Width", pair.label),
        &pair.width_description,
        pair.width_path(),
        &pair.width,
    );
    let height_column = number_column::<S>(
        format!("{} Height", pair.label),
        &pair.height_description,
        pair.height_path(),
        &pair.height,
    );
    BoxedView::boxed(
        LinearLayout::horizontal()
            .child(width_column.fixed_width(GRID_COLUMN_WIDTH))
            .child(height_column.fixed_width(GRID_COLUMN_WIDTH)),
    )
}

fn number_column<S: ConfigStore + 'static>(
    label: String,
    description: &str,
    path: Path,
    value: &Number,
) -> impl View + use<S> {
    let edit = EditView::new()
        .content(value.to_string())
        .on_edit(move |siv, content, _| {
            if let Some(number) = parse_number(content) {
                apply_edit::<S>(siv, &path, ConfigNode::Number(number));
            }
        })
        .fixed_width(EDIT_WIDTH / 2);
    LinearLayout::vertical()
        .child(TextView::new(label))
        .child(edit)
        .child(TextView::new(description.to_string()))
}

fn labeled(label: &str, widget: impl View) -> BoxedView {
    BoxedView::boxed(
        LinearLayout::vertical()
            .child(TextView::new(label.to_string()))
            .child(widget),
    )
}

/// Parse an edit buffer as an integer first, then a float.
fn parse_number(content: &str) -> Option<Number> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    if let Ok(i) = content.parse::<i64>() {
        return Some(Number::from(i));
    }
    content.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_parsing_prefers_integers() {
        assert_eq!(parse_number("42"), Some(Number::from(42)));
        assert_eq!(parse_number(" -3 "), Some(Number::from(-3)));
        assert_eq!(parse_number("2.5"), Number::from_f64(2.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
