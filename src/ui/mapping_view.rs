//! Views for the field-mapping override editor.
//!
//! The row models live in [`Session::mappings`](super::Session); every edit
//! re-serializes the rows to object form and propagates through the
//! controller, so incomplete rows stay visible here without ever reaching
//! the tree.

use cursive::{
    Cursive,
    traits::{Nameable, Resizable},
    views::{BoxedView, Button, EditView, LinearLayout, Panel, TextView},
};

use crate::controller::ConfigStore;
use crate::overrides::{MappingEditor, MappingRow};
use crate::ui::Session;

const SOURCE_WIDTH: usize = 22;
const TARGET_WIDTH: usize = 22;
const TYPE_WIDTH: usize = 12;

/// Which of a row's three fields an edit touches.
#[derive(Clone, Copy)]
enum RowColumn {
    Source,
    Target,
    Kind,
}

fn rows_name(path_str: &str) -> String {
    format!("maprows:{path_str}")
}

fn draft_name(path_str: &str, column: &str) -> String {
    format!("mapnew-{column}:{path_str}")
}

/// Build the mapping editor card.
pub(crate) fn mapping_view<S: ConfigStore + 'static>(editor: &MappingEditor) -> BoxedView {
    let path_str = editor.path.to_string();

    let header = LinearLayout::horizontal()
        .child(TextView::new("Excel Field").fixed_width(SOURCE_WIDTH))
        .child(TextView::new("PDF Field").fixed_width(TARGET_WIDTH))
        .child(TextView::new("Type").fixed_width(TYPE_WIDTH));

    let draft_row = LinearLayout::horizontal()
        .child(
            EditView::new()
                .with_name(draft_name(&path_str, "src"))
                .fixed_width(SOURCE_WIDTH),
        )
        .child(
            EditView::new()
                .with_name(draft_name(&path_str, "dst"))
                .fixed_width(TARGET_WIDTH),
        )
        .child(
            EditView::new()
                .with_name(draft_name(&path_str, "type"))
                .fixed_width(TYPE_WIDTH),
        )
        .child(Button::new("Add", {
            let path_str = path_str.clone();
            move |siv| add_row::<S>(siv, &path_str)
        }));

    let body = LinearLayout::vertical()
        .child(TextView::new(editor.description.clone()))
        .child(header)
        .child(
            LinearLayout::vertical()
                .child(rows_view::<S>(&path_str, editor.rows()))
                .with_name(rows_name(&path_str)),
        )
        .child(TextView::new("New mapping:"))
        .child(draft_row);

    BoxedView::boxed(Panel::new(body).title(editor.title.clone()))
}

/// One layout with an editable row per mapping.
fn rows_view<S: ConfigStore + 'static>(path_str: &str, rows: &[MappingRow]) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    if rows.is_empty() {
        layout.add_child(TextView::new("No field mappings configured."));
        return layout;
    }
    for (index, row) in rows.iter().enumerate() {
        let mut line = LinearLayout::horizontal();
        line.add_child(
            row_edit::<S>(path_str, index, RowColumn::Source, &row.source).fixed_width(SOURCE_WIDTH),
        );
        line.add_child(
            row_edit::<S>(path_str, index, RowColumn::Target, &row.target).fixed_width(TARGET_WIDTH),
        );
        line.add_child(
            row_edit::<S>(path_str, index, RowColumn::Kind, &row.kind).fixed_width(TYPE_WIDTH),
        );
        line.add_child(Button::new("Del", {
            let path_str = path_str.to_string();
            move |siv| remove_row::<S>(siv, &path_str, index)
        }));
        layout.add_child(line);
    }
    layout
}

fn row_edit<S: ConfigStore + 'static>(
    path_str: &str,
    index: usize,
    column: RowColumn,
    content: &str,
) -> EditView {
    let path_str = path_str.to_string();
    EditView::new()
        .content(content.to_string())
        .on_edit(move |siv, content, _| {
            update_row::<S>(siv, &path_str, index, column, content);
        })
}

/// Edit one field of one row and propagate the object form.
fn update_row<S: ConfigStore + 'static>(
    siv: &mut Cursive,
    path_str: &str,
    index: usize,
    column: RowColumn,
    value: &str,
) {
    siv.with_user_data(|session: &mut Session<S>| {
        let Some(editor) = session.mappings.get_mut(path_str) else {
            return;
        };
        match column {
            RowColumn::Source => editor.set_source(index, value),
            RowColumn::Target => editor.set_target(index, value),
            RowColumn::Kind => editor.set_kind(index, value),
        }
        let node = editor.to_node();
        let path = editor.path.clone();
        let _ = session.controller.set_value(&path, node);
    });
}

/// Append a row from the draft inputs, when both required fields are set.
fn add_row<S: ConfigStore + 'static>(siv: &mut Cursive, path_str: &str) {
    let source = read_draft(siv, path_str, "src");
    let target = read_draft(siv, path_str, "dst");
    let kind = read_draft(siv, path_str, "type");

    let accepted = siv
        .with_user_data(|session: &mut Session<S>| {
            let Some(editor) = session.mappings.get_mut(path_str) else {
                return false;
            };
            if !editor.push_row(&source, &target, &kind) {
                return false;
            }
            let node = editor.to_node();
            let path = editor.path.clone();
            let _ = session.controller.set_value(&path, node);
            true
        })
        .unwrap_or(false);

    if accepted {
        for column in ["src", "dst", "type"] {
            siv.call_on_name(&draft_name(path_str, column), |view: &mut EditView| {
                let _ = view.set_content("");
            });
        }
        refresh_rows::<S>(siv, path_str);
    }
}

/// Remove a row by position and propagate.
fn remove_row<S: ConfigStore + 'static>(siv: &mut Cursive, path_str: &str, index: usize) {
    siv.with_user_data(|session: &mut Session<S>| {
        let Some(editor) = session.mappings.get_mut(path_str) else {
            return;
        };
        editor.remove_row(index);
        let node = editor.to_node();
        let path = editor.path.clone();
        let _ = session.controller.set_value(&path, node);
    });
    refresh_rows::<S>(siv, path_str);
}

/// Rebuild the rows container after add/remove changed the row count.
fn refresh_rows<S: ConfigStore + 'static>(siv: &mut Cursive, path_str: &str) {
    let rows = siv
        .with_user_data(|session: &mut Session<S>| {
            session
                .mappings
                .get(path_str)
                .map(|editor| editor.rows().to_vec())
        })
        .flatten();
    let Some(rows) = rows else {
        return;
    };
    siv.call_on_name(&rows_name(path_str), |container: &mut LinearLayout| {
        let _ = container.remove_child(0);
        container.add_child(rows_view::<S>(path_str, &rows));
    });
}

fn read_draft(siv: &mut Cursive, path_str: &str, column: &str) -> String {
    siv.call_on_name(&draft_name(path_str, column), |view: &mut EditView| {
        view.get_content().to_string()
    })
    .unwrap_or_default()
}
