//! Views for the paginated pages override editor.
//!
//! Structure is read-only here except each field's `data_key`, which is
//! rewritten one leaf at a time through the controller. Collapse state is
//! keyed by `{index}-{name}` and lives entirely in the view layer.

use cursive::{
    View,
    traits::{Nameable, Resizable},
    views::{BoxedView, Button, EditView, HideableView, LinearLayout, Panel, TextView},
};

use crate::controller::ConfigStore;
use crate::data::ConfigNode;
use crate::overrides::{Page, PageBook};
use crate::ui::{apply_edit, toggle_hideable};

const LABEL_WIDTH: usize = 34;
const DATA_KEY_WIDTH: usize = 34;

fn page_name(book: &PageBook, page: &Page) -> String {
    format!("page:{}:{}", book.path, page.collapse_key())
}

fn page_button_name(book: &PageBook, page: &Page) -> String {
    format!("pagebtn:{}:{}", book.path, page.collapse_key())
}

/// Build the pages editor card.
pub(crate) fn pages_view<S: ConfigStore + 'static>(book: &PageBook) -> BoxedView {
    let mut body = LinearLayout::vertical().child(TextView::new(book.description.clone()));

    if book.pages().is_empty() {
        body.add_child(TextView::new("No pages configured."));
        return BoxedView::boxed(Panel::new(body).title(book.title.clone()));
    }

    for page in book.pages() {
        body.add_child(page_view::<S>(book, page));
    }

    BoxedView::boxed(Panel::new(body).title(book.title.clone()))
}

fn page_view<S: ConfigStore + 'static>(book: &PageBook, page: &Page) -> impl View + use<S> {
    let mut fields = LinearLayout::vertical();
    for field in &page.fields {
        let data_key_path = book.data_key_path(page.index, &page.name, &field.name);
        let label = match field.kind.as_str() {
            "" => field.label(),
            kind => format!("{} [{kind}]", field.label()),
        };
        fields.add_child(
            LinearLayout::horizontal()
                .child(TextView::new(label).fixed_width(LABEL_WIDTH))
                .child(
                    EditView::new()
                        .content(field.data_key.clone())
                        .on_edit(move |siv, content, _| {
                            apply_edit::<S>(
                                siv,
                                &data_key_path,
                                ConfigNode::String(content.to_string()),
                            );
                        })
                        .fixed_width(DATA_KEY_WIDTH),
                ),
        );
    }

    let hide_name = page_name(book, page);
    let button_name = page_button_name(book, page);
    let title = format!("{} ({} form fields)", page.title(), page.fields.len());
    let header = Button::new_raw(format!("[-] {title}"), {
        let hide_name = hide_name.clone();
        let button_name = button_name.clone();
        move |siv| toggle_hideable(siv, &hide_name, &button_name, &title)
    })
    .with_name(button_name.clone());

    LinearLayout::vertical()
        .child(header)
        .child(HideableView::new(fields).with_name(hide_name))
}
