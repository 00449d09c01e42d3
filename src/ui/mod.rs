//! Cursive UI components and event handlers.
//!
//! The UI layer renders the built form tree and routes every edit back into
//! the [`FormController`](crate::controller::FormController) by path. All
//! session-local presentation state (collapse flags, mapping row models,
//! pending save intent) lives in [`Session`], stored as Cursive user data,
//! and is never merged into the configuration tree.

/// Generic form rendering (sections, fields, size pairs).
pub mod form_view;

/// Field-mapping override editor views.
pub mod mapping_view;

/// Paginated pages override editor views.
pub mod pages_view;

use std::collections::HashMap;

use cursive::{
    Cursive,
    views::{Button, Dialog, HideableView, LinearLayout, TextArea},
};
use log::debug;

use crate::controller::{ConfigStore, FormController};
use crate::data::{ConfigNode, Path};
use crate::form::{FormBuilder, FormNode, WidgetKind};
use crate::overrides::{MappingEditor, OverrideRegistry};

pub use form_view::editor_layer;

/// Per-session UI state stored as Cursive user data.
pub struct Session<S> {
    /// The form-state controller owning the document.
    pub controller: FormController<S>,
    /// Override registry consulted on every render.
    pub registry: OverrideRegistry,
    /// Title shown on the root layer.
    pub title: String,
    /// Live mapping-editor models, keyed by path string. Incomplete rows
    /// live here; only complete ones reach the tree.
    pub mappings: HashMap<String, MappingEditor>,
    /// Paths of multi-line widgets, swept into the controller before save.
    pub textareas: Vec<Path>,
    /// Set by the save handler; the runner submits after the UI loop ends.
    pub save_requested: bool,
    /// One-shot message shown when the runner re-enters the loop.
    pub status: Option<String>,
}

impl<S: ConfigStore> Session<S> {
    /// A fresh session around a loaded controller.
    pub fn new(
        controller: FormController<S>,
        registry: OverrideRegistry,
        title: impl Into<String>,
    ) -> Self {
        Self {
            controller,
            registry,
            title: title.into(),
            mappings: HashMap::new(),
            textareas: Vec::new(),
            save_requested: false,
            status: None,
        }
    }

    /// Build the form from the current working copy and reseed the
    /// session-local models (mapping rows, textarea paths).
    pub fn rebuild_form(&mut self) -> Vec<FormNode> {
        let nodes = match self.controller.tree() {
            Some(tree) => {
                FormBuilder::new(self.controller.comments(), &self.registry).build(tree)
            }
            None => Vec::new(),
        };
        self.mappings.clear();
        self.textareas.clear();
        self.collect_models(&nodes);
        nodes
    }

    fn collect_models(&mut self, nodes: &[FormNode]) {
        for node in nodes {
            match node {
                FormNode::Section(section) => self.collect_models(&section.children),
                FormNode::Mapping(editor) => {
                    self.mappings
                        .insert(editor.path.to_string(), editor.clone());
                }
                FormNode::Field(field) => {
                    if field.widget == WidgetKind::TextArea {
                        self.textareas.push(field.path.clone());
                    }
                }
                _ => {}
            }
        }
    }
}

/// View name of a multi-line widget.
pub(crate) fn textarea_name(path: &Path) -> String {
    format!("txt:{path}")
}

/// Apply one path-addressed edit to the controller.
///
/// Resolution failures are "nothing to edit here", not fatal.
pub(crate) fn apply_edit<S: ConfigStore + 'static>(
    siv: &mut Cursive,
    path: &Path,
    value: ConfigNode,
) {
    let result = siv.with_user_data(|session: &mut Session<S>| {
        session.controller.set_value(path, value)
    });
    if let Some(Err(e)) = result {
        debug!("edit at `{path}` dropped: {e}");
    }
}

/// Toggle a named [`HideableView`] and update its header button label.
pub(crate) fn toggle_hideable(siv: &mut Cursive, hide_name: &str, button_name: &str, title: &str) {
    let now_visible = siv.call_on_name(hide_name, |view: &mut HideableView<LinearLayout>| {
        let visible = !view.is_visible();
        view.set_visible(visible);
        visible
    });
    if let Some(visible) = now_visible {
        let marker = if visible { '-' } else { '+' };
        let label = format!("[{marker}] {title}");
        siv.call_on_name(button_name, |button: &mut Button| {
            button.set_label_raw(label);
        });
    }
}

/// Read every multi-line widget back into the controller.
///
/// `TextArea` has no change callback, so its content is collected here
/// before dirtiness is inspected.
fn sweep_textareas<S: ConfigStore + 'static>(siv: &mut Cursive) {
    let paths = siv
        .with_user_data(|session: &mut Session<S>| session.textareas.clone())
        .unwrap_or_default();
    for path in paths {
        let content = siv.call_on_name(&textarea_name(&path), |view: &mut TextArea| {
            view.get_content().to_string()
        });
        if let Some(content) = content {
            apply_edit::<S>(siv, &path, ConfigNode::String(content));
        }
    }
}

/// Global handler: request a save and leave the UI loop.
///
/// The runner performs the actual submit; on failure it re-enters the loop
/// with all edits intact.
pub fn handle_save<S: ConfigStore + 'static>(siv: &mut Cursive) {
    sweep_textareas::<S>(siv);
    let dirty = siv
        .with_user_data(|session: &mut Session<S>| session.controller.is_dirty())
        .unwrap_or(false);
    if !dirty {
        siv.add_layer(Dialog::info("No changes to save."));
        return;
    }
    siv.with_user_data(|session: &mut Session<S>| session.save_requested = true);
    siv.quit();
}

/// Global handler: quit, confirming first when there are unsaved edits.
pub fn handle_quit<S: ConfigStore + 'static>(siv: &mut Cursive) {
    let dirty = siv
        .with_user_data(|session: &mut Session<S>| session.controller.is_dirty())
        .unwrap_or(false);
    if dirty {
        siv.add_layer(
            Dialog::text("Discard unsaved changes?")
                .button("Discard", Cursive::quit)
                .button("Keep editing", |siv| {
                    siv.pop_layer();
                }),
        );
    } else {
        siv.quit();
    }
}

/// Global handler: restore the baseline and re-render the form.
pub fn handle_reset<S: ConfigStore + 'static>(siv: &mut Cursive) {
    sweep_textareas::<S>(siv);
    let dirty = siv
        .with_user_data(|session: &mut Session<S>| {
            let dirty = session.controller.is_dirty();
            session.controller.reset();
            dirty
        })
        .unwrap_or(false);
    if dirty {
        refresh_form::<S>(siv);
    }
}

/// Global handler: pop the top dialog, or quit from the root layer.
pub fn handle_back<S: ConfigStore + 'static>(siv: &mut Cursive) {
    if siv.screen_mut().len() > 1 {
        siv.pop_layer();
    } else {
        handle_quit::<S>(siv);
    }
}

/// Rebuild the root layer from the controller's current working copy.
///
/// Used after reset and after a failed save, where field contents on
/// screen may no longer match the tree.
pub fn refresh_form<S: ConfigStore + 'static>(siv: &mut Cursive) {
    let Some(mut session) = siv.take_user_data::<Session<S>>() else {
        return;
    };
    let nodes = session.rebuild_form();
    let layer = editor_layer::<S>(&session.title, &nodes);
    siv.set_user_data(session);
    siv.pop_layer();
    siv.add_fullscreen_layer(layer);
}
