use std::path::Path as FsPath;

pub use cursive;
use cursive::{Cursive, CursiveExt, event::Key, views::Dialog};

use crate::{
    controller::{ConfigStore, FormController},
    overrides::OverrideRegistry,
    store::FileStore,
    ui::{Session, editor_layer, handle_back, handle_quit, handle_save},
};

/// Run the configuration editor over a file on disk.
///
/// Comments come from `comments` when given, otherwise from the sibling
/// `<stem>-comments.json`. Returns `true` when changes were saved.
///
/// # Errors
///
/// Returns errors when loading or saving the file fails.
pub async fn run_file(
    config_path: impl AsRef<FsPath>,
    comments: Option<&FsPath>,
) -> anyhow::Result<bool> {
    let config_path = config_path.as_ref();
    let store = match comments {
        Some(path) => FileStore::with_comments(config_path, path),
        None => FileStore::new(config_path),
    };
    let name = config_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "configuration".to_string());
    run(store, &format!("Configuration Editor: {name}")).await
}

/// Run the configuration editor against any persistence backend.
///
/// Loads the document, runs the Cursive loop, and submits when the
/// operator requested a save. A failed save re-enters the loop with the
/// message shown and every edit intact, so nothing has to be re-entered.
///
/// # Errors
///
/// Returns errors when the initial load fails and the operator declines to
/// retry. Save errors are surfaced inside the UI and retried from there.
pub async fn run<S: ConfigStore + 'static>(store: S, title: &str) -> anyhow::Result<bool> {
    #[cfg(feature = "logging")]
    {
        cursive::logger::init();
        cursive::logger::set_filter_levels_from_env();
    }

    let mut controller = FormController::new(store);
    // Retryable empty state: no partial document is ever shown.
    while let Err(e) = controller.load().await {
        if !confirm_retry(&format!("Failed to load configuration: {e:#}")) {
            return Err(e);
        }
    }

    let mut session = Session::new(controller, OverrideRegistry::builtin(), title);
    loop {
        let nodes = session.rebuild_form();
        let layer = editor_layer::<S>(&session.title, &nodes);
        let status = session.status.take();

        let mut siv = Cursive::default();
        siv.set_user_data(session);

        siv.add_global_callback('q', handle_quit::<S>);
        siv.add_global_callback('Q', handle_quit::<S>);
        siv.add_global_callback('s', handle_save::<S>);
        siv.add_global_callback('S', handle_save::<S>);
        siv.add_global_callback(Key::Esc, handle_back::<S>);
        siv.add_global_callback('~', Cursive::toggle_debug_console);

        siv.add_fullscreen_layer(layer);
        if let Some(message) = status {
            siv.add_layer(Dialog::info(message));
        }

        siv.run();

        session = siv.take_user_data::<Session<S>>().unwrap();
        if !session.save_requested {
            return Ok(false);
        }
        session.save_requested = false;

        match session.controller.submit().await {
            Ok(saved) => return Ok(saved),
            Err(e) => {
                session.status = Some(format!("Save failed: {e:#}. Your edits are preserved."));
            }
        }
    }
}

/// Show a load error and ask whether to retry.
fn confirm_retry(message: &str) -> bool {
    let mut siv = Cursive::default();
    siv.set_user_data(false);
    siv.add_layer(
        Dialog::text(message.to_string())
            .title("Load failed")
            .button("Retry", |siv| {
                siv.set_user_data(true);
                siv.quit();
            })
            .button("Quit", Cursive::quit),
    );
    siv.run();
    siv.take_user_data::<bool>().unwrap_or(false)
}
