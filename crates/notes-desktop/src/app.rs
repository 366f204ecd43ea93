//! Main application component

use dioxus::prelude::*;

use notes_core::{DatabaseService, EditorSnapshot, ListSnapshot, NoteRepository, NotesController};

use crate::config;
use crate::state::{AppState, Screen};
use crate::theme::detect_theme;
use crate::views::{EditorScreen, ListScreen};

/// Root application component
#[component]
pub fn App() -> Element {
    // State signals
    let mut controller: Signal<Option<NotesController>> = use_signal(|| None);
    let mut list = use_signal(ListSnapshot::default);
    let mut editor = use_signal(EditorSnapshot::default);
    let screen = use_signal(|| Screen::List);
    let theme = use_signal(detect_theme);
    let mut initialized = use_signal(|| false);

    // Open the database and start the controller (only once)
    use_effect(move || {
        if initialized() {
            return;
        }
        initialized.set(true); // Mark immediately to prevent double init

        spawn(async move {
            let db_path = config::database_path();
            let db = match DatabaseService::open_path(&db_path) {
                Ok(db) => db,
                Err(e) => {
                    tracing::error!("Failed to open database: {e}");
                    return;
                }
            };
            tracing::info!("Database opened at {}", db_path.display());

            let handle = NotesController::new(NoteRepository::new(db));
            let mut list_rx = handle.watch_list();
            let mut editor_rx = handle.watch_editor();

            list.set(list_rx.borrow().clone());
            editor.set(editor_rx.borrow().clone());
            controller.set(Some(handle));

            // Forward controller snapshots into render signals for the
            // lifetime of the app.
            loop {
                tokio::select! {
                    changed = list_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = list_rx.borrow().clone();
                        list.set(snapshot);
                    }
                    changed = editor_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = editor_rx.borrow().clone();
                        editor.set(snapshot);
                    }
                }
            }
        });
    });

    use_context_provider(|| AppState {
        controller,
        list,
        editor,
        screen,
        theme,
    });

    let colors = theme().palette();
    let body = match screen() {
        Screen::List => rsx! { ListScreen {} },
        Screen::Editor(id) => rsx! { EditorScreen { note_id: id } },
    };

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",

            {body}
        }
    }
}
