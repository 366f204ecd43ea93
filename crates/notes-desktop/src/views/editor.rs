//! Editor view - single note draft with autosave

use dioxus::prelude::*;

use crate::components::format_timestamp;
use crate::state::{AppState, Screen};

/// Editor screen for one note. Opening with id 0 starts a fresh draft;
/// the store assigns a real id on the first autosave.
#[component]
pub fn EditorScreen(note_id: i64) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let snapshot = (state.editor)();

    // Inputs render from local echoes so keystrokes are never clobbered
    // by an in-flight snapshot; seeded once from the initial load.
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut seeded = use_signal(|| false);
    let mut load_started = use_signal(|| false);

    use_effect(move || {
        if load_started() {
            return;
        }
        load_started.set(true);

        if let Some(controller) = (state.controller)() {
            spawn(async move {
                controller.load_note(note_id).await;
            });
        }
    });

    use_effect(move || {
        let snapshot = (state.editor)();
        if !seeded() && !snapshot.loading {
            title.set(snapshot.title.clone());
            content.set(snapshot.content.clone());
            seeded.set(true);
        }
    });

    let push_draft = move || {
        if let Some(controller) = (state.controller)() {
            let title = title();
            let content = content();
            spawn(async move {
                controller.update_draft(title, content).await;
            });
        }
    };

    let save_status = if snapshot.last_saved_at > 0 {
        format!("Saved {}", format_timestamp(snapshot.last_saved_at))
    } else {
        "Autosave on".to_string()
    };

    rsx! {
        div {
            class: "editor-screen",
            style: "display: flex; flex-direction: column; height: 100vh;",

            div {
                class: "editor-header",
                style: "
                    display: flex;
                    align-items: center;
                    gap: 12px;
                    padding: 12px 16px;
                    border-bottom: 1px solid {colors.border};
                    background: {colors.bg_secondary};
                ",

                button {
                    class: "back-button",
                    style: "
                        padding: 6px 12px;
                        border: 1px solid {colors.border};
                        border-radius: 6px;
                        background: {colors.bg_primary};
                        color: {colors.text_secondary};
                        cursor: pointer;
                    ",
                    onclick: move |_| {
                        if let Some(controller) = (state.controller)() {
                            spawn(async move {
                                controller.close_editor().await;
                            });
                        }
                        state.screen.set(Screen::List);
                    },
                    "← Back"
                }

                span {
                    class: "save-status",
                    style: "flex: 1; font-size: 12px; color: {colors.text_muted};",
                    "{save_status}"
                }

                // A fresh draft has nothing to delete yet
                if snapshot.id != 0 {
                    button {
                        class: "delete-note",
                        style: "
                            padding: 6px 12px;
                            border: none;
                            border-radius: 6px;
                            background: {colors.error};
                            color: {colors.accent_text};
                            cursor: pointer;
                        ",
                        onclick: move |_| {
                            if let Some(controller) = (state.controller)() {
                                spawn(async move {
                                    if let Err(e) = controller.delete_current_note().await {
                                        tracing::error!("Failed to delete note: {e}");
                                        return;
                                    }
                                    controller.close_editor().await;
                                });
                            }
                            state.screen.set(Screen::List);
                        },
                        "Delete"
                    }
                }
            }

            if snapshot.missing {
                div {
                    class: "missing-banner",
                    style: "
                        padding: 8px 16px;
                        background: {colors.bg_tertiary};
                        color: {colors.text_secondary};
                        font-size: 12px;
                    ",
                    "This note was deleted elsewhere. Keep typing to restore it."
                }
            }

            if let Some(error) = snapshot.error {
                div {
                    class: "editor-error",
                    style: "padding: 8px 16px; color: {colors.error}; font-size: 12px;",
                    "{error}"
                }
            }

            input {
                class: "editor-title",
                r#type: "text",
                placeholder: "Untitled",
                value: "{title}",
                oninput: move |evt| {
                    title.set(evt.value());
                    push_draft();
                },
                style: "
                    padding: 16px;
                    border: none;
                    font-size: 20px;
                    font-weight: 600;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    outline: none;
                ",
            }

            textarea {
                class: "editor-content",
                placeholder: "Start writing...",
                value: "{content}",
                oninput: move |evt| {
                    content.set(evt.value());
                    push_draft();
                },
                style: "
                    flex: 1;
                    padding: 0 16px 16px;
                    border: none;
                    resize: none;
                    font-size: 14px;
                    line-height: 1.6;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                    outline: none;
                ",
            }
        }
    }
}
