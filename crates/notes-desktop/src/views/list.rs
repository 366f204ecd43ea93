//! List view - the searchable, sortable note overview

use dioxus::prelude::*;

use crate::components::{NoteList, SearchBar};
use crate::state::{AppState, Screen};

/// List screen: header with sort toggle and new-note button, search
/// bar, then the live note list.
#[component]
pub fn ListScreen() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let snapshot = (state.list)();

    let sort_label = if snapshot.sort_ascending {
        "Oldest first"
    } else {
        "Newest first"
    };

    rsx! {
        div {
            class: "list-screen",
            style: "display: flex; flex-direction: column; height: 100vh;",

            div {
                class: "list-header",
                style: "
                    display: flex;
                    align-items: center;
                    gap: 12px;
                    padding: 12px 16px;
                    border-bottom: 1px solid {colors.border};
                    background: {colors.bg_secondary};
                ",

                h1 {
                    style: "flex: 1; margin: 0; font-size: 18px; color: {colors.text_primary};",
                    "Notes"
                }

                button {
                    class: "sort-toggle",
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
                                controller.toggle_sort().await;
                            });
                        }
                    },
                    "{sort_label}"
                }

                button {
                    class: "new-note",
                    style: "
                        padding: 6px 12px;
                        border: none;
                        border-radius: 6px;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        cursor: pointer;
                    ",
                    onclick: move |_| {
                        state.screen.set(Screen::Editor(0));
                    },
                    "+ New"
                }
            }

            SearchBar {}

            NoteList {}

            if let Some(error) = snapshot.error {
                div {
                    class: "list-error",
                    style: "padding: 8px 16px; color: {colors.error}; font-size: 12px;",
                    "{error}"
                }
            }
        }
    }
}
