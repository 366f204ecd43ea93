//! Note list component

use dioxus::prelude::*;

use super::NoteCard;
use crate::state::{AppState, Screen};

/// Scrollable list of note cards driven by the list snapshot.
#[component]
pub fn NoteList() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let snapshot = (state.list)();

    rsx! {
        div {
            class: "note-list",
            style: "
                flex: 1;
                overflow-y: auto;
                background: {colors.bg_primary};
            ",

            if snapshot.notes.is_empty() {
                div {
                    style: "
                        padding: 20px;
                        text-align: center;
                        color: {colors.text_muted};
                    ",
                    if snapshot.query.trim().is_empty() {
                        "No notes yet"
                    } else {
                        "No notes match your search"
                    }
                }
            } else {
                for note in snapshot.notes {
                    {
                        let note_id = note.id;
                        let title = note.display_title().to_string();
                        let preview = note.content.clone();

                        rsx! {
                            NoteCard {
                                key: "{note_id}",
                                title,
                                preview,
                                updated_at: note.updated_at,
                                onclick: move |_| {
                                    state.screen.set(Screen::Editor(note_id));
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
