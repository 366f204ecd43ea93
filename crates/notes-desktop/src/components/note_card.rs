//! Note card component

use chrono::{DateTime, Local};
use dioxus::prelude::*;

use crate::state::AppState;

/// Render a unix-millisecond timestamp as a short local date-time.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms).map_or_else(String::new, |dt| {
        dt.with_timezone(&Local).format("%d %b, %H:%M").to_string()
    })
}

/// A single note row rendered in the note list.
#[component]
pub fn NoteCard(
    title: String,
    preview: String,
    updated_at: i64,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let preview = if preview.is_empty() {
        "(empty note)".to_string()
    } else {
        preview
    };

    rsx! {
        div {
            class: "note-item",
            style: "
                padding: 12px 16px;
                border-bottom: 1px solid {colors.border_light};
                cursor: pointer;
                background: {colors.bg_primary};
                transition: background 0.15s;
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                class: "note-title",
                style: "
                    font-weight: 500;
                    margin-bottom: 4px;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    color: {colors.text_primary};
                ",
                "{title}"
            }

            div {
                class: "note-preview",
                style: "
                    font-size: 12px;
                    color: {colors.text_secondary};
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                ",
                "{preview}"
            }

            div {
                class: "note-timestamp",
                style: "
                    font-size: 11px;
                    margin-top: 4px;
                    color: {colors.text_muted};
                ",
                {format_timestamp(updated_at)}
            }
        }
    }
}
