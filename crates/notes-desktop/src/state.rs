//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use notes_core::{EditorSnapshot, ListSnapshot, NotesController};

use crate::theme::ResolvedTheme;

/// Which screen is visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The searchable note list
    List,
    /// The editor for the given note id (0 opens a new draft)
    Editor(i64),
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Controller handle, present once the database has opened
    pub controller: Signal<Option<NotesController>>,
    /// Latest list view-model snapshot
    pub list: Signal<ListSnapshot>,
    /// Latest editor view-model snapshot
    pub editor: Signal<EditorSnapshot>,
    /// Current screen
    pub screen: Signal<Screen>,
    /// Resolved theme (light/dark from the system preference)
    pub theme: Signal<ResolvedTheme>,
}
