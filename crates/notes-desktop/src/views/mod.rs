//! Application screens

mod editor;
mod list;

pub use editor::EditorScreen;
pub use list::ListScreen;
