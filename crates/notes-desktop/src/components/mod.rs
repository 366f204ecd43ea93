//! Reusable UI components

mod note_card;
mod note_list;
mod search_bar;

pub use note_card::{format_timestamp, NoteCard};
pub use note_list::NoteList;
pub use search_bar::SearchBar;
