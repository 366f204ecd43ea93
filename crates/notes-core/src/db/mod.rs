//! Database layer for Notes

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{NoteDao, SqliteNoteDao};
