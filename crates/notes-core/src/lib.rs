//! notes-core - Core library for Notes
//!
//! This crate contains the data model, the `SQLite` persistence layer,
//! and the note state controller shared by every interface.

pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod util;

pub use controller::{EditorSnapshot, ListSnapshot, NotesController, AUTOSAVE_DEBOUNCE};
pub use error::{Error, Result};
pub use models::Note;
pub use services::{DatabaseService, NoteRepository};
