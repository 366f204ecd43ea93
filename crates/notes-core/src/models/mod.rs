//! Data models for Notes

mod note;

pub use note::{Note, UNSAVED_ID, UNTITLED};
