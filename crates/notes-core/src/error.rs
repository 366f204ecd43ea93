//! Error types for notes-core

use thiserror::Error;

/// Result type alias using notes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notes-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(i64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
