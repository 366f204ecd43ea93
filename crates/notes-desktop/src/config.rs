//! Desktop configuration

use std::path::PathBuf;

/// Resolve the database file location.
///
/// `NOTES_DB_PATH` overrides the default, which lives in the platform
/// data directory.
pub fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("NOTES_DB_PATH") {
        return PathBuf::from(path);
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notes")
        .join("notes.db")
}
