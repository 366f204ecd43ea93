//! Note model

use serde::{Deserialize, Serialize};

use crate::util::now_ms;

/// Sentinel id meaning "not yet persisted". Never present in the store.
pub const UNSAVED_ID: i64 = 0;

/// Placeholder title used when a note is saved with a blank title.
pub const UNTITLED: &str = "Untitled";

/// A note in the system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Row id; `UNSAVED_ID` (0) means the note has no persisted identity yet
    pub id: i64,
    /// Title text; may be blank, lists show [`UNTITLED`] in that case
    pub title: String,
    /// Plain text body
    pub content: String,
    /// Last write timestamp (Unix ms); doubles as the ordering key
    pub updated_at: i64,
}

impl Note {
    /// Create a fresh, unsaved note with the given text
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            content: content.into(),
            updated_at: now_ms(),
        }
    }

    /// Whether this note has a persisted identity
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }

    /// Title for display; blank titles fall back to the placeholder
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Case-insensitive substring match over title and content
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_note_new_is_unsaved() {
        let note = Note::new("Shopping", "milk, eggs");
        assert_eq!(note.id, UNSAVED_ID);
        assert!(!note.is_persisted());
        assert!(note.updated_at > 0);
    }

    #[test]
    fn test_display_title_falls_back_for_blank() {
        let blank = Note::new("   ", "body");
        assert_eq!(blank.display_title(), UNTITLED);

        let named = Note::new("Groceries", "body");
        assert_eq!(named.display_title(), "Groceries");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let note = Note::new("Shopping List", "Milk and Eggs");
        assert!(note.matches("shopping"));
        assert!(note.matches("EGGS"));
        assert!(!note.matches("cheese"));
    }
}
