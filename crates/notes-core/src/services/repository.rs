//! Note repository: thin pass-through between controller and store.

use crate::models::Note;
use crate::util::normalize_query;
use crate::Result;

use super::live::{NoteListQuery, NoteQuery};
use super::DatabaseService;

/// Selects which live query to run based on whether a search term is
/// present; forwards writes unchanged. No business logic lives here.
#[derive(Clone)]
pub struct NoteRepository {
    db: DatabaseService,
}

impl NoteRepository {
    /// Create a repository over the given database service
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Observe the note list: filtered when the trimmed query is
    /// non-empty, by plain recency otherwise.
    pub fn observe_notes(&self, query: &str) -> NoteListQuery {
        match normalize_query(query) {
            Some(q) => self.db.observe_by_query(q),
            None => self.db.observe_all(),
        }
    }

    /// Observe a single note by id.
    pub fn observe_note(&self, id: i64) -> NoteQuery {
        self.db.observe_by_id(id)
    }

    /// Insert-or-replace a note; returns the persisted id.
    pub async fn upsert(&self, note: &Note) -> Result<i64> {
        self.db.upsert_note(note).await
    }

    /// Update a note in place.
    pub async fn update(&self, note: &Note) -> Result<()> {
        self.db.update_note(note).await
    }

    /// Delete a note.
    pub async fn delete(&self, note: &Note) -> Result<()> {
        self.db.delete_note(note).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "multi_thread")]
    async fn blank_query_is_equivalent_to_no_filter() {
        let db = DatabaseService::open_in_memory().unwrap();
        let repo = NoteRepository::new(db);

        repo.upsert(&Note::new("Shopping", "milk")).await.unwrap();
        repo.upsert(&Note::new("Work", "meetings")).await.unwrap();

        let mut unfiltered = repo.observe_notes("");
        let mut whitespace = repo.observe_notes("   \t");

        assert_eq!(unfiltered.recv().await.unwrap().len(), 2);
        assert_eq!(whitespace.recv().await.unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn query_text_is_trimmed_before_matching() {
        let db = DatabaseService::open_in_memory().unwrap();
        let repo = NoteRepository::new(db);

        repo.upsert(&Note::new("Shopping", "milk")).await.unwrap();

        let mut live = repo.observe_notes("  milk  ");
        let batch = live.recv().await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].title, "Shopping");
    }
}
