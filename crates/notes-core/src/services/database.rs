//! Shared database service wrapper used across clients.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::db::{Database, NoteDao, SqliteNoteDao};
use crate::models::Note;
use crate::Result;

use super::live::{NoteListQuery, NoteQuery};

/// Capacity of the change-notification channel. Lagged receivers
/// re-fetch, so a small buffer is enough.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Thread-safe service for store operations.
///
/// Constructed once at process start and handed to the repository and
/// controller by reference; every write broadcasts a change
/// notification that drives the live queries.
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<Mutex<Database>>,
    changed: broadcast::Sender<()>,
}

impl DatabaseService {
    /// Open a database service at the given filesystem path.
    pub fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path)?;
        Ok(Self::from_database(db))
    }

    /// Open an in-memory database service (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    fn from_database(db: Database) -> Self {
        let (changed, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            db: Arc::new(Mutex::new(db)),
            changed,
        }
    }

    /// Subscribe to raw store change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    fn notify_changed(&self) {
        // Send only fails when nobody is listening, which is fine.
        let _ = self.changed.send(());
    }

    /// All notes ordered by recency descending.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let db = self.db.lock().await;
        SqliteNoteDao::new(db.connection()).list_by_recency()
    }

    /// Notes matching the query substring, ordered by recency descending.
    pub async fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        let db = self.db.lock().await;
        SqliteNoteDao::new(db.connection()).list_by_query(query)
    }

    /// Fetch a note by id.
    pub async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let db = self.db.lock().await;
        SqliteNoteDao::new(db.connection()).get(id)
    }

    /// Insert-or-replace a note; returns the persisted id.
    pub async fn upsert_note(&self, note: &Note) -> Result<i64> {
        let id = {
            let db = self.db.lock().await;
            SqliteNoteDao::new(db.connection()).upsert(note)?
        };
        self.notify_changed();
        Ok(id)
    }

    /// Update an existing note in place.
    pub async fn update_note(&self, note: &Note) -> Result<()> {
        {
            let db = self.db.lock().await;
            SqliteNoteDao::new(db.connection()).update(note)?;
        }
        self.notify_changed();
        Ok(())
    }

    /// Delete a note by id.
    pub async fn delete_note(&self, note: &Note) -> Result<()> {
        {
            let db = self.db.lock().await;
            SqliteNoteDao::new(db.connection()).delete(note)?;
        }
        self.notify_changed();
        Ok(())
    }

    /// Run arbitrary SQL against the store, for tests that need to
    /// corrupt it.
    #[cfg(test)]
    pub(crate) async fn execute_raw(&self, sql: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute_batch(sql)?;
        Ok(())
    }

    /// Live query over all notes, recency descending.
    pub fn observe_all(&self) -> NoteListQuery {
        NoteListQuery::new(self.clone(), None)
    }

    /// Live query over notes matching a substring, recency descending.
    pub fn observe_by_query(&self, query: impl Into<String>) -> NoteListQuery {
        NoteListQuery::new(self.clone(), Some(query.into()))
    }

    /// Live point lookup by id.
    pub fn observe_by_id(&self, id: i64) -> NoteQuery {
        NoteQuery::new(self.clone(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "multi_thread")]
    async fn in_memory_upsert_and_list_roundtrip() {
        let service = DatabaseService::open_in_memory().unwrap();

        let id = service
            .upsert_note(&Note::new("hello", "core"))
            .await
            .unwrap();
        assert_ne!(id, 0);

        let notes = service.list_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "hello");
        assert_eq!(notes[0].id, id);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn writes_broadcast_a_change_notification() {
        let service = DatabaseService::open_in_memory().unwrap();
        let mut rx = service.subscribe();

        service
            .upsert_note(&Note::new("ping", ""))
            .await
            .unwrap();

        rx.recv().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_notifies_and_removes() {
        let service = DatabaseService::open_in_memory().unwrap();

        let id = service.upsert_note(&Note::new("gone", "")).await.unwrap();
        let mut persisted = service.get_note(id).await.unwrap().unwrap();
        persisted.updated_at = 0; // delete matches by id only

        let mut rx = service.subscribe();
        service.delete_note(&persisted).await.unwrap();
        rx.recv().await.unwrap();

        assert!(service.get_note(id).await.unwrap().is_none());
    }
}
