//! Row-level note storage operations

use crate::error::{Error, Result};
use crate::models::{Note, UNSAVED_ID};
use rusqlite::{params, Connection};

/// Trait for note storage operations
pub trait NoteDao {
    /// Insert-or-replace a note. Assigns a fresh id when the note
    /// carries the unsaved sentinel; returns the persisted id.
    fn upsert(&self, note: &Note) -> Result<i64>;

    /// Update an existing note in place
    fn update(&self, note: &Note) -> Result<()>;

    /// Delete a note. Matching is by id; the other fields are ignored.
    fn delete(&self, note: &Note) -> Result<()>;

    /// Point lookup by id
    fn get(&self, id: i64) -> Result<Option<Note>>;

    /// All notes, newest first
    fn list_by_recency(&self) -> Result<Vec<Note>>;

    /// Notes whose title or content contains the query, newest first.
    /// Matching is case-insensitive.
    fn list_by_query(&self, query: &str) -> Result<Vec<Note>>;
}

/// `SQLite` implementation of `NoteDao`
pub struct SqliteNoteDao<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteDao<'a> {
    /// Create a new DAO with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }
}

impl NoteDao for SqliteNoteDao<'_> {
    fn upsert(&self, note: &Note) -> Result<i64> {
        if note.id == UNSAVED_ID {
            self.conn.execute(
                "INSERT INTO notes (title, content, updated_at) VALUES (?, ?, ?)",
                params![note.title, note.content, note.updated_at],
            )?;
            Ok(self.conn.last_insert_rowid())
        } else {
            self.conn.execute(
                "INSERT OR REPLACE INTO notes (id, title, content, updated_at) VALUES (?, ?, ?, ?)",
                params![note.id, note.title, note.content, note.updated_at],
            )?;
            Ok(note.id)
        }
    }

    fn update(&self, note: &Note) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE notes SET title = ?, content = ?, updated_at = ? WHERE id = ?",
            params![note.title, note.content, note.updated_at, note.id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(note.id));
        }

        Ok(())
    }

    fn delete(&self, note: &Note) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", params![note.id])?;

        if rows == 0 {
            return Err(Error::NotFound(note.id));
        }

        Ok(())
    }

    fn get(&self, id: i64) -> Result<Option<Note>> {
        let result = self.conn.query_row(
            "SELECT id, title, content, updated_at FROM notes WHERE id = ?",
            params![id],
            Self::parse_note,
        );

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list_by_recency(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, updated_at
             FROM notes
             ORDER BY updated_at DESC, id DESC",
        )?;

        let notes = stmt
            .query_map([], Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    fn list_by_query(&self, query: &str) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, updated_at
             FROM notes
             WHERE title LIKE '%' || ?1 || '%' OR content LIKE '%' || ?1 || '%'
             ORDER BY updated_at DESC, id DESC",
        )?;

        let notes = stmt
            .query_map(params![query], Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn note(title: &str, content: &str, updated_at: i64) -> Note {
        Note {
            id: UNSAVED_ID,
            title: title.to_string(),
            content: content.to_string(),
            updated_at,
        }
    }

    #[test]
    fn test_upsert_assigns_id() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        let id = dao.upsert(&note("Shopping", "milk", 100)).unwrap();
        assert_ne!(id, UNSAVED_ID);

        let fetched = dao.get(id).unwrap().unwrap();
        assert_eq!(fetched.title, "Shopping");
        assert_eq!(fetched.content, "milk");
        assert_eq!(fetched.updated_at, 100);
    }

    #[test]
    fn test_upsert_replaces_existing_row() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        let id = dao.upsert(&note("Original", "one", 100)).unwrap();
        let mut replacement = note("Replaced", "two", 200);
        replacement.id = id;

        let second = dao.upsert(&replacement).unwrap();
        assert_eq!(second, id);

        let notes = dao.list_by_recency().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Replaced");
        assert_eq!(notes[0].updated_at, 200);
    }

    #[test]
    fn test_update_missing_row_fails() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        let mut ghost = note("Ghost", "", 100);
        ghost.id = 42;

        let result = dao.update(&ghost);
        assert!(matches!(result, Err(Error::NotFound(42))));
    }

    #[test]
    fn test_delete() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        let id = dao.upsert(&note("To delete", "", 100)).unwrap();
        let mut persisted = note("To delete", "", 100);
        persisted.id = id;

        dao.delete(&persisted).unwrap();
        assert!(dao.get(id).unwrap().is_none());
        assert!(dao.list_by_recency().unwrap().is_empty());
    }

    #[test]
    fn test_list_by_recency_orders_descending() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        dao.upsert(&note("old", "", 100)).unwrap();
        dao.upsert(&note("new", "", 300)).unwrap();
        dao.upsert(&note("middle", "", 200)).unwrap();

        let notes = dao.list_by_recency().unwrap();
        let timestamps: Vec<i64> = notes.iter().map(|n| n.updated_at).collect();
        assert_eq!(timestamps, vec![300, 200, 100]);
    }

    #[test]
    fn test_list_by_query_matches_title_and_content() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        dao.upsert(&note("Shopping", "milk and eggs", 100)).unwrap();
        dao.upsert(&note("Work", "buy milk for the office", 200))
            .unwrap();
        dao.upsert(&note("Ideas", "nothing here", 300)).unwrap();

        let matches = dao.list_by_query("milk").unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|n| n.matches("milk")));

        let by_title = dao.list_by_query("shopping").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Shopping");
    }

    #[test]
    fn test_list_by_query_is_case_insensitive() {
        let db = setup();
        let dao = SqliteNoteDao::new(db.connection());

        dao.upsert(&note("Shopping", "MILK", 100)).unwrap();

        assert_eq!(dao.list_by_query("milk").unwrap().len(), 1);
        assert_eq!(dao.list_by_query("SHOPPING").unwrap().len(), 1);
    }
}
