//! Draft & autosave pipeline

use tokio::task::JoinHandle;

use crate::models::{Note, UNSAVED_ID, UNTITLED};
use crate::util::now_ms;
use crate::Result;

use super::{NotesController, AUTOSAVE_DEBOUNCE};

/// Editor screen view-model snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// Persisted id, or `UNSAVED_ID` for a not-yet-saved draft
    pub id: i64,
    /// In-progress draft title
    pub title: String,
    /// In-progress draft content
    pub content: String,
    /// Timestamp of the last successful write; 0 means never saved
    /// this session
    pub last_saved_at: i64,
    /// The initial load for this session has not delivered yet
    pub loading: bool,
    /// The observed note was deleted out from under the editor
    pub missing: bool,
    /// Last persistence failure; cleared by the next successful save
    pub error: Option<String>,
}

/// Load phase per editor session: draft edits only feed the autosave
/// timer once the initial load has delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    Loading,
    #[default]
    Ready,
}

#[derive(Default)]
pub(super) struct EditorState {
    id: i64,
    title: String,
    content: String,
    last_saved_at: i64,
    missing: bool,
    error: Option<String>,
    phase: Phase,
    /// Bumped per `load_note` (and on delete); stale tasks check it
    /// before touching state
    session: u64,
    /// Bumped per draft edit; the debounce timer persists only the
    /// trailing edit of a quiet period
    edit_seq: u64,
    saved_seq: u64,
    subscription: Option<JoinHandle<()>>,
}

impl NotesController {
    /// Open the editor for `id`.
    ///
    /// The sentinel id resets to a blank new-note draft; any other id
    /// cancels the previous note subscription and subscribes to live
    /// updates of that note.
    pub async fn load_note(&self, id: i64) {
        let mut state = self.inner.editor.lock().await;

        if let Some(task) = state.subscription.take() {
            task.abort();
        }
        state.session += 1;
        state.edit_seq = 0;
        state.saved_seq = 0;
        state.id = id;
        state.title.clear();
        state.content.clear();
        state.last_saved_at = 0;
        state.missing = false;
        state.error = None;

        if id == UNSAVED_ID {
            state.phase = Phase::Ready;
            self.publish_editor(&state);
            return;
        }

        state.phase = Phase::Loading;
        let session = state.session;
        let mut live = self.repo().observe_note(id);
        let controller = self.clone();

        state.subscription = Some(tokio::spawn(async move {
            loop {
                match live.recv().await {
                    Ok(Some(note)) => controller.apply_note_update(session, note).await,
                    Ok(None) => controller.mark_note_missing(session).await,
                    Err(error) => {
                        tracing::error!("Note subscription failed: {error}");
                        controller
                            .fail_editor_session(session, error.to_string())
                            .await;
                    }
                }
            }
        }));

        self.publish_editor(&state);
    }

    async fn apply_note_update(&self, session: u64, note: Note) {
        let mut state = self.inner.editor.lock().await;
        if state.session != session {
            return; // a different note is open now
        }

        state.id = note.id;
        state.last_saved_at = note.updated_at;
        state.missing = false;
        // Never clobber a dirty draft with an echo of our own save
        if state.phase == Phase::Loading || state.edit_seq == state.saved_seq {
            state.title = note.title;
            state.content = note.content;
        }
        state.phase = Phase::Ready;
        self.publish_editor(&state);
    }

    async fn mark_note_missing(&self, session: u64) {
        let mut state = self.inner.editor.lock().await;
        if state.session != session || state.missing {
            return;
        }

        // Keep the last-known draft on screen but flag the loss; typing
        // on (and thereby autosaving) recreates the row.
        state.missing = true;
        state.phase = Phase::Ready;
        self.publish_editor(&state);
    }

    async fn fail_editor_session(&self, session: u64, message: String) {
        let mut state = self.inner.editor.lock().await;
        if state.session != session {
            return;
        }
        state.error = Some(message);
        self.publish_editor(&state);
    }

    /// Overwrite the in-memory draft; `last_saved_at` is untouched.
    ///
    /// Pure state update plus debounce scheduling, no immediate I/O.
    pub async fn update_draft(&self, title: impl Into<String>, content: impl Into<String>) {
        let mut state = self.inner.editor.lock().await;
        state.title = title.into();
        state.content = content.into();
        self.publish_editor(&state);

        if state.phase != Phase::Ready {
            return; // no autosave before the initial load delivers
        }

        state.edit_seq += 1;
        let session = state.session;
        let seq = state.edit_seq;
        drop(state);

        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(AUTOSAVE_DEBOUNCE).await;
            controller.autosave(session, seq).await;
        });
    }

    /// Fires when a debounce window elapses; persists only if no newer
    /// edit superseded this one and the editor is still on the same
    /// session.
    async fn autosave(&self, session: u64, seq: u64) {
        let mut state = self.inner.editor.lock().await;
        if state.session != session || state.edit_seq != seq || state.saved_seq >= seq {
            return;
        }

        if let Err(error) = self.save_draft_locked(&mut state).await {
            tracing::error!("Autosave failed: {error}");
        }
    }

    /// Persist the current draft immediately.
    ///
    /// Blank titles are stored under the placeholder, content is
    /// trimmed, and the store assigns an id for a sentinel draft which
    /// is written back so later saves update the same row.
    pub async fn save_draft(&self) -> Result<()> {
        let mut state = self.inner.editor.lock().await;
        self.save_draft_locked(&mut state).await
    }

    async fn save_draft_locked(&self, state: &mut EditorState) -> Result<()> {
        let seq = state.edit_seq;
        let title = state.title.trim();
        let note = Note {
            id: state.id,
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            content: state.content.trim().to_string(),
            updated_at: now_ms(),
        };

        match self.repo().upsert(&note).await {
            Ok(id) => {
                if state.id == UNSAVED_ID {
                    state.id = id;
                }
                state.last_saved_at = note.updated_at;
                state.saved_seq = seq;
                state.missing = false;
                state.error = None;
                self.publish_editor(state);
                Ok(())
            }
            Err(error) => {
                // A failed save must not pretend to have persisted
                state.error = Some(error.to_string());
                self.publish_editor(state);
                Err(error)
            }
        }
    }

    /// Delete the note behind the current draft. No-op for an unsaved
    /// draft; on success the session is retired so a pending debounced
    /// save cannot recreate the row.
    pub async fn delete_current_note(&self) -> Result<()> {
        let mut state = self.inner.editor.lock().await;
        if state.id == UNSAVED_ID {
            return Ok(());
        }

        // The store deletes by id; the other fields just make a
        // well-formed record.
        let note = Note {
            id: state.id,
            title: state.title.clone(),
            content: state.content.clone(),
            updated_at: state.last_saved_at,
        };

        match self.repo().delete(&note).await {
            Ok(()) => {
                if let Some(task) = state.subscription.take() {
                    task.abort();
                }
                state.session += 1;
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.to_string());
                self.publish_editor(&state);
                Err(error)
            }
        }
    }

    /// Drop the live note subscription when the editor screen closes.
    /// A debounced save already in flight is allowed to complete.
    pub async fn close_editor(&self) {
        let mut state = self.inner.editor.lock().await;
        if let Some(task) = state.subscription.take() {
            task.abort();
        }
    }

    fn publish_editor(&self, state: &EditorState) {
        self.inner.editor_tx.send_replace(EditorSnapshot {
            id: state.id,
            title: state.title.clone(),
            content: state.content.clone(),
            last_saved_at: state.last_saved_at,
            loading: state.phase == Phase::Loading,
            missing: state.missing,
            error: state.error.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{setup, wait_for_editor};
    use super::*;
    use std::time::Duration;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "multi_thread")]
    async fn load_sentinel_resets_to_blank_draft() {
        let (controller, _db) = setup().await;
        let mut rx = controller.watch_editor();

        controller.load_note(0).await;
        let snapshot = wait_for_editor(&mut rx, |s| !s.loading).await;

        assert_eq!(snapshot.id, UNSAVED_ID);
        assert_eq!(snapshot.title, "");
        assert_eq!(snapshot.content, "");
        assert_eq!(snapshot.last_saved_at, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn load_existing_note_delivers_its_fields() {
        let (controller, db) = setup().await;

        let id = db
            .upsert_note(&Note {
                updated_at: 1234,
                ..Note::new("Shopping", "milk")
            })
            .await
            .unwrap();

        let mut rx = controller.watch_editor();
        controller.load_note(id).await;

        let snapshot = wait_for_editor(&mut rx, |s| s.id == id && !s.loading).await;
        assert_eq!(snapshot.title, "Shopping");
        assert_eq!(snapshot.content, "milk");
        assert_eq!(snapshot.last_saved_at, 1234);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn switching_notes_never_interleaves_sessions() {
        let (controller, db) = setup().await;

        let first = db.upsert_note(&Note::new("first", "one")).await.unwrap();
        let second = db.upsert_note(&Note::new("second", "two")).await.unwrap();

        let mut rx = controller.watch_editor();
        controller.load_note(first).await;
        controller.load_note(second).await;

        let snapshot = wait_for_editor(&mut rx, |s| s.id == second && !s.loading).await;
        assert_eq!(snapshot.title, "second");

        // Give any stale delivery from the first subscription a chance
        // to land, then confirm the editor still shows the second note.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(rx.borrow().title, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn save_assigns_id_once_and_reuses_it() {
        let (controller, db) = setup().await;

        controller.load_note(0).await;
        controller.update_draft("Draft", "v1").await;
        controller.save_draft().await.unwrap();

        let first_id = {
            let notes = db.list_notes().await.unwrap();
            assert_eq!(notes.len(), 1);
            notes[0].id
        };
        assert_ne!(first_id, UNSAVED_ID);

        controller.update_draft("Draft", "v2").await;
        controller.save_draft().await.unwrap();

        let notes = db.list_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, first_id);
        assert_eq!(notes[0].content, "v2");
    }

    #[tokio::test(start_paused = true)]
    async fn blank_title_is_saved_under_placeholder() {
        let (controller, db) = setup().await;

        controller.load_note(0).await;
        controller.update_draft("   ", "some content  ").await;
        controller.save_draft().await.unwrap();

        let notes = db.list_notes().await.unwrap();
        assert_eq!(notes[0].title, UNTITLED);
        assert_eq!(notes[0].content, "some content");
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_edits_into_one_write() {
        let (controller, db) = setup().await;
        let mut changes = db.subscribe();

        controller.load_note(0).await;
        controller.update_draft("S", "").await;
        controller.update_draft("Sh", "").await;
        controller.update_draft("Sho", "").await;
        controller.update_draft("Shopping", "milk").await;

        // Let the debounce window elapse
        tokio::time::sleep(Duration::from_millis(900)).await;

        let notes = db.list_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Shopping");
        assert_eq!(notes[0].content, "milk");

        // Exactly one store write happened
        let mut writes = 0;
        while changes.try_recv().is_ok() {
            writes += 1;
        }
        assert_eq!(writes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn edits_inside_the_window_restart_it() {
        let (controller, db) = setup().await;

        controller.load_note(0).await;
        controller.update_draft("a", "").await;

        // Not yet: a newer edit arrives at 500ms
        tokio::time::sleep(Duration::from_millis(500)).await;
        controller.update_draft("ab", "").await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        // Only 500ms since the last edit: nothing persisted yet
        assert!(db.list_notes().await.unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(400)).await;
        let notes = db.list_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "ab");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_autosave_fires_during_initial_load() {
        let (controller, db) = setup().await;

        let id = db
            .upsert_note(&Note::new("existing", "body"))
            .await
            .unwrap();

        let mut rx = controller.watch_editor();
        controller.load_note(id).await;
        wait_for_editor(&mut rx, |s| !s.loading).await;

        // Loading delivered exactly once; no write was triggered by the
        // load itself.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let notes = db.list_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "body");
    }

    #[tokio::test(start_paused = true)]
    async fn delete_on_unsaved_draft_is_a_no_op() {
        let (controller, db) = setup().await;

        controller.load_note(0).await;
        controller.update_draft("never saved", "").await;
        controller.delete_current_note().await.unwrap();

        assert!(db.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delete_retires_pending_autosave() {
        let (controller, db) = setup().await;

        controller.load_note(0).await;
        controller.update_draft("Doomed", "text").await;
        controller.save_draft().await.unwrap();
        assert_eq!(db.list_notes().await.unwrap().len(), 1);

        // Edit (arming the debounce timer), then delete before it fires
        controller.update_draft("Doomed", "more text").await;
        controller.delete_current_note().await.unwrap();

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(db.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn out_of_band_delete_flags_the_editor() {
        let (controller, db) = setup().await;

        let id = db.upsert_note(&Note::new("shared", "")).await.unwrap();
        let note = db.get_note(id).await.unwrap().unwrap();

        let mut rx = controller.watch_editor();
        controller.load_note(id).await;
        wait_for_editor(&mut rx, |s| s.id == id && !s.loading).await;

        db.delete_note(&note).await.unwrap();
        let snapshot = wait_for_editor(&mut rx, |s| s.missing).await;
        assert_eq!(snapshot.title, "shared");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_save_surfaces_error_and_keeps_last_saved_at() {
        let (controller, db) = setup().await;
        let mut rx = controller.watch_editor();

        controller.load_note(0).await;
        controller.update_draft("will fail", "").await;

        // Break the store out from under the controller
        db.execute_raw("DROP TABLE notes").await.unwrap();

        assert!(controller.save_draft().await.is_err());

        let snapshot = wait_for_editor(&mut rx, |s| s.error.is_some()).await;
        assert_eq!(snapshot.last_saved_at, 0);
        assert_eq!(snapshot.id, UNSAVED_ID);
    }
}
