//! Live queries: reads that re-deliver their result automatically
//! whenever the underlying store changes.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::models::Note;
use crate::Result;

use super::DatabaseService;

/// Waits on the store's change channel, yielding once immediately so
/// the first `recv` on a live query delivers the current result set.
struct ChangeListener {
    changes: broadcast::Receiver<()>,
    primed: bool,
}

impl ChangeListener {
    fn new(changes: broadcast::Receiver<()>) -> Self {
        Self {
            changes,
            primed: false,
        }
    }

    async fn tick(&mut self) {
        if !self.primed {
            self.primed = true;
            return;
        }

        match self.changes.recv().await {
            // A lagged receiver only missed intermediate notifications;
            // the next fetch is still current.
            Ok(()) | Err(RecvError::Lagged(_)) => (),
            // The sender lives inside the service each query holds a
            // clone of, so the channel cannot close while we wait.
            Err(RecvError::Closed) => std::future::pending::<()>().await,
        }
    }
}

/// Live list query handle. `recv` yields the current result set
/// immediately, then once after every store write.
pub struct NoteListQuery {
    service: DatabaseService,
    filter: Option<String>,
    listener: ChangeListener,
}

impl NoteListQuery {
    pub(super) fn new(service: DatabaseService, filter: Option<String>) -> Self {
        let listener = ChangeListener::new(service.subscribe());
        Self {
            service,
            filter,
            listener,
        }
    }

    /// Wait for the next result set.
    pub async fn recv(&mut self) -> Result<Vec<Note>> {
        self.listener.tick().await;
        match &self.filter {
            Some(query) => self.service.search_notes(query).await,
            None => self.service.list_notes().await,
        }
    }
}

/// Live point lookup handle. `recv` yields `None` once the observed
/// row is gone.
pub struct NoteQuery {
    service: DatabaseService,
    id: i64,
    listener: ChangeListener,
}

impl NoteQuery {
    pub(super) fn new(service: DatabaseService, id: i64) -> Self {
        let listener = ChangeListener::new(service.subscribe());
        Self {
            service,
            id,
            listener,
        }
    }

    /// Wait for the next state of the observed note.
    pub async fn recv(&mut self) -> Result<Option<Note>> {
        self.listener.tick().await;
        self.service.get_note(self.id).await
    }
}
