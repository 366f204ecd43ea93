//! Note state controller: the reactive pipelines behind the two screens.
//!
//! Owns the list view-model (search text, sort direction, derived live
//! note list) and the editor view-model (current draft and save state),
//! mediating between UI intents and the repository. Each view-model has
//! a single owner task order: intents and live-query deliveries are
//! serialized through a mutex, and the presentation layer only ever
//! sees whole snapshots through a watch channel.

mod editor;
mod list;

pub use editor::EditorSnapshot;
pub use list::ListSnapshot;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};

use crate::services::NoteRepository;

/// Debounce window for autosave: the draft is persisted after this much
/// inactivity, and any newer edit restarts the window.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(800);

/// Cheap-to-clone handle over the controller state.
#[derive(Clone)]
pub struct NotesController {
    inner: Arc<Inner>,
}

struct Inner {
    repo: NoteRepository,
    list: Mutex<list::ListState>,
    list_tx: watch::Sender<ListSnapshot>,
    editor: Mutex<editor::EditorState>,
    editor_tx: watch::Sender<EditorSnapshot>,
}

impl NotesController {
    /// Create a controller and start the live list pipeline.
    ///
    /// Must be called within a tokio runtime; the controller spawns its
    /// subscription tasks on it.
    pub fn new(repo: NoteRepository) -> Self {
        let (list_tx, _) = watch::channel(ListSnapshot::default());
        let (editor_tx, _) = watch::channel(EditorSnapshot::default());

        let controller = Self {
            inner: Arc::new(Inner {
                repo,
                list: Mutex::new(list::ListState::default()),
                list_tx,
                editor: Mutex::new(editor::EditorState::default()),
                editor_tx,
            }),
        };

        let starter = controller.clone();
        tokio::spawn(async move {
            starter.restart_list_query().await;
        });

        controller
    }

    /// Watch the list view-model.
    pub fn watch_list(&self) -> watch::Receiver<ListSnapshot> {
        self.inner.list_tx.subscribe()
    }

    /// Watch the editor view-model.
    pub fn watch_editor(&self) -> watch::Receiver<EditorSnapshot> {
        self.inner.editor_tx.subscribe()
    }

    fn repo(&self) -> &NoteRepository {
        &self.inner.repo
    }
}
