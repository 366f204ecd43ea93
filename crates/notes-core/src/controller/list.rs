//! Search & sort pipeline

use tokio::task::JoinHandle;

use crate::models::Note;

use super::NotesController;

/// List screen view-model snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Live projection of the store: filtered by `query`, ordered by
    /// `updated_at` (descending unless `sort_ascending`)
    pub notes: Vec<Note>,
    /// Current search text, exactly as typed
    pub query: String,
    /// Sort direction; store-native descending order when false
    pub sort_ascending: bool,
    /// Last list-query failure, cleared by the next successful delivery
    pub error: Option<String>,
}

#[derive(Default)]
pub(super) struct ListState {
    query: String,
    sort_ascending: bool,
    /// Most recent batch as delivered by the store (recency descending)
    batch: Vec<Note>,
    error: Option<String>,
    /// Stamp for stale-result suppression; bumped whenever the
    /// underlying query is re-issued
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl NotesController {
    /// Replace the current search text.
    ///
    /// No trimming happens here; blank text is treated as "no filter"
    /// at query time.
    pub async fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.inner.list.lock().await;
            if state.query == text {
                return;
            }
            state.query = text;
        }
        self.restart_list_query().await;
    }

    /// Flip the sort direction.
    ///
    /// Re-orders the already-delivered batch client-side; no new store
    /// query is issued.
    pub async fn toggle_sort(&self) {
        let mut state = self.inner.list.lock().await;
        state.sort_ascending = !state.sort_ascending;
        self.publish_list(&state);
    }

    /// (Re)issue the live list query, superseding any previous
    /// subscription so stale results are never delivered.
    pub(super) async fn restart_list_query(&self) {
        let mut state = self.inner.list.lock().await;

        if let Some(task) = state.task.take() {
            task.abort();
        }
        state.generation += 1;

        let generation = state.generation;
        let mut live = self.repo().observe_notes(&state.query);
        let controller = self.clone();

        state.task = Some(tokio::spawn(async move {
            loop {
                match live.recv().await {
                    Ok(batch) => controller.deliver_list_batch(generation, batch).await,
                    Err(error) => {
                        tracing::error!("List query failed: {error}");
                        controller
                            .fail_list_delivery(generation, error.to_string())
                            .await;
                    }
                }
            }
        }));

        // Publish the query change right away; the old batch stays on
        // screen until the new query's first delivery lands.
        self.publish_list(&state);
    }

    async fn deliver_list_batch(&self, generation: u64, batch: Vec<Note>) {
        let mut state = self.inner.list.lock().await;
        if state.generation != generation {
            return; // superseded query; drop the stale batch
        }
        state.batch = batch;
        state.error = None;
        self.publish_list(&state);
    }

    async fn fail_list_delivery(&self, generation: u64, message: String) {
        let mut state = self.inner.list.lock().await;
        if state.generation != generation {
            return;
        }
        state.error = Some(message);
        self.publish_list(&state);
    }

    fn publish_list(&self, state: &ListState) {
        let mut notes = state.batch.clone();
        if state.sort_ascending {
            notes.sort_by_key(|note| note.updated_at);
        }

        self.inner.list_tx.send_replace(ListSnapshot {
            notes,
            query: state.query.clone(),
            sort_ascending: state.sort_ascending,
            error: state.error.clone(),
        });
    }
}
