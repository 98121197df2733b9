//! Persistence scheduler
//!
//! Loads the planner snapshot once at startup and writes changed documents
//! back with a debounce: every change resets a quiescence window and only
//! the last document of a burst is written once the window elapses.
//!
//! The pending write is an owned task handle. It is aborted when a newer
//! change replaces it, when the week is cleared and when the scheduler is
//! dropped. Each scheduled write also carries a generation number checked
//! under the same lock that supersedes it, so a timer that already woke up
//! can never write stale state.

use crate::config::SAVE_DEBOUNCE_MS;
use crate::document::PlannerDocument;
use crate::storage::SnapshotStore;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Save status shown next to the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Loading,
    Saving,
    Saved,
    Error,
}

impl SaveStatus {
    pub fn label(self) -> &'static str {
        match self {
            SaveStatus::Loading => "Loading...",
            SaveStatus::Saving => "Saving...",
            SaveStatus::Saved => "All changes saved",
            SaveStatus::Error => "Save failed",
        }
    }
}

#[derive(Debug, Default)]
struct WriteState {
    generation: u64,
    pending: Option<PlannerDocument>,
}

struct Shared {
    store: Arc<dyn SnapshotStore>,
    status: watch::Sender<SaveStatus>,
    state: Mutex<WriteState>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, WriteState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the pending document if `generation` is still the latest
    fn write_pending(&self, generation: u64) {
        let mut state = self.lock_state();
        if state.generation != generation {
            tracing::debug!("Skipping superseded write (generation {})", generation);
            return;
        }
        let Some(document) = state.pending.take() else {
            return;
        };

        match document.to_json().and_then(|json| self.store.write(&json)) {
            Ok(()) => {
                tracing::debug!("Planner saved (generation {})", generation);
                self.status.send_replace(SaveStatus::Saved);
            }
            Err(e) => {
                tracing::error!("Save failed: {}", e);
                self.status.send_replace(SaveStatus::Error);
            }
        }
    }
}

/// Debounced writer for the planner snapshot
pub struct PersistenceScheduler {
    shared: Arc<Shared>,
    delay: Duration,
    timer: Option<JoinHandle<()>>,
}

impl PersistenceScheduler {
    /// Create a scheduler with the default 500ms window
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_delay(store, Duration::from_millis(SAVE_DEBOUNCE_MS))
    }

    /// Create with a custom quiescence window
    pub fn with_delay(store: Arc<dyn SnapshotStore>, delay: Duration) -> Self {
        let (status, _) = watch::channel(SaveStatus::Loading);
        Self {
            shared: Arc::new(Shared {
                store,
                status,
                state: Mutex::new(WriteState::default()),
            }),
            delay,
            timer: None,
        }
    }

    /// Read the stored snapshot.
    ///
    /// Missing, unreadable or malformed snapshots all fall back to the empty
    /// document. The status becomes `Saved` either way.
    pub fn load(&self) -> PlannerDocument {
        let document = match self.shared.store.read() {
            Ok(Some(raw)) => match PlannerDocument::from_json(&raw) {
                Ok(document) => {
                    tracing::info!("Restored planner snapshot");
                    document
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed planner snapshot: {}", e);
                    PlannerDocument::empty()
                }
            },
            Ok(None) => {
                tracing::info!("No existing data, starting fresh");
                PlannerDocument::empty()
            }
            Err(e) => {
                tracing::warn!("Failed to read planner snapshot, starting fresh: {}", e);
                PlannerDocument::empty()
            }
        };

        self.shared.status.send_replace(SaveStatus::Saved);
        document
    }

    pub fn status(&self) -> SaveStatus {
        *self.shared.status.borrow()
    }

    /// Watch status transitions
    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.shared.status.subscribe()
    }

    /// Whether a write is waiting for its window to elapse
    pub fn has_pending(&self) -> bool {
        self.shared.lock_state().pending.is_some()
    }

    /// Schedule a debounced write of `document`.
    ///
    /// Must be called within a Tokio runtime.
    pub fn schedule(&mut self, document: &PlannerDocument) {
        self.cancel_timer();

        let generation = {
            let mut state = self.shared.lock_state();
            state.generation += 1;
            state.pending = Some(document.clone());
            state.generation
        };
        self.shared.status.send_replace(SaveStatus::Saving);

        // The window starts now, not when the task is first polled
        let deadline = Instant::now() + self.delay;
        let shared = Arc::clone(&self.shared);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            shared.write_pending(generation);
        }));
    }

    /// Delete the stored snapshot immediately.
    ///
    /// Any pending write is dropped so it cannot recreate the slot.
    pub fn clear(&mut self) {
        self.cancel_timer();

        let mut state = self.shared.lock_state();
        state.generation += 1;
        state.pending = None;

        match self.shared.store.remove() {
            Ok(()) => {
                tracing::info!("Planner snapshot deleted");
                self.shared.status.send_replace(SaveStatus::Saved);
            }
            Err(e) => {
                tracing::error!("Clear failed: {}", e);
                self.shared.status.send_replace(SaveStatus::Error);
            }
        }
    }

    /// Write a pending document now instead of waiting for the window
    pub fn flush(&mut self) {
        self.cancel_timer();
        let generation = self.shared.lock_state().generation;
        self.shared.write_pending(generation);
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for PersistenceScheduler {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
