//! Planner service
//!
//! Owns the current document and applies mutations to it.
//! Each mutation replaces the document with the value returned by the
//! pure functions in [`crate::document::mutations`]; a real change is
//! handed to the persistence scheduler.

use crate::document::{mutations, IdGenerator, MetaField, PlannerDocument, TaskPatch, Weekday};
use crate::error::Result;
use crate::services::confirm::ConfirmPrompt;
use crate::services::persistence::{PersistenceScheduler, SaveStatus};
use tokio::sync::watch;

/// Question asked before the week is wiped
pub const CLEAR_WEEK_PROMPT: &str = "Clear this week? This cannot be undone.";

/// Service for reading and changing the week plan
pub struct PlannerService {
    document: PlannerDocument,
    ids: IdGenerator,
    persistence: PersistenceScheduler,
}

impl PlannerService {
    /// Load the stored snapshot and take ownership of the scheduler
    pub fn load(persistence: PersistenceScheduler) -> Self {
        let document = persistence.load();
        let ids = IdGenerator::seeded(document.max_id());
        Self {
            document,
            ids,
            persistence,
        }
    }

    pub fn document(&self) -> &PlannerDocument {
        &self.document
    }

    pub fn status(&self) -> SaveStatus {
        self.persistence.status()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.persistence.subscribe()
    }

    /// Add a task; returns its id, or `None` for a blank label
    pub fn add_task(&mut self, day: Weekday, label: &str) -> Option<i64> {
        if label.trim().is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        let next = mutations::add_task(&self.document, day, label, id);
        self.commit(next).then_some(id)
    }

    pub fn toggle_done(&mut self, day: Weekday, id: i64) -> bool {
        let next = mutations::toggle_done(&self.document, day, id);
        self.commit(next)
    }

    pub fn update_task(&mut self, day: Weekday, id: i64, patch: &TaskPatch) -> bool {
        let next = mutations::update_task(&self.document, day, id, patch);
        self.commit(next)
    }

    pub fn remove_task(&mut self, day: Weekday, id: i64) -> bool {
        let next = mutations::remove_task(&self.document, day, id);
        self.commit(next)
    }

    /// Add a deadline; returns its id, or `None` for a blank title
    pub fn add_deadline(&mut self, title: &str, date: &str) -> Option<i64> {
        if title.trim().is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        let next = mutations::add_deadline(&self.document, title, date, id);
        self.commit(next).then_some(id)
    }

    pub fn remove_deadline(&mut self, id: i64) -> bool {
        let next = mutations::remove_deadline(&self.document, id);
        self.commit(next)
    }

    pub fn set_meta(&mut self, field: MetaField, value: &str) -> bool {
        let next = mutations::set_meta(&self.document, field, value);
        self.commit(next)
    }

    pub fn set_notes(&mut self, value: &str) -> bool {
        let next = mutations::set_notes(&self.document, value);
        self.commit(next)
    }

    /// Reset the week after confirmation.
    ///
    /// On "yes" the document becomes the empty template and the stored
    /// snapshot is deleted. On "no" nothing changes. Returns whether the
    /// week was cleared.
    pub fn clear_week(&mut self, prompt: &dyn ConfirmPrompt) -> Result<bool> {
        if !prompt.confirm(CLEAR_WEEK_PROMPT)? {
            tracing::debug!("Clear week declined");
            return Ok(false);
        }

        self.document = PlannerDocument::empty();
        self.persistence.clear();
        tracing::info!("Week cleared");
        Ok(true)
    }

    /// Write any pending change immediately
    pub fn flush(&mut self) {
        self.persistence.flush();
    }

    /// Replace the document; returns whether it actually changed
    fn commit(&mut self, next: PlannerDocument) -> bool {
        if next == self.document {
            return false;
        }
        self.document = next;
        self.persistence.schedule(&self.document);
        tracing::debug!("Planner document changed");
        true
    }
}
