//! Task and deadline id generation
//!
//! Ids are creation timestamps in milliseconds, bumped past the last issued
//! id whenever the clock has not advanced so two ids never collide.

use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already present in a loaded document
    pub fn seeded(max_existing: Option<i64>) -> Self {
        Self {
            last: max_existing.unwrap_or(0),
        }
    }

    /// Next id from the wall clock
    pub fn next_id(&mut self) -> i64 {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    /// Next id for a given clock reading
    pub fn next_id_at(&mut self, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}
