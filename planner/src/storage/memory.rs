//! In-memory snapshot slot
//!
//! Used by tests and throwaway sessions. Records every successful write
//! and can be told to fail reads, writes or deletes, standing in for a
//! broken or full disk.

use super::SnapshotStore;
use crate::error::{AppError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<String>>,
    writes: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_removes: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a stored snapshot
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::default();
        *lock(&store.slot) = Some(contents.into());
        store
    }

    /// Current slot contents
    pub fn contents(&self) -> Option<String> {
        lock(&self.slot).clone()
    }

    /// Every successful write, oldest first
    pub fn writes(&self) -> Vec<String> {
        lock(&self.writes).clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Storage unavailable".to_string()));
        }
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Storage quota exceeded".to_string()));
        }
        *lock(&self.slot) = Some(contents.to_string());
        lock(&self.writes).push(contents.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("Storage unavailable".to_string()));
        }
        *lock(&self.slot) = None;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_writes() {
        let store = MemorySnapshotStore::new();
        store.write("a").unwrap();
        store.write("b").unwrap();

        assert_eq!(store.writes(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.contents().as_deref(), Some("b"));
    }

    #[test]
    fn test_failure_injection() {
        let store = MemorySnapshotStore::with_contents("kept");
        store.set_fail_reads(true);
        store.set_fail_writes(true);
        store.set_fail_removes(true);

        assert!(store.read().is_err());
        assert!(store.write("lost").is_err());
        assert!(store.remove().is_err());
        assert_eq!(store.contents().as_deref(), Some("kept"));
        assert!(store.writes().is_empty());
    }
}
