//! Storage module
//!
//! Provides the single snapshot slot the planner document persists to.

pub mod memory;
pub mod snapshot_store;

pub use memory::MemorySnapshotStore;
pub use snapshot_store::{FileSnapshotStore, SnapshotStore};
