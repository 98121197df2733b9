//! Planner document module
//!
//! This module provides the in-memory week plan:
//! - Model definitions and snapshot (de)serialization
//! - Pure mutation functions
//! - Id generation for new tasks and deadlines

pub mod ids;
pub mod models;
pub mod mutations;

pub use ids::IdGenerator;
pub use models::*;
