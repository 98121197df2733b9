//! Services module
//!
//! Business logic services that sit between the front end and storage.

pub mod confirm;
pub mod focus;
pub mod persistence;
pub mod planner;
pub mod settings;

pub use confirm::{ConfirmPrompt, FixedAnswer, TerminalPrompt};
pub use focus::FocusTimerService;
pub use persistence::{PersistenceScheduler, SaveStatus};
pub use planner::PlannerService;
pub use settings::{AppSettings, BehaviorSettings, SettingsService, TimerSettings};
