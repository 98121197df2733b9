//! Application configuration constants
//!
//! Central location for storage names, timing windows, timer presets
//! and validation boundaries used throughout the planner.

use std::time::Duration;

// ===== Storage =====

/// Name of the single snapshot slot holding the planner document
pub const STORAGE_KEY: &str = "put_planner_v4";

/// File name of the runtime settings inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "weekplanner";

// ===== Persistence =====

/// Quiescence window before a changed document is written, in milliseconds
pub const SAVE_DEBOUNCE_MS: u64 = 500;

/// Minimum save delay in milliseconds.
/// Values below this write on nearly every keystroke.
pub const MIN_SAVE_DELAY_MS: u64 = 100;

/// Maximum save delay in milliseconds (5 minutes).
/// Values above this risk data loss on unexpected shutdown.
pub const MAX_SAVE_DELAY_MS: u64 = 300_000;

// ===== Focus Timer =====

/// Interval between countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Work phase of the standard preset (30 minutes)
pub const STANDARD_WORK_SECS: u32 = 30 * 60;

/// Work phase of the extended preset (40 minutes)
pub const EXTENDED_WORK_SECS: u32 = 40 * 60;

/// Break phase shared by both built-in presets (5 minutes)
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

/// Shortest phase a custom preset may configure
pub const MIN_PHASE_SECS: u32 = 1;

/// Longest phase a custom preset may configure (4 hours)
pub const MAX_PHASE_SECS: u32 = 4 * 60 * 60;
