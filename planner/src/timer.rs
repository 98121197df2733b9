//! Focus timer state machine
//!
//! A Pomodoro-style countdown alternating between work and break phases.
//! Pure state: ticks are delivered by [`crate::services::FocusTimerService`].

use crate::config::{
    DEFAULT_BREAK_SECS, EXTENDED_WORK_SECS, MAX_PHASE_SECS, MIN_PHASE_SECS, STANDARD_WORK_SECS,
};
use crate::error::{AppError, Result};
use serde::Serialize;
use std::str::FromStr;

/// Current timer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn flipped(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::Break => "Break Time",
        }
    }
}

/// Work and break durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerPreset {
    pub work_secs: u32,
    pub break_secs: u32,
}

impl TimerPreset {
    /// 30 minutes of work, 5 minutes of break
    pub const STANDARD: TimerPreset = TimerPreset {
        work_secs: STANDARD_WORK_SECS,
        break_secs: DEFAULT_BREAK_SECS,
    };

    /// 40 minutes of work, 5 minutes of break
    pub const EXTENDED: TimerPreset = TimerPreset {
        work_secs: EXTENDED_WORK_SECS,
        break_secs: DEFAULT_BREAK_SECS,
    };

    /// User-defined durations, validated against the allowed range
    pub fn custom(work_secs: u32, break_secs: u32) -> Result<Self> {
        for (name, secs) in [("work", work_secs), ("break", break_secs)] {
            if !(MIN_PHASE_SECS..=MAX_PHASE_SECS).contains(&secs) {
                return Err(AppError::InvalidInput(format!(
                    "{} duration must be between {} and {} seconds, got {}",
                    name, MIN_PHASE_SECS, MAX_PHASE_SECS, secs
                )));
            }
        }
        Ok(Self {
            work_secs,
            break_secs,
        })
    }

    pub fn duration_of(self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }
}

impl Default for TimerPreset {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named preset selectable from settings or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Standard,
    Extended,
    Custom,
}

impl PresetKind {
    /// Name stored in the settings file
    pub fn as_str(self) -> &'static str {
        match self {
            PresetKind::Standard => "standard",
            PresetKind::Extended => "extended",
            PresetKind::Custom => "custom",
        }
    }
}

impl FromStr for PresetKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "30/5" => Ok(PresetKind::Standard),
            "extended" | "40/5" => Ok(PresetKind::Extended),
            "custom" => Ok(PresetKind::Custom),
            other => Err(format!(
                "Unknown preset '{}'. Use standard, extended or custom",
                other
            )),
        }
    }
}

/// Countdown state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusTimer {
    preset: TimerPreset,
    phase: Phase,
    seconds_left: u32,
    running: bool,
}

impl FocusTimer {
    /// Stopped timer at the start of a work phase
    pub fn new(preset: TimerPreset) -> Self {
        Self {
            preset,
            phase: Phase::Work,
            seconds_left: preset.work_secs,
            running: false,
        }
    }

    pub fn preset(&self) -> TimerPreset {
        self.preset
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one second. Returns the new phase when the countdown
    /// ran out and the phase flipped. Ignored while paused.
    pub fn tick(&mut self) -> Option<Phase> {
        if !self.running {
            return None;
        }

        if self.seconds_left <= 1 {
            self.phase = self.phase.flipped();
            self.seconds_left = self.preset.duration_of(self.phase);
            return Some(self.phase);
        }

        self.seconds_left -= 1;
        None
    }

    /// Pause or resume; phase and remaining time are kept
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Stop and restart from the beginning of a work phase
    pub fn select_preset(&mut self, preset: TimerPreset) {
        *self = Self::new(preset);
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        format_clock(self.seconds_left)
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerPreset::default())
    }
}

/// Zero-padded `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
