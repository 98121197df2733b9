//! Front-end commands
//!
//! All commands follow the pattern:
//! - Take AppState as first parameter
//! - Return Result<T, AppError> with the text to show the user
//! - Delegate the actual change to the planner or timer service

use crate::app::AppState;
use crate::document::{MetaField, PlannerDocument, TaskPatch, Weekday};
use crate::error::{AppError, Result};
use crate::services::{BehaviorSettings, ConfirmPrompt, SaveStatus, TimerSettings};
use crate::timer::{format_clock, PresetKind, TimerPreset};
use chrono::NaiveDate;
use std::fmt::Write;

// ===== Week Commands =====

/// Render the whole week
pub fn show(state: &AppState, today: NaiveDate) -> String {
    render_week(state.planner.document(), state.planner.status(), today)
}

// ===== Task Commands =====

pub fn add_task(state: &mut AppState, day: Weekday, label: &str) -> Result<String> {
    match state.planner.add_task(day, label) {
        Some(id) => Ok(format!("Added task {} to {}", id, day)),
        None => Ok("Nothing to add: the label is empty".to_string()),
    }
}

pub fn toggle_task(state: &mut AppState, day: Weekday, id: i64) -> Result<String> {
    require_task(state.planner.document(), day, id)?;
    state.planner.toggle_done(day, id);

    let done = state
        .planner
        .document()
        .find_task(day, id)
        .map(|task| task.done)
        .unwrap_or_default();
    Ok(format!(
        "Task {} marked {}",
        id,
        if done { "done" } else { "not done" }
    ))
}

pub fn edit_task(state: &mut AppState, day: Weekday, id: i64, patch: TaskPatch) -> Result<String> {
    require_task(state.planner.document(), day, id)?;
    if state.planner.update_task(day, id, &patch) {
        Ok(format!("Task {} updated", id))
    } else {
        Ok(format!("Task {} unchanged", id))
    }
}

pub fn remove_task(state: &mut AppState, day: Weekday, id: i64) -> Result<String> {
    require_task(state.planner.document(), day, id)?;
    state.planner.remove_task(day, id);
    Ok(format!("Removed task {} from {}", id, day))
}

// ===== Deadline Commands =====

pub fn add_deadline(state: &mut AppState, title: &str, date: Option<NaiveDate>) -> Result<String> {
    let date = date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    match state.planner.add_deadline(title, &date) {
        Some(id) => Ok(format!("Added deadline {}", id)),
        None => Ok("Nothing to add: the title is empty".to_string()),
    }
}

pub fn remove_deadline(state: &mut AppState, id: i64) -> Result<String> {
    if state.planner.document().find_deadline(id).is_none() {
        return Err(AppError::NotFound(format!("Deadline {}", id)));
    }
    state.planner.remove_deadline(id);
    Ok(format!("Removed deadline {}", id))
}

// ===== Sidebar Commands =====

pub fn set_meta(state: &mut AppState, field: MetaField, value: &str) -> Result<String> {
    state.planner.set_meta(field, value);
    Ok("Priorities updated".to_string())
}

pub fn set_notes(state: &mut AppState, value: &str) -> Result<String> {
    state.planner.set_notes(value);
    Ok("Notes updated".to_string())
}

pub fn clear_week(state: &mut AppState, prompt: &dyn ConfirmPrompt) -> Result<String> {
    if state.planner.clear_week(prompt)? {
        Ok("Week cleared".to_string())
    } else {
        Ok("Nothing cleared".to_string())
    }
}

// ===== Timer Commands =====

/// Resolve the preset a timer run should use.
///
/// Explicit durations win over a named preset, which wins over settings.
pub fn resolve_preset(
    state: &AppState,
    preset: Option<PresetKind>,
    work_secs: Option<u32>,
    break_secs: Option<u32>,
) -> Result<TimerPreset> {
    match (work_secs, break_secs, preset) {
        (Some(work), Some(brk), _) => TimerPreset::custom(work, brk),
        (None, None, Some(kind)) => state.settings.timer.resolve(kind),
        (None, None, None) => Ok(state.settings.timer.preset_or_standard()),
        _ => Err(AppError::InvalidInput(
            "Custom timers need both --work and --break".to_string(),
        )),
    }
}

/// Select a preset and start counting down
pub fn start_timer(state: &mut AppState, preset: TimerPreset) -> String {
    state.timer.select_preset(preset);
    state.timer.start();
    let timer = state.timer.snapshot();
    format!("{} {}", timer.display(), timer.phase().label())
}

// ===== Settings Commands =====

/// Requested settings changes; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub preset: Option<PresetKind>,
    pub custom_work_secs: Option<u32>,
    pub custom_break_secs: Option<u32>,
    pub save_delay_ms: Option<u64>,
}

/// Show the stored settings
pub async fn show_settings(state: &AppState) -> Result<String> {
    let timer = state.settings_service.get_timer().await?;
    let behavior = state.settings_service.get_behavior().await?;
    Ok(render_settings(&timer, &behavior))
}

/// Apply the requested changes and show the result.
///
/// A new save delay applies from the next start.
pub async fn update_settings(state: &mut AppState, update: SettingsUpdate) -> Result<String> {
    let timer_changed = update.preset.is_some()
        || update.custom_work_secs.is_some()
        || update.custom_break_secs.is_some();

    if timer_changed {
        let mut timer = state.settings_service.get_timer().await?;
        if let Some(kind) = update.preset {
            timer.default_preset = kind.as_str().to_string();
        }
        timer.custom_work_secs = update.custom_work_secs.unwrap_or(timer.custom_work_secs);
        timer.custom_break_secs = update.custom_break_secs.unwrap_or(timer.custom_break_secs);
        TimerPreset::custom(timer.custom_work_secs, timer.custom_break_secs)?;

        state.settings_service.update_timer(timer.clone()).await?;
        state.settings.timer = timer;
    }

    if let Some(save_delay_ms) = update.save_delay_ms {
        let behavior = BehaviorSettings { save_delay_ms };
        state
            .settings_service
            .update_behavior(behavior.clone())
            .await?;
        state.settings.behavior = behavior;
    }

    show_settings(state).await
}

// ===== Rendering =====

/// Plain-text view of the settings
pub fn render_settings(timer: &TimerSettings, behavior: &BehaviorSettings) -> String {
    let preset = timer.preset_or_standard();
    format!(
        "Timer preset: {} ({} work / {} break)\n\
         Custom preset: {} work / {} break\n\
         Save delay: {} ms",
        timer.default_preset,
        format_clock(preset.work_secs),
        format_clock(preset.break_secs),
        format_clock(timer.custom_work_secs),
        format_clock(timer.custom_break_secs),
        behavior.save_delay().as_millis()
    )
}


/// Plain-text view of the week
pub fn render_week(doc: &PlannerDocument, status: SaveStatus, today: NaiveDate) -> String {
    let mut out = String::new();

    let label = if doc.meta.week_label.is_empty() {
        "This week"
    } else {
        doc.meta.week_label.as_str()
    };
    let _ = writeln!(out, "{}  [{}]", label, status.label());

    let priorities: Vec<&str> = [&doc.meta.top1, &doc.meta.top2, &doc.meta.top3]
        .into_iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();
    if !priorities.is_empty() {
        let _ = writeln!(out, "\nTop priorities");
        for (rank, priority) in priorities.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", rank + 1, priority);
        }
    }

    for (day, tasks) in doc.days.iter() {
        let _ = write!(out, "\n{}", day);
        if !tasks.is_empty() {
            let _ = write!(out, " ({}%)", doc.day_progress(day));
        }
        let _ = writeln!(out);
        for task in tasks {
            let mark = if task.done { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {}  #{}", mark, task.label, task.id);
        }
    }

    if !doc.deadlines.is_empty() {
        let _ = writeln!(out, "\nDeadlines");
        for deadline in &doc.deadlines {
            let due = match deadline.days_until(today) {
                Some(0) => " (today)".to_string(),
                Some(days) if days < 0 => format!(" ({} days overdue)", -days),
                Some(days) => format!(" (in {} days)", days),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "  {} {}{}  #{}",
                deadline.title, deadline.date, due, deadline.id
            );
        }
    }

    if !doc.notes.is_empty() {
        let _ = writeln!(out, "\nNotes\n  {}", doc.notes);
    }

    out
}

fn require_task(doc: &PlannerDocument, day: Weekday, id: i64) -> Result<()> {
    doc.find_task(day, id)
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Task {} on {}", id, day)))
}
