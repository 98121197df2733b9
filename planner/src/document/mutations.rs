//! Document mutations
//!
//! Each operation takes the previous document and returns the next one.
//! The previous value is never modified; a no-op returns an equal copy.

use super::models::{Deadline, MetaField, PlannerDocument, Task, TaskPatch, Weekday};

/// Append a new open task; blank labels are ignored
pub fn add_task(doc: &PlannerDocument, day: Weekday, label: &str, id: i64) -> PlannerDocument {
    let mut next = doc.clone();
    if label.trim().is_empty() {
        return next;
    }
    next.days.get_mut(day).push(Task {
        id,
        label: label.to_string(),
        done: false,
    });
    next
}

pub fn toggle_done(doc: &PlannerDocument, day: Weekday, id: i64) -> PlannerDocument {
    let mut next = doc.clone();
    if let Some(task) = next.days.get_mut(day).iter_mut().find(|task| task.id == id) {
        task.done = !task.done;
    }
    next
}

/// Merge the set fields of `patch` into the matching task
pub fn update_task(
    doc: &PlannerDocument,
    day: Weekday,
    id: i64,
    patch: &TaskPatch,
) -> PlannerDocument {
    let mut next = doc.clone();
    if let Some(task) = next.days.get_mut(day).iter_mut().find(|task| task.id == id) {
        if let Some(label) = &patch.label {
            task.label = label.clone();
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
    }
    next
}

pub fn remove_task(doc: &PlannerDocument, day: Weekday, id: i64) -> PlannerDocument {
    let mut next = doc.clone();
    next.days.get_mut(day).retain(|task| task.id != id);
    next
}

/// Append a deadline; blank titles are ignored
pub fn add_deadline(doc: &PlannerDocument, title: &str, date: &str, id: i64) -> PlannerDocument {
    let mut next = doc.clone();
    if title.trim().is_empty() {
        return next;
    }
    next.deadlines.push(Deadline {
        id,
        title: title.to_string(),
        date: date.to_string(),
    });
    next
}

pub fn remove_deadline(doc: &PlannerDocument, id: i64) -> PlannerDocument {
    let mut next = doc.clone();
    next.deadlines.retain(|deadline| deadline.id != id);
    next
}

pub fn set_meta(doc: &PlannerDocument, field: MetaField, value: &str) -> PlannerDocument {
    let mut next = doc.clone();
    let slot = match field {
        MetaField::WeekLabel => &mut next.meta.week_label,
        MetaField::Top1 => &mut next.meta.top1,
        MetaField::Top2 => &mut next.meta.top2,
        MetaField::Top3 => &mut next.meta.top3,
    };
    *slot = value.to_string();
    next
}

pub fn set_notes(doc: &PlannerDocument, value: &str) -> PlannerDocument {
    PlannerDocument {
        notes: value.to_string(),
        ..doc.clone()
    }
}
