//! Planner document models
//!
//! Rust structs representing the persisted week plan.
//! Field names serialize in camelCase so snapshots stay compatible
//! with the `put_planner_v4` slot format.

use crate::error::{AppError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven fixed weekday keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in display order
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Storage key of this day
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Accepts full names or three-letter abbreviations
        let s = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s || (s.len() == 3 && day.as_str().starts_with(&s)))
            .ok_or_else(|| format!("Unknown weekday '{}'. Use monday..sunday or mon..sun", s))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Week label and the three top priorities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekMeta {
    #[serde(default)]
    pub week_label: String,
    #[serde(default)]
    pub top1: String,
    #[serde(default)]
    pub top2: String,
    #[serde(default)]
    pub top3: String,
}

/// Editable field of [`WeekMeta`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    WeekLabel,
    Top1,
    Top2,
    Top3,
}

impl FromStr for MetaField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week-label" | "week_label" | "weeklabel" | "week" => Ok(MetaField::WeekLabel),
            "top1" => Ok(MetaField::Top1),
            "top2" => Ok(MetaField::Top2),
            "top3" => Ok(MetaField::Top3),
            other => Err(format!(
                "Unknown field '{}'. Use week-label, top1, top2 or top3",
                other
            )),
        }
    }
}

/// A task on one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub done: bool,
}

/// Partial task update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    pub label: Option<String>,
    pub done: Option<bool>,
}

/// A dated deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: i64,
    pub title: String,
    /// ISO date (`YYYY-MM-DD`) or empty
    #[serde(default)]
    pub date: String,
}

impl Deadline {
    /// Parsed due date, if the stored date is a valid ISO date
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Days from `today` until the due date (negative when overdue)
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.due_date().map(|due| (due - today).num_days())
    }
}

/// The seven day-task lists.
///
/// One field per weekday, so the key set can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Days {
    #[serde(default)]
    pub monday: Vec<Task>,
    #[serde(default)]
    pub tuesday: Vec<Task>,
    #[serde(default)]
    pub wednesday: Vec<Task>,
    #[serde(default)]
    pub thursday: Vec<Task>,
    #[serde(default)]
    pub friday: Vec<Task>,
    #[serde(default)]
    pub saturday: Vec<Task>,
    #[serde(default)]
    pub sunday: Vec<Task>,
}

impl Days {
    /// Tasks of a day in display order
    pub fn get(&self, day: Weekday) -> &[Task] {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn get_mut(&mut self, day: Weekday) -> &mut Vec<Task> {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    /// Iterate over all days in display order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Task])> + '_ {
        Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
    }
}

/// Complete persisted state of one week's plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerDocument {
    #[serde(default)]
    pub meta: WeekMeta,
    #[serde(default)]
    pub days: Days,
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
    #[serde(default)]
    pub notes: String,
}

impl PlannerDocument {
    /// The empty template used on first start and after clearing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a stored snapshot
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(AppError::from)
    }

    /// Serialize into a complete snapshot
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(AppError::from)
    }

    pub fn find_task(&self, day: Weekday, id: i64) -> Option<&Task> {
        self.days.get(day).iter().find(|task| task.id == id)
    }

    pub fn find_deadline(&self, id: i64) -> Option<&Deadline> {
        self.deadlines.iter().find(|deadline| deadline.id == id)
    }

    /// Percentage of done tasks for a day, rounded; 0 for an empty day
    pub fn day_progress(&self, day: Weekday) -> u8 {
        let tasks = self.days.get(day);
        if tasks.is_empty() {
            return 0;
        }
        let done = tasks.iter().filter(|task| task.done).count();
        ((done as f64 / tasks.len() as f64) * 100.0).round() as u8
    }

    /// Largest task or deadline id in the document
    pub fn max_id(&self) -> Option<i64> {
        self.days
            .iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|task| task.id))
            .chain(self.deadlines.iter().map(|deadline| deadline.id))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> PlannerDocument {
        let mut doc = PlannerDocument::empty();
        doc.meta.week_label = "Week 7".to_string();
        doc.meta.top1 = "Ship release".to_string();
        doc.days.monday.push(Task {
            id: 1,
            label: "Write report".to_string(),
            done: true,
        });
        doc.days.friday.push(Task {
            id: 2,
            label: "Review PRs".to_string(),
            done: false,
        });
        doc.deadlines.push(Deadline {
            id: 3,
            title: "Tax filing".to_string(),
            date: "2024-05-01".to_string(),
        });
        doc.notes = "Remember to stretch".to_string();
        doc
    }

    #[test]
    fn test_snapshot_round_trip() {
        let doc = sample_document();

        let json = doc.to_json().unwrap();
        let restored = PlannerDocument::from_json(&json).unwrap();

        assert_eq!(restored, doc);
    }

    #[test]
    fn test_snapshot_uses_original_field_names() {
        let json = sample_document().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["meta"]["weekLabel"], "Week 7");
        assert_eq!(value["days"]["monday"][0]["done"], true);
        assert_eq!(value["deadlines"][0]["date"], "2024-05-01");
        for day in Weekday::ALL {
            assert!(value["days"][day.as_str()].is_array(), "missing {}", day);
        }
    }

    #[test]
    fn test_parse_original_snapshot() {
        let raw = r#"{
            "meta": {"weekLabel": "W1", "top1": "a", "top2": "", "top3": ""},
            "days": {
                "monday": [{"id": 1714000000000, "label": "Gym", "done": false}],
                "tuesday": [], "wednesday": [], "thursday": [],
                "friday": [], "saturday": [], "sunday": []
            },
            "deadlines": [{"id": 1714000000001, "title": "Essay", "date": ""}],
            "notes": "hi"
        }"#;

        let doc = PlannerDocument::from_json(raw).unwrap();

        assert_eq!(doc.meta.week_label, "W1");
        assert_eq!(doc.days.monday[0].label, "Gym");
        assert_eq!(doc.max_id(), Some(1714000000001));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = PlannerDocument::from_json(r#"{"days": {"monday": []}}"#).unwrap();
        assert_eq!(doc, PlannerDocument::empty());
    }

    #[test]
    fn test_malformed_snapshot_is_rejected() {
        assert!(PlannerDocument::from_json("{not json").is_err());
        assert!(PlannerDocument::from_json(r#"{"days": {"monday": 5}}"#).is_err());
    }

    #[test]
    fn test_day_progress_rounds() {
        let mut doc = PlannerDocument::empty();
        assert_eq!(doc.day_progress(Weekday::Monday), 0);

        for (id, done) in [(1, true), (2, false), (3, false)] {
            doc.days.monday.push(Task {
                id,
                label: format!("task {}", id),
                done,
            });
        }

        assert_eq!(doc.day_progress(Weekday::Monday), 33);
        doc.days.monday[1].done = true;
        assert_eq!(doc.day_progress(Weekday::Monday), 67);
    }

    #[test]
    fn test_weekday_parsing() {
        assert_eq!("Monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("thu".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!(" SUN ".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("mo".parse::<Weekday>().is_err());
        assert!("funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_meta_field_parsing() {
        assert_eq!("week-label".parse::<MetaField>().unwrap(), MetaField::WeekLabel);
        assert_eq!("TOP2".parse::<MetaField>().unwrap(), MetaField::Top2);
        assert!("top4".parse::<MetaField>().is_err());
    }

    #[test]
    fn test_deadline_days_until() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 28).unwrap();
        let deadline = Deadline {
            id: 1,
            title: "Essay".to_string(),
            date: "2024-05-01".to_string(),
        };
        assert_eq!(deadline.days_until(today), Some(3));

        let undated = Deadline {
            date: String::new(),
            ..deadline
        };
        assert_eq!(undated.days_until(today), None);
    }
}
