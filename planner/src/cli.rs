//! Command line interface definition

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::document::{MetaField, Weekday};
use crate::timer::PresetKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "weekplanner")]
#[command(version, about = "Weekly planner with a focus timer", long_about = None)]
pub struct Cli {
    /// Directory holding the planner snapshot and settings
    #[arg(long, env = "WEEKPLANNER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the whole week
    Show,
    /// Add a task to a day
    AddTask {
        /// monday..sunday, mon..sun or today
        #[arg(value_parser = parse_day)]
        day: Weekday,
        label: String,
    },
    /// Mark a task done or not done
    Toggle {
        #[arg(value_parser = parse_day)]
        day: Weekday,
        id: i64,
    },
    /// Change a task's label or completion
    EditTask(EditTaskArgs),
    /// Remove a task
    RemoveTask {
        #[arg(value_parser = parse_day)]
        day: Weekday,
        id: i64,
    },
    /// Add a deadline
    AddDeadline {
        title: String,
        /// Due date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Remove a deadline
    RemoveDeadline { id: i64 },
    /// Set the week label or one of the top priorities
    Meta {
        /// week-label, top1, top2 or top3
        field: MetaField,
        value: String,
    },
    /// Replace the notes
    Notes { value: String },
    /// Clear the whole week
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Run the focus timer until interrupted
    Timer(TimerArgs),
    /// Show settings, or change them with the options below
    Settings(SettingsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EditTaskArgs {
    #[arg(value_parser = parse_day)]
    pub day: Weekday,
    pub id: i64,
    /// New label
    #[arg(long)]
    pub label: Option<String>,
    /// New completion state
    #[arg(long)]
    pub done: Option<bool>,
}

#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// standard (30/5), extended (40/5) or custom
    #[arg(long, conflicts_with_all = ["work", "break_secs"])]
    pub preset: Option<PresetKind>,

    /// Custom work phase in seconds
    #[arg(long, requires = "break_secs")]
    pub work: Option<u32>,

    /// Custom break phase in seconds
    #[arg(long = "break", requires = "work")]
    pub break_secs: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Preset used when `timer` runs without options
    #[arg(long)]
    pub preset: Option<PresetKind>,

    /// Work phase of the custom preset in seconds
    #[arg(long)]
    pub custom_work: Option<u32>,

    /// Break phase of the custom preset in seconds
    #[arg(long)]
    pub custom_break: Option<u32>,

    /// Quiet period before changes are saved, in milliseconds
    #[arg(long)]
    pub save_delay: Option<u64>,
}

/// Parse a weekday name, abbreviation or `today`
pub fn parse_day(value: &str) -> Result<Weekday, String> {
    if value.trim().eq_ignore_ascii_case("today") {
        return Ok(Local::now().weekday().into());
    }
    value.parse()
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_task() {
        let cli = Cli::try_parse_from(["weekplanner", "add-task", "tue", "Call plumber"]).unwrap();
        match cli.command {
            Command::AddTask { day, label } => {
                assert_eq!(day, Weekday::Tuesday);
                assert_eq!(label, "Call plumber");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit_task() {
        let cli = Cli::try_parse_from([
            "weekplanner",
            "edit-task",
            "friday",
            "42",
            "--done",
            "true",
        ])
        .unwrap();
        match cli.command {
            Command::EditTask(args) => {
                assert_eq!(args.day, Weekday::Friday);
                assert_eq!(args.id, 42);
                assert_eq!(args.label, None);
                assert_eq!(args.done, Some(true));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_timer_arguments() {
        let cli = Cli::try_parse_from(["weekplanner", "timer", "--preset", "extended"]).unwrap();
        match cli.command {
            Command::Timer(args) => assert_eq!(args.preset, Some(PresetKind::Extended)),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli =
            Cli::try_parse_from(["weekplanner", "timer", "--work", "60", "--break", "30"]).unwrap();
        match cli.command {
            Command::Timer(args) => {
                assert_eq!(args.work, Some(60));
                assert_eq!(args.break_secs, Some(30));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["weekplanner", "timer", "--work", "60"]).is_err());
    }

    #[test]
    fn test_parse_settings_arguments() {
        let cli = Cli::try_parse_from([
            "weekplanner",
            "settings",
            "--preset",
            "custom",
            "--custom-work",
            "1500",
            "--save-delay",
            "750",
        ])
        .unwrap();
        match cli.command {
            Command::Settings(args) => {
                assert_eq!(args.preset, Some(PresetKind::Custom));
                assert_eq!(args.custom_work, Some(1500));
                assert_eq!(args.custom_break, None);
                assert_eq!(args.save_delay, Some(750));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["weekplanner", "settings", "--preset", "turbo"]).is_err());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(Cli::try_parse_from(["weekplanner", "add-task", "someday", "x"]).is_err());
        assert!(
            Cli::try_parse_from(["weekplanner", "add-deadline", "Essay", "--date", "May 1"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["weekplanner", "meta", "top9", "x"]).is_err());
    }

    #[test]
    fn test_parse_day_today() {
        let expected: Weekday = Local::now().weekday().into();
        assert_eq!(parse_day("Today").unwrap(), expected);
    }
}
