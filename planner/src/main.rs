// Weekly planner - local-first week plan with a focus timer
// Entry point and command dispatch

use std::io::Write;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weekplanner::app::{self, AppState};
use weekplanner::cli::{Cli, Command, TimerArgs};
use weekplanner::commands::{self, SettingsUpdate};
use weekplanner::document::TaskPatch;
use weekplanner::services::{FixedAnswer, SaveStatus, TerminalPrompt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stderr keeps command output clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weekplanner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => app::default_data_dir()?,
    };
    let mut state = AppState::initialize(data_dir)
        .await
        .context("Failed to initialize planner")?;

    let result = run(&mut state, cli.command).await;
    state.shutdown();

    let output = result?;
    if !output.is_empty() {
        println!("{}", output);
    }

    if state.planner.status() == SaveStatus::Error {
        anyhow::bail!("Failed to save the planner to {:?}", state.app_data_dir);
    }

    Ok(())
}

async fn run(state: &mut AppState, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Show => commands::show(state, Local::now().date_naive()),
        Command::AddTask { day, label } => commands::add_task(state, day, &label)?,
        Command::Toggle { day, id } => commands::toggle_task(state, day, id)?,
        Command::EditTask(args) => {
            let patch = TaskPatch {
                label: args.label,
                done: args.done,
            };
            commands::edit_task(state, args.day, args.id, patch)?
        }
        Command::RemoveTask { day, id } => commands::remove_task(state, day, id)?,
        Command::AddDeadline { title, date } => commands::add_deadline(state, &title, date)?,
        Command::RemoveDeadline { id } => commands::remove_deadline(state, id)?,
        Command::Meta { field, value } => commands::set_meta(state, field, &value)?,
        Command::Notes { value } => commands::set_notes(state, &value)?,
        Command::Clear { yes } => {
            if yes {
                commands::clear_week(state, &FixedAnswer(true))?
            } else {
                commands::clear_week(state, &TerminalPrompt)?
            }
        }
        Command::Timer(args) => run_timer(state, args).await?,
        Command::Settings(args) => {
            let update = SettingsUpdate {
                preset: args.preset,
                custom_work_secs: args.custom_work,
                custom_break_secs: args.custom_break,
                save_delay_ms: args.save_delay,
            };
            commands::update_settings(state, update).await?
        }
    };
    Ok(output)
}

/// Count down in the foreground until Ctrl-C
async fn run_timer(state: &mut AppState, args: TimerArgs) -> anyhow::Result<String> {
    let preset = commands::resolve_preset(state, args.preset, args.work, args.break_secs)?;
    let mut updates = state.timer.subscribe();
    let first = commands::start_timer(state, preset);

    let mut stdout = std::io::stdout();
    print!("\r{}", first);
    stdout.flush()?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let timer = updates.borrow_and_update().clone();
                print!("\r{} {}  ", timer.display(), timer.phase().label());
                stdout.flush()?;
            }
            _ = &mut ctrl_c => break,
        }
    }

    state.timer.pause();
    println!();
    Ok(String::new())
}
