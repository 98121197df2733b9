//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and owned by AppState, which the
//! front end receives explicitly.

use crate::config::{APP_DIR_NAME, STORAGE_KEY};
use crate::error::{AppError, Result};
use crate::services::{
    AppSettings, FocusTimerService, PersistenceScheduler, PlannerService, SettingsService,
};
use crate::storage::{FileSnapshotStore, SnapshotStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Central application state holding all services
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub settings: AppSettings,
    pub settings_service: SettingsService,
    pub planner: PlannerService,
    pub timer: FocusTimerService,
}

impl AppState {
    /// Assemble the services around a snapshot store
    pub fn new(
        app_data_dir: PathBuf,
        settings: AppSettings,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        let persistence = PersistenceScheduler::with_delay(store, settings.behavior.save_delay());
        let planner = PlannerService::load(persistence);
        let timer = FocusTimerService::new(settings.timer.preset_or_standard());

        Self {
            settings_service: SettingsService::new(app_data_dir.clone()),
            app_data_dir,
            settings,
            planner,
            timer,
        }
    }

    /// Application setup - called once on startup
    pub async fn initialize(app_data_dir: PathBuf) -> Result<Self> {
        tracing::info!("Initializing application");
        tracing::info!("App data directory: {:?}", app_data_dir);

        tokio::fs::create_dir_all(&app_data_dir).await?;

        let settings = match SettingsService::new(app_data_dir.clone()).load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings, using defaults: {}", e);
                AppSettings::default()
            }
        };
        let store = Arc::new(FileSnapshotStore::new(&app_data_dir, STORAGE_KEY));
        let state = Self::new(app_data_dir, settings, store);

        tracing::info!("Application initialized successfully");

        Ok(state)
    }

    /// Write pending changes and stop the timer
    pub fn shutdown(&mut self) {
        self.planner.flush();
        self.timer.pause();
        tracing::info!("Application shut down");
    }
}

/// Platform data directory for the planner
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::Generic("Failed to get app data dir".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Weekday;
    use crate::services::{SaveStatus, TimerSettings};
    use crate::storage::MemorySnapshotStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_creates_data_dir_and_settings() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("planner");

        let state = AppState::initialize(data_dir.clone()).await.unwrap();

        assert!(data_dir.join("settings.json").exists());
        assert_eq!(state.planner.status(), SaveStatus::Saved);
        assert_eq!(state.timer.snapshot().seconds_left(), 1800);
    }

    #[tokio::test]
    async fn test_shutdown_flushes_pending_changes() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(MemorySnapshotStore::new());
        let mut state = AppState::new(
            temp_dir.path().to_path_buf(),
            AppSettings::default(),
            store.clone(),
        );

        state.planner.add_task(Weekday::Tuesday, "Groceries");
        state.shutdown();

        assert_eq!(store.writes().len(), 1);
        assert_eq!(state.planner.status(), SaveStatus::Saved);
    }

    #[tokio::test]
    async fn test_timer_starts_with_configured_preset() {
        let temp_dir = TempDir::new().unwrap();
        let settings = AppSettings {
            timer: TimerSettings {
                default_preset: "extended".to_string(),
                ..TimerSettings::default()
            },
            ..AppSettings::default()
        };

        let state = AppState::new(
            temp_dir.path().to_path_buf(),
            settings,
            Arc::new(MemorySnapshotStore::new()),
        );

        assert_eq!(state.timer.snapshot().display(), "40:00");
    }

    #[tokio::test]
    async fn test_bad_settings_do_not_block_startup() {
        let temp_dir = TempDir::new().unwrap();
        let stored = crate::document::mutations::set_notes(
            &crate::document::PlannerDocument::empty(),
            "still here",
        );
        std::fs::write(
            temp_dir.path().join(format!("{}.json", STORAGE_KEY)),
            stored.to_json().unwrap(),
        )
        .unwrap();

        for contents in [r#"{"timer":{"default_preset":"turbo"}}"#, "{ oops"] {
            std::fs::write(temp_dir.path().join("settings.json"), contents).unwrap();

            let state = AppState::initialize(temp_dir.path().to_path_buf())
                .await
                .unwrap();

            assert_eq!(state.planner.document().notes, "still here");
            assert_eq!(state.timer.snapshot().display(), "30:00");
            assert_eq!(state.planner.status(), SaveStatus::Saved);
        }
    }
}
