//! Settings service
//!
//! Manages planner settings persistence using JSON file storage.

use crate::config::{
    DEFAULT_BREAK_SECS, MAX_SAVE_DELAY_MS, MIN_SAVE_DELAY_MS, SAVE_DEBOUNCE_MS, SETTINGS_FILE,
    STANDARD_WORK_SECS,
};
use crate::error::{AppError, Result};
use crate::timer::{PresetKind, TimerPreset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

/// Focus timer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Preset selected on startup: "standard", "extended" or "custom"
    #[serde(default = "default_preset")]
    pub default_preset: String,
    /// Work phase of the custom preset in seconds
    #[serde(default = "default_custom_work_secs")]
    pub custom_work_secs: u32,
    /// Break phase of the custom preset in seconds
    #[serde(default = "default_custom_break_secs")]
    pub custom_break_secs: u32,
}

fn default_preset() -> String {
    "standard".to_string()
}

fn default_custom_work_secs() -> u32 {
    STANDARD_WORK_SECS
}

fn default_custom_break_secs() -> u32 {
    DEFAULT_BREAK_SECS
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            custom_work_secs: default_custom_work_secs(),
            custom_break_secs: default_custom_break_secs(),
        }
    }
}

impl TimerSettings {
    /// Resolve a preset by kind, using the configured custom durations
    pub fn resolve(&self, kind: PresetKind) -> Result<TimerPreset> {
        match kind {
            PresetKind::Standard => Ok(TimerPreset::STANDARD),
            PresetKind::Extended => Ok(TimerPreset::EXTENDED),
            PresetKind::Custom => {
                TimerPreset::custom(self.custom_work_secs, self.custom_break_secs)
            }
        }
    }

    /// The preset selected on startup
    pub fn preset(&self) -> Result<TimerPreset> {
        let kind = self
            .default_preset
            .parse::<PresetKind>()
            .map_err(AppError::InvalidInput)?;
        self.resolve(kind)
    }

    /// The startup preset, or the standard one when the settings do not resolve
    pub fn preset_or_standard(&self) -> TimerPreset {
        self.preset().unwrap_or_else(|e| {
            tracing::warn!("Invalid timer settings, using the standard preset: {}", e);
            TimerPreset::STANDARD
        })
    }
}

/// Persistence behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorSettings {
    /// Save debounce window in milliseconds
    #[serde(default = "default_save_delay")]
    pub save_delay_ms: u64,
}

fn default_save_delay() -> u64 {
    SAVE_DEBOUNCE_MS
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            save_delay_ms: default_save_delay(),
        }
    }
}

impl BehaviorSettings {
    /// Save window clamped to the supported range
    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms.clamp(MIN_SAVE_DELAY_MS, MAX_SAVE_DELAY_MS))
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Service for managing application settings
#[derive(Clone)]
pub struct SettingsService {
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            settings_path: app_data_dir.join(SETTINGS_FILE),
        }
    }

    /// Load settings from disk or create default if not exists
    pub async fn load(&self) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::info!("Settings file not found, creating default settings");
            let default = AppSettings::default();
            self.save(&default).await?;
            return Ok(default);
        }

        let content = fs::read_to_string(&self.settings_path).await?;
        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| AppError::Generic(format!("Failed to parse settings: {}", e)))?;

        Ok(settings)
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| AppError::Generic(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.settings_path, content).await?;
        tracing::info!("Settings saved to {:?}", self.settings_path);

        Ok(())
    }

    /// Get timer settings
    pub async fn get_timer(&self) -> Result<TimerSettings> {
        let settings = self.load().await?;
        Ok(settings.timer)
    }

    /// Update timer settings; the default preset must resolve
    pub async fn update_timer(&self, timer: TimerSettings) -> Result<()> {
        timer.preset()?;
        let mut settings = self.load().await?;
        settings.timer = timer;
        self.save(&settings).await?;
        Ok(())
    }

    /// Get behavior settings
    pub async fn get_behavior(&self) -> Result<BehaviorSettings> {
        let settings = self.load().await?;
        Ok(settings.behavior)
    }

    /// Update behavior settings
    pub async fn update_behavior(&self, behavior: BehaviorSettings) -> Result<()> {
        let mut settings = self.load().await?;
        settings.behavior = behavior;
        self.save(&settings).await?;
        Ok(())
    }
}
