//! Configuration management for readlog.
//!
//! Settings live in a JSON file in the platform application-data directory.
//! A missing file yields defaults, and a missing field inside a section takes
//! its documented default, so older files keep working as settings are added.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\readlog\config.json`
//! - **macOS**: `~/Library/Application Support/readlog/config.json`
//! - **Linux**: `~/.local/share/readlog/config.json`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use readlog::libs::config::Config;
//! use readlog::libs::lifecycle::SettingsProvider;
//!
//! let config = Config::read()?;
//! let settings = config.auto_stop_settings();
//! println!("Auto-stop after {} minutes", settings.minutes);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::lifecycle::{AutoStopSettings, SettingsProvider, DEFAULT_AUTO_STOP_ENABLED, DEFAULT_AUTO_STOP_MINUTES};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

fn default_auto_stop_enabled() -> bool {
    DEFAULT_AUTO_STOP_ENABLED
}

fn default_auto_stop_minutes() -> i64 {
    DEFAULT_AUTO_STOP_MINUTES
}

/// Reading session timer settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Stop a running session that was left in the background too long.
    #[serde(default = "default_auto_stop_enabled")]
    pub auto_stop_enabled: bool,

    /// Minutes in the background after which a running session is stopped.
    ///
    /// Zero or a negative value disables auto-stop just like
    /// `auto_stop_enabled = false`.
    #[serde(default = "default_auto_stop_minutes")]
    pub auto_stop_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            auto_stop_enabled: DEFAULT_AUTO_STOP_ENABLED,
            auto_stop_minutes: DEFAULT_AUTO_STOP_MINUTES,
        }
    }
}

impl SessionConfig {
    fn init(&self) -> Result<Self> {
        msg_print!(Message::ConfigModuleSession);
        let auto_stop_enabled = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAutoStopEnabled.to_string())
            .default(self.auto_stop_enabled)
            .interact()?;
        let auto_stop_minutes = if auto_stop_enabled {
            Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAutoStopMinutes.to_string())
                .default(self.auto_stop_minutes)
                .validate_with(|minutes: &i64| -> Result<(), String> {
                    if *minutes > 0 {
                        Ok(())
                    } else {
                        Err(Message::AutoStopMinutesRange.to_string())
                    }
                })
                .interact_text()?
        } else {
            self.auto_stop_minutes
        };
        Ok(SessionConfig {
            auto_stop_enabled,
            auto_stop_minutes,
        })
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, replacing any existing file.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Interactive setup, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let current = config.session.clone().unwrap_or_default();
        config.session = Some(current.init()?);
        Ok(config)
    }

    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }
}

/// Settings read from the configuration file each time they are needed, so
/// edits made while a session is open take effect at the next evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredSettings;

impl SettingsProvider for StoredSettings {
    fn auto_stop_settings(&self) -> AutoStopSettings {
        match Config::read() {
            Ok(config) => config.auto_stop_settings(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read configuration, using default auto-stop settings");
                AutoStopSettings::default()
            }
        }
    }
}

impl SettingsProvider for Config {
    fn auto_stop_settings(&self) -> AutoStopSettings {
        let session = self.session();
        AutoStopSettings {
            enabled: session.auto_stop_enabled,
            minutes: session.auto_stop_minutes,
        }
    }
}
