//! Application configuration.

use crate::consts::cli_consts::polling;
use crate::control::ControlModel;
use crate::environment::Environment;
use crate::model::HistoryFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

/// Overrides the configured server URL when set.
pub const SERVER_URL_ENV: &str = "JEMURAN_SERVER_URL";

/// Persisted dashboard settings. Every field is optional on disk.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default)]
    pub control_model: ControlModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
    /// Show only history rows recorded while the system was ON.
    #[serde(default)]
    pub only_system_on: bool,
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Deletes the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// `~/.jemuran/config.json`
pub fn get_config_path() -> Result<PathBuf, io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
    })?;
    Ok(home_path.join(".jemuran").join("config.json"))
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub server_url: Option<String>,
    pub control_model: Option<ControlModel>,
    pub poll_interval_ms: Option<u64>,
    pub only_system_on: Option<bool>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: Environment,
    pub control_model: ControlModel,
    pub poll_interval: Duration,
    pub history_filter: HistoryFilter,
}

impl Settings {
    /// Resolves settings: environment variable, then flags, then the config file.
    pub fn resolve(config: &Config, overrides: &SettingsOverrides) -> Result<Self, String> {
        let env_url = std::env::var(SERVER_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::resolve_with_env(config, overrides, env_url.as_deref())
    }

    pub fn resolve_with_env(
        config: &Config,
        overrides: &SettingsOverrides,
        env_url: Option<&str>,
    ) -> Result<Self, String> {
        let environment = match env_url
            .or(overrides.server_url.as_deref())
            .or(config.server_url.as_deref())
        {
            Some(url) => url.parse::<Environment>()?,
            None => Environment::default(),
        };

        let control_model = overrides.control_model.unwrap_or(config.control_model);
        let poll_interval = overrides
            .poll_interval_ms
            .or(config.poll_interval_ms)
            .map(|ms| Duration::from_millis(ms.max(polling::MIN_INTERVAL_MS)))
            .unwrap_or_else(|| control_model.default_poll_interval());

        let history_filter = if overrides.only_system_on.unwrap_or(config.only_system_on) {
            HistoryFilter::SystemOn
        } else {
            HistoryFilter::All
        };

        Ok(Self {
            environment,
            control_model,
            poll_interval,
            history_filter,
        })
    }
}
