//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme suggested for new tabs before any preference is recorded
    pub default_theme: String,

    /// UI refresh rate in FPS
    pub ui_refresh_fps: u32,

    /// Override for the data directory (manifest, theme preference, tab files)
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of the default location)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_theme: crate::session::Theme::default().name().to_string(),
            ui_refresh_fps: 30,
            data_dir: None,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(&config_path))
            // Layer environment variables (TABPAD_DEBUG, etc.)
            .merge(Env::prefixed("TABPAD_"))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path (config override or platform default)
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            Ok(dir.clone())
        } else {
            let dirs = Self::project_dirs()?;
            Ok(dirs.data_dir().to_path_buf())
        }
    }

    /// Get the log file path used in TUI mode
    pub fn log_file_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.log_file {
            Ok(path.clone())
        } else {
            Ok(self.data_dir()?.join("tabpad.log"))
        }
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        let dirs = Self::project_dirs()?;

        std::fs::create_dir_all(dirs.config_dir()).map_err(|_e| {
            Error::Config(ConfigError::DirectoryCreationFailed(
                dirs.config_dir().to_path_buf(),
            ))
        })?;

        let data_dir = self.data_dir()?;
        std::fs::create_dir_all(&data_dir)
            .map_err(|_| Error::Config(ConfigError::DirectoryCreationFailed(data_dir)))?;

        // Seed a default config file if none exists so users can discover it
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            let _ = Config::default().save();
        }

        Ok(())
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(&config_path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "tabpad", "tabpad").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}
