//! Persisted session store
//!
//! Manages the on-disk session state in JSON format under the data
//! directory:
//! - `session.json` - ordered manifest of open tabs (title, path, theme)
//! - `theme.json` - the last theme chosen from the theme picker
//! - per-tab text files, auto-named `tab{N}.txt` for never-saved tabs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SessionError};

/// One manifest record, in tab display order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Display title
    pub title: String,
    /// Backing file path
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Legacy field: bare filename resolved against the data directory,
    /// accepted when `path` is absent. Never written.
    #[serde(default, skip_serializing)]
    pub file: Option<String>,
    /// Theme name; unknown names fall back to the default at load time
    #[serde(default)]
    pub theme: Option<String>,
}

impl SessionEntry {
    /// Resolve the backing path, honoring the legacy `file` field
    pub fn resolved_path(&self, data_dir: &Path) -> Option<PathBuf> {
        match (&self.path, &self.file) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(file)) => Some(data_dir.join(file)),
            (None, None) => None,
        }
    }
}

/// The persisted theme preference (`theme.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemePreference {
    pub selected_theme: String,
}

/// Filesystem access for everything the session manager persists
#[derive(Debug, Clone)]
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// The data directory this store writes under
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the session manifest
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Path of the theme preference file
    pub fn theme_file(&self) -> PathBuf {
        self.data_dir.join("theme.json")
    }

    /// Synthesized path for a never-saved tab at the given display position
    pub fn tab_file(&self, position: usize) -> PathBuf {
        self.data_dir.join(format!("tab{}.txt", position + 1))
    }

    /// Create the data directory if it does not exist
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            SessionError::PersistenceFailed(format!(
                "Failed to create data directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Load the manifest; `None` when no session has been saved yet
    pub fn load_manifest(&self) -> Result<Option<Vec<SessionEntry>>> {
        let path = self.session_file();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            SessionError::ManifestLoadFailed(format!("Failed to read manifest: {}", e))
        })?;

        let entries: Vec<SessionEntry> = serde_json::from_str(&content).map_err(|e| {
            SessionError::ManifestLoadFailed(format!("Failed to parse manifest: {}", e))
        })?;

        Ok(Some(entries))
    }

    /// Write the manifest as a single JSON document
    pub fn save_manifest(&self, entries: &[SessionEntry]) -> Result<()> {
        self.ensure_data_dir()?;

        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            SessionError::PersistenceFailed(format!("Failed to serialize manifest: {}", e))
        })?;

        std::fs::write(self.session_file(), content).map_err(|e| {
            SessionError::PersistenceFailed(format!("Failed to write manifest: {}", e))
        })?;

        Ok(())
    }

    /// Load the persisted theme preference name, if any
    pub fn load_theme_preference(&self) -> Option<String> {
        let path = self.theme_file();
        if !path.exists() {
            return None;
        }

        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<ThemePreference>(&content) {
            Ok(pref) => Some(pref.selected_theme),
            Err(e) => {
                warn!("Ignoring malformed theme preference: {}", e);
                None
            }
        }
    }

    /// Persist the theme preference immediately
    pub fn save_theme_preference(&self, name: &str) -> Result<()> {
        self.ensure_data_dir()?;

        let pref = ThemePreference {
            selected_theme: name.to_string(),
        };
        let content = serde_json::to_string(&pref).map_err(|e| {
            SessionError::PersistenceFailed(format!("Failed to serialize preference: {}", e))
        })?;

        std::fs::write(self.theme_file(), content).map_err(|e| {
            SessionError::PersistenceFailed(format!("Failed to write preference: {}", e))
        })?;

        Ok(())
    }

    /// Read a tab's backing file; a missing file yields empty content
    pub fn read_tab_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Ok(String::new());
        }

        std::fs::read_to_string(path).map_err(|e| {
            SessionError::TabReadFailed {
                path: path.to_path_buf(),
                source: e,
            }
            .into()
        })
    }

    /// Write a tab's full content to its backing file (overwrite semantics)
    pub fn write_tab_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SessionError::TabWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| {
            SessionError::TabWriteFailed {
                path: path.to_path_buf(),
                source: e,
            }
            .into()
        })
    }
}
