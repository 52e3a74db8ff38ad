//! Error types for tabpad
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.
//!
//! User cancellation (dismissing a dialog) is never represented here; it is a
//! normal negative outcome handled by the session manager's flow types.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::TabId;

/// Top-level error type for tabpad
#[derive(Error, Debug)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Session management errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Failed to write {path}: {source}")]
    TabWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    TabReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load session manifest: {0}")]
    ManifestLoadFailed(String),

    #[error("Failed to persist session state: {0}")]
    PersistenceFailed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create data directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
