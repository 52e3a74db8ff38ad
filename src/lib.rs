//! Tabpad - A multi-tab terminal notepad with per-tab color themes
//!
//! This crate provides a small event-driven text editor built around a
//! headless session core: tabs are plain records owned by a registry, and
//! the terminal UI only holds tab identifiers.
//!
//! # Architecture
//!
//! - **Session Manager** - owns the tab registry, the close/save flow,
//!   and the persistence bridge (manifest + theme preference + tab files)
//! - **TUI** - ratatui shell: tab bar, editor pane, modal dialogs
//!
//! # Modules
//!
//! - [`session`] - Tab registry, session manager, persisted session store
//! - [`tui`] - Event-driven terminal UI with ratatui
//! - [`config`] - Layered configuration and platform paths
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod session;
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{CloseDecision, CloseOutcome, SessionManager, TabId, TabRecord, Theme};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
