//! Configuration module
//!
//! Handles:
//! - User configuration (`config.toml` under the platform config dir)
//! - Platform paths for the data directory holding the session manifest,
//!   theme preference, and auto-named tab files

mod settings;

pub use settings::*;
