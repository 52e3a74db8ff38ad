//! Session module
//!
//! The headless core of the editor:
//! - [`types`] - tab identifiers, records, and the fixed theme table
//! - [`registry`] - ordered tab registry with selection tracking
//! - [`store`] - persisted session manifest, theme preference, tab files
//! - [`manager`] - session lifecycle: create/close/save flows and restore

mod manager;
mod registry;
mod store;
mod types;

pub use manager::*;
pub use registry::*;
pub use store::*;
pub use types::*;
