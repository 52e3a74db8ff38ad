//! Terminal UI module using ratatui
//!
//! Event-driven TUI with:
//! - Tab bar with mouse hit-testing
//! - Plain-text editor pane styled by the tab's theme
//! - Modal overlays for the close prompt, save path, and theme picker

mod app;
mod event;
mod theme;
mod widgets;

pub use app::*;
pub use event::*;
pub use theme::*;
pub use widgets::*;
