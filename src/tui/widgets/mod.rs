//! TUI widgets
//!
//! Custom ratatui widgets for the application:
//! - `TabBar` - tab titles with close markers and mouse hit-testing
//! - `Editor` - plain-text editing surface styled by the tab's theme

mod editor;
mod tab_bar;

pub use editor::*;
pub use tab_bar::*;
