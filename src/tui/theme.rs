//! TUI styling
//!
//! Two layers of styling with different owners:
//! - the **chrome palette** styles the application itself (tab bar, status
//!   bar, modal borders) and adapts to the terminal's color depth
//! - **document styles** render a tab's editing surface from its own
//!   [`Theme`](crate::session::Theme), the fixed per-tab color table

use ratatui::style::{Color, Style};

use crate::session::Theme;

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        // Check COLORTERM first (most reliable for true color)
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::TrueColor;
            }
        }

        // Check TERM for 256 color support
        if let Ok(term) = std::env::var("TERM") {
            if term.contains("kitty") || term.contains("alacritty") {
                return Self::TrueColor;
            }
            if term.contains("256color") {
                return Self::Indexed;
            }
        }

        Self::Basic
    }
}

/// Colors for the application chrome
#[derive(Clone)]
pub struct ChromePalette {
    /// Color mode the palette was built for
    pub mode: ColorMode,

    // Tab bar
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,

    // Modal borders
    pub modal_info: Color,
    pub modal_warning: Color,
    pub modal_error: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for ChromePalette {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl ChromePalette {
    /// Create a palette for the specified color mode
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    /// Basic 16-color palette (maximum compatibility)
    pub fn basic() -> Self {
        Self {
            mode: ColorMode::Basic,
            tab_active_bg: Color::Blue,
            tab_active_fg: Color::White,
            tab_inactive_fg: Color::DarkGray,
            modal_info: Color::Cyan,
            modal_warning: Color::Yellow,
            modal_error: Color::Red,
            status_bar_bg: Color::Blue,
            status_bar_fg: Color::White,
        }
    }

    /// 256-color palette
    pub fn indexed() -> Self {
        Self {
            mode: ColorMode::Indexed,
            tab_active_bg: Color::Indexed(60),
            tab_active_fg: Color::Indexed(255),
            tab_inactive_fg: Color::Indexed(246),
            modal_info: Color::Indexed(117),
            modal_warning: Color::Indexed(222),
            modal_error: Color::Indexed(210),
            status_bar_bg: Color::Indexed(236),
            status_bar_fg: Color::Indexed(252),
        }
    }

    /// True color palette
    pub fn truecolor() -> Self {
        Self {
            mode: ColorMode::TrueColor,
            tab_active_bg: Color::Rgb(69, 71, 90),
            tab_active_fg: Color::Rgb(245, 245, 250),
            tab_inactive_fg: Color::Rgb(147, 153, 178),
            modal_info: Color::Rgb(137, 180, 250),
            modal_warning: Color::Rgb(249, 226, 175),
            modal_error: Color::Rgb(243, 139, 168),
            status_bar_bg: Color::Rgb(49, 50, 68),
            status_bar_fg: Color::Rgb(205, 214, 244),
        }
    }

    /// Style for the active tab label
    pub fn tab_active(&self) -> Style {
        Style::default()
            .bg(self.tab_active_bg)
            .fg(self.tab_active_fg)
    }

    /// Style for inactive tab labels
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.tab_inactive_fg)
    }

    /// Style for the status bar
    pub fn status_bar(&self) -> Style {
        Style::default()
            .bg(self.status_bar_bg)
            .fg(self.status_bar_fg)
    }

    /// Style for a document theme's editing surface at this color depth
    pub fn document_style(&self, theme: Theme) -> Style {
        match self.mode {
            ColorMode::TrueColor => {
                let colors = theme.colors();
                Style::default()
                    .bg(Color::Rgb(colors.bg.0, colors.bg.1, colors.bg.2))
                    .fg(Color::Rgb(colors.fg.0, colors.fg.1, colors.fg.2))
            }
            ColorMode::Indexed => {
                let (bg, fg) = match theme {
                    Theme::ClassicWhite => (231, 16),
                    Theme::NightMode => (234, 252),
                    Theme::LightSkyBlue => (152, 16),
                    Theme::MediumYellow => (186, 16),
                    Theme::PaleGreen => (120, 16),
                };
                Style::default().bg(Color::Indexed(bg)).fg(Color::Indexed(fg))
            }
            ColorMode::Basic => {
                let (bg, fg) = match theme {
                    Theme::ClassicWhite => (Color::White, Color::Black),
                    Theme::NightMode => (Color::Black, Color::Gray),
                    Theme::LightSkyBlue => (Color::Cyan, Color::Black),
                    Theme::MediumYellow => (Color::Yellow, Color::Black),
                    Theme::PaleGreen => (Color::Green, Color::Black),
                };
                Style::default().bg(bg).fg(fg)
            }
        }
    }
}
