//! Core session types
//!
//! Defines the tab model:
//! - `TabId` is an opaque counter-derived token held by the UI layer
//! - `TabRecord` carries everything the registry tracks for one open tab
//! - `Theme` is the fixed table of named foreground/background color pairs

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Unique identifier for an open tab
///
/// Derived from a monotonically increasing counter that is never reused,
/// even after tabs close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(u64);

impl TabId {
    /// Create from a raw counter value
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw counter value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A foreground/background RGB pair for an editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub bg: (u8, u8, u8),
    pub fg: (u8, u8, u8),
}

/// Named color theme for a tab's editing surface
///
/// The set is fixed; persisted names outside it resolve to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "Classic White")]
    ClassicWhite,
    #[serde(rename = "Night Mode")]
    NightMode,
    #[serde(rename = "Light Sky Blue")]
    LightSkyBlue,
    #[serde(rename = "Medium Yellow")]
    MediumYellow,
    #[serde(rename = "Pale Green")]
    PaleGreen,
}

impl Theme {
    /// All themes, in menu order
    pub const ALL: [Theme; 5] = [
        Theme::ClassicWhite,
        Theme::NightMode,
        Theme::LightSkyBlue,
        Theme::MediumYellow,
        Theme::PaleGreen,
    ];

    /// The display name, also used as the persisted form
    pub fn name(&self) -> &'static str {
        match self {
            Theme::ClassicWhite => "Classic White",
            Theme::NightMode => "Night Mode",
            Theme::LightSkyBlue => "Light Sky Blue",
            Theme::MediumYellow => "Medium Yellow",
            Theme::PaleGreen => "Pale Green",
        }
    }

    /// Parse an exact theme name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Resolve a possibly-unknown persisted name, falling back to the default
    pub fn resolve(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    /// The background/foreground colors for this theme
    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::ClassicWhite => ThemeColors {
                bg: (0xff, 0xff, 0xff),
                fg: (0x00, 0x00, 0x00),
            },
            Theme::NightMode => ThemeColors {
                bg: (0x1e, 0x1e, 0x1e),
                fg: (0xd4, 0xd4, 0xd4),
            },
            Theme::LightSkyBlue => ThemeColors {
                bg: (0xad, 0xd8, 0xe6),
                fg: (0x00, 0x00, 0x00),
            },
            Theme::MediumYellow => ThemeColors {
                bg: (0xdb, 0xd7, 0x70),
                fg: (0x00, 0x00, 0x00),
            },
            Theme::PaleGreen => ThemeColors {
                bg: (0x98, 0xfb, 0x98),
                fg: (0x00, 0x00, 0x00),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One open tab
///
/// The record owns all per-tab metadata, so closing a tab removes the
/// title, path, theme, and content together. The path is `None` until the
/// first save binds it; save-as rebinds it.
#[derive(Debug, Clone)]
pub struct TabRecord {
    /// Unique identifier
    pub id: TabId,
    /// Display title
    pub title: String,
    /// Backing file, if one has been chosen or synthesized
    pub path: Option<PathBuf>,
    /// This tab's color theme
    pub theme: Theme,
    /// Text content
    pub content: String,
}

impl TabRecord {
    /// Whether the tab has any non-whitespace content
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
