//! Tab bar widget
//!
//! Renders open tab titles in display order with a close marker, and maps
//! mouse clicks back to tab ids. Hit-testing fails closed: a click that
//! does not land on a tab label resolves to `None` and is ignored by the
//! caller, never absorbed silently.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::session::TabId;
use crate::tui::ChromePalette;

/// One entry in the tab bar
#[derive(Debug, Clone)]
pub struct TabBarItem {
    pub id: TabId,
    pub title: String,
    pub selected: bool,
}

impl TabBarItem {
    /// The rendered label, shared by rendering and hit-testing
    fn label(&self) -> String {
        format!(" {} \u{00d7} ", self.title)
    }
}

/// Tab bar widget
pub struct TabBar<'a> {
    items: &'a [TabBarItem],
    palette: &'a ChromePalette,
}

impl<'a> TabBar<'a> {
    /// Create a tab bar over the given items
    pub fn new(items: &'a [TabBarItem], palette: &'a ChromePalette) -> Self {
        Self { items, palette }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span<'_>> = self
            .items
            .iter()
            .map(|item| {
                let style = if item.selected {
                    self.palette.tab_active()
                } else {
                    self.palette.tab_inactive()
                };
                Span::styled(item.label(), style)
            })
            .collect();

        Line::from(spans).render(area, buf);
    }
}

/// Resolve a click column to the tab whose label covers it
///
/// Returns `None` for clicks past the last label (empty tab-bar space).
pub fn hit_test(items: &[TabBarItem], column: u16) -> Option<TabId> {
    let column = column as usize;
    let mut offset = 0usize;

    for item in items {
        let width = item.label().width();
        if column < offset + width {
            return Some(item.id);
        }
        offset += width;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<TabBarItem> {
        vec![
            TabBarItem {
                id: TabId::from_raw(1),
                title: "Tab 1".to_string(),
                selected: true,
            },
            TabBarItem {
                id: TabId::from_raw(2),
                title: "notes".to_string(),
                selected: false,
            },
        ]
    }

    #[test]
    fn test_hit_test_first_tab() {
        let items = items();
        // " Tab 1 × " covers columns 0..9
        assert_eq!(hit_test(&items, 0), Some(TabId::from_raw(1)));
        assert_eq!(hit_test(&items, 8), Some(TabId::from_raw(1)));
    }

    #[test]
    fn test_hit_test_second_tab() {
        let items = items();
        assert_eq!(hit_test(&items, 9), Some(TabId::from_raw(2)));
    }

    #[test]
    fn test_hit_test_fails_closed_past_labels() {
        let items = items();
        assert_eq!(hit_test(&items, 200), None);
        assert_eq!(hit_test(&[], 0), None);
    }
}
