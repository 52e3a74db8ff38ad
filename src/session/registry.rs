//! Tab registry
//!
//! Ordered collection of open tabs plus selection tracking. The registry
//! owns each `TabRecord` outright: removal drops the title, path, theme,
//! and content in one step, so no partial metadata can survive a close.

use std::path::PathBuf;

use tracing::debug;

use super::{TabId, TabRecord, Theme};

/// Registry of open tabs, in display order
#[derive(Debug)]
pub struct TabRegistry {
    /// Open tabs, index = display position
    tabs: Vec<TabRecord>,
    /// Index of the selected tab, `None` only when no tabs exist
    selected: Option<usize>,
    /// Next value of the tab counter (1-based, never reused)
    next_number: u64,
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
            next_number: 1,
        }
    }

    /// Allocate a new tab and select it
    ///
    /// A missing title defaults to `Tab {n}`. The counter advances on every
    /// create, titled or not, so default titles reflect lifetime creation
    /// order rather than the current tab count.
    pub fn create_tab(
        &mut self,
        title: Option<String>,
        content: String,
        theme: Theme,
    ) -> TabId {
        let number = self.next_number;
        self.next_number += 1;

        let id = TabId::from_raw(number);
        let title = title.unwrap_or_else(|| format!("Tab {}", number));
        debug!("Creating tab {} ({:?})", id, title);

        self.tabs.push(TabRecord {
            id,
            title,
            path: None,
            theme,
            content,
        });
        self.selected = Some(self.tabs.len() - 1);

        id
    }

    /// Remove a tab, moving selection to a neighbor
    ///
    /// Returns the removed record, or `None` if the id is not registered.
    pub fn remove(&mut self, id: TabId) -> Option<TabRecord> {
        let index = self.position(id)?;
        let record = self.tabs.remove(index);
        debug!("Removed tab {} ({:?})", id, record.title);

        self.selected = if self.tabs.is_empty() {
            None
        } else {
            // Keep the selection on the same position where possible,
            // clamped to the new last tab.
            let current = self.selected.unwrap_or(0);
            let next = if current > index { current - 1 } else { current };
            Some(next.min(self.tabs.len() - 1))
        };

        Some(record)
    }

    /// Select a tab by id; ignored if the id is not registered
    pub fn select(&mut self, id: TabId) {
        if let Some(index) = self.position(id) {
            self.selected = Some(index);
        }
    }

    /// Select the next tab in display order, wrapping around
    pub fn select_next(&mut self) {
        if let Some(current) = self.selected {
            self.selected = Some((current + 1) % self.tabs.len());
        }
    }

    /// Select the previous tab in display order, wrapping around
    pub fn select_prev(&mut self) {
        if let Some(current) = self.selected {
            self.selected = Some((current + self.tabs.len() - 1) % self.tabs.len());
        }
    }

    /// The selected tab's id, or `None` when no tabs exist
    pub fn selected(&self) -> Option<TabId> {
        self.selected.map(|i| self.tabs[i].id)
    }

    /// Display position of a tab
    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Get a tab by id
    pub fn get(&self, id: TabId) -> Option<&TabRecord> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Get a mutable tab by id
    pub fn get_mut(&mut self, id: TabId) -> Option<&mut TabRecord> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// Bind or rebind a tab's backing file path
    pub fn bind_path(&mut self, id: TabId, path: PathBuf) {
        if let Some(tab) = self.get_mut(id) {
            tab.path = Some(path);
        }
    }

    /// Iterate tabs in display order
    pub fn iter(&self) -> impl Iterator<Item = &TabRecord> {
        self.tabs.iter()
    }

    /// Number of open tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the registry has no open tabs
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titles_are_monotonic() {
        let mut registry = TabRegistry::new();
        let a = registry.create_tab(None, String::new(), Theme::default());
        let b = registry.create_tab(None, String::new(), Theme::default());

        assert_eq!(registry.get(a).unwrap().title, "Tab 1");
        assert_eq!(registry.get(b).unwrap().title, "Tab 2");

        // Closing and reopening never reuses a number
        registry.remove(b);
        let c = registry.create_tab(None, String::new(), Theme::default());
        assert_eq!(registry.get(c).unwrap().title, "Tab 3");
    }

    #[test]
    fn test_explicit_title_still_advances_counter() {
        let mut registry = TabRegistry::new();
        registry.create_tab(Some("notes.txt".to_string()), String::new(), Theme::default());
        let b = registry.create_tab(None, String::new(), Theme::default());
        assert_eq!(registry.get(b).unwrap().title, "Tab 2");
    }

    #[test]
    fn test_new_tab_is_selected() {
        let mut registry = TabRegistry::new();
        let a = registry.create_tab(None, String::new(), Theme::default());
        assert_eq!(registry.selected(), Some(a));

        let b = registry.create_tab(None, String::new(), Theme::default());
        assert_eq!(registry.selected(), Some(b));

        registry.select(a);
        assert_eq!(registry.selected(), Some(a));
    }

    #[test]
    fn test_remove_moves_selection_to_neighbor() {
        let mut registry = TabRegistry::new();
        let a = registry.create_tab(None, String::new(), Theme::default());
        let b = registry.create_tab(None, String::new(), Theme::default());
        let c = registry.create_tab(None, String::new(), Theme::default());

        registry.select(b);
        registry.remove(b);
        // Selection stays at the same position, now occupied by c
        assert_eq!(registry.selected(), Some(c));

        registry.remove(c);
        assert_eq!(registry.selected(), Some(a));

        registry.remove(a);
        assert_eq!(registry.selected(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_drops_all_metadata() {
        let mut registry = TabRegistry::new();
        let a = registry.create_tab(None, "body".to_string(), Theme::NightMode);
        registry.bind_path(a, PathBuf::from("/tmp/a.txt"));

        let removed = registry.remove(a).unwrap();
        assert_eq!(removed.theme, Theme::NightMode);
        assert_eq!(removed.path, Some(PathBuf::from("/tmp/a.txt")));

        assert!(registry.get(a).is_none());
        assert!(registry.position(a).is_none());
    }

    #[test]
    fn test_select_wrapping() {
        let mut registry = TabRegistry::new();
        let a = registry.create_tab(None, String::new(), Theme::default());
        let b = registry.create_tab(None, String::new(), Theme::default());
        let c = registry.create_tab(None, String::new(), Theme::default());

        registry.select(c);
        registry.select_next();
        assert_eq!(registry.selected(), Some(a));

        registry.select_prev();
        assert_eq!(registry.selected(), Some(c));

        registry.select_prev();
        assert_eq!(registry.selected(), Some(b));
    }
}
