//! Session manager - coordinates tab lifecycle
//!
//! Handles tab creation, the close/save confirmation flow, theme
//! application, and session persistence. All flows are headless: the UI
//! drives them with explicit decisions, so user cancellation is a normal
//! outcome rather than an error.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::error::{Result, SessionError};
use crate::session::{SessionEntry, SessionStore, TabId, TabRecord, TabRegistry, Theme};

/// User decision for the close prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Save the tab, then close it
    Save,
    /// Close without saving
    Discard,
    /// Keep the tab open
    Cancel,
}

/// Result of a step in the close flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed
    Closed,
    /// The tab has unsaved content; a decision is required
    NeedsDecision,
    /// Saving requires a destination path first
    NeedsPath,
    /// The close was aborted; the tab remains open and unmodified
    Cancelled,
}

/// Result of a save request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content was written to the tab's bound path
    Saved(PathBuf),
    /// The tab has no bound path; a destination is required
    NeedsPath,
}

/// Session manager: tab registry + persistence bridge + close flow
pub struct SessionManager {
    registry: TabRegistry,
    store: SessionStore,
    /// Last theme chosen from the picker; seeds new tabs
    selected_theme: Theme,
}

impl SessionManager {
    /// Create a manager persisting under the given store
    pub fn new(store: SessionStore) -> Self {
        Self {
            registry: TabRegistry::new(),
            store,
            selected_theme: Theme::default(),
        }
    }

    /// The underlying tab registry
    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    /// The persistence store
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The global last-selected theme preference
    pub fn selected_theme(&self) -> Theme {
        self.selected_theme
    }

    /// Create a tab; a missing theme is seeded from the global preference
    pub fn create_tab(
        &mut self,
        title: Option<String>,
        content: String,
        theme: Option<Theme>,
    ) -> TabId {
        let theme = theme.unwrap_or(self.selected_theme);
        self.registry.create_tab(title, content, theme)
    }

    /// The selected tab's record
    pub fn selected_tab(&self) -> Option<&TabRecord> {
        self.registry.selected().and_then(|id| self.registry.get(id))
    }

    /// The selected tab's id
    pub fn selected_id(&self) -> Option<TabId> {
        self.registry.selected()
    }

    /// Get a tab by id
    pub fn get_tab(&self, id: TabId) -> Option<&TabRecord> {
        self.registry.get(id)
    }

    /// Get a mutable tab by id (the editor mutates content through this)
    pub fn get_tab_mut(&mut self, id: TabId) -> Option<&mut TabRecord> {
        self.registry.get_mut(id)
    }

    /// Select a tab; its own stored theme applies when it is rendered
    pub fn select_tab(&mut self, id: TabId) {
        self.registry.select(id);
    }

    /// Select the next tab in display order
    pub fn select_next(&mut self) {
        self.registry.select_next();
    }

    /// Select the previous tab in display order
    pub fn select_prev(&mut self) {
        self.registry.select_prev();
    }

    /// Begin closing a tab
    ///
    /// Whitespace-only content skips the prompt entirely; otherwise the
    /// caller must follow up with [`resolve_close`](Self::resolve_close).
    #[instrument(skip(self))]
    pub fn close_tab(&mut self, id: TabId) -> Result<CloseOutcome> {
        let tab = self.registry.get(id).ok_or(SessionError::TabNotFound(id))?;

        if !tab.has_content() {
            self.registry.remove(id);
            info!("Closed empty tab {}", id);
            return Ok(CloseOutcome::Closed);
        }

        Ok(CloseOutcome::NeedsDecision)
    }

    /// Apply the user's decision for a close prompt
    #[instrument(skip(self))]
    pub fn resolve_close(&mut self, id: TabId, decision: CloseDecision) -> Result<CloseOutcome> {
        match decision {
            CloseDecision::Save => match self.save_tab(id)? {
                SaveOutcome::Saved(_) => {
                    self.registry.remove(id);
                    info!("Closed tab {} after saving", id);
                    Ok(CloseOutcome::Closed)
                }
                SaveOutcome::NeedsPath => Ok(CloseOutcome::NeedsPath),
            },
            CloseDecision::Discard => {
                self.registry.remove(id);
                info!("Closed tab {} without saving", id);
                Ok(CloseOutcome::Closed)
            }
            CloseDecision::Cancel => Ok(CloseOutcome::Cancelled),
        }
    }

    /// Finish a save-then-close once the user has chosen a destination
    ///
    /// A write failure propagates and leaves the tab open.
    pub fn resolve_close_with_path(&mut self, id: TabId, path: PathBuf) -> Result<CloseOutcome> {
        self.save_tab_at(id, path)?;
        self.registry.remove(id);
        info!("Closed tab {} after saving to chosen path", id);
        Ok(CloseOutcome::Closed)
    }

    /// Save a tab to its bound path, or report that one must be chosen
    pub fn save_tab(&mut self, id: TabId) -> Result<SaveOutcome> {
        let tab = self.registry.get(id).ok_or(SessionError::TabNotFound(id))?;

        match tab.path.clone() {
            Some(path) => {
                self.store.write_tab_file(&path, &tab.content)?;
                info!("Saved tab {} to {}", id, path.display());
                Ok(SaveOutcome::Saved(path))
            }
            None => Ok(SaveOutcome::NeedsPath),
        }
    }

    /// Save a tab to a specific path and bind (or rebind) it
    ///
    /// Used both for first saves and for save-as.
    pub fn save_tab_at(&mut self, id: TabId, path: PathBuf) -> Result<()> {
        let tab = self.registry.get(id).ok_or(SessionError::TabNotFound(id))?;

        self.store.write_tab_file(&path, &tab.content)?;
        self.registry.bind_path(id, path.clone());
        info!("Saved tab {} to {}", id, path.display());
        Ok(())
    }

    /// Apply a theme to the selected tab and persist it as the preference
    ///
    /// Only the selected tab changes; other tabs keep their own themes.
    #[instrument(skip(self))]
    pub fn apply_theme(&mut self, theme: Theme) -> Result<()> {
        self.selected_theme = theme;

        if let Some(id) = self.registry.selected() {
            if let Some(tab) = self.registry.get_mut(id) {
                tab.theme = theme;
            }
        }

        self.store.save_theme_preference(theme.name())?;
        info!("Applied theme {:?}", theme.name());
        Ok(())
    }

    /// Persist every open tab and the manifest
    ///
    /// Tabs without a bound path get one synthesized from their 1-based
    /// display position (`tab{N}.txt` in the data directory) and keep it.
    /// This is the only path that durably stores every tab's content. A
    /// failure partway leaves earlier tabs written and the manifest stale.
    #[instrument(skip(self))]
    pub fn save_session(&mut self) -> Result<()> {
        self.store.ensure_data_dir()?;

        // Bind synthesized paths first so the manifest sees the final paths.
        let unbound: Vec<(TabId, PathBuf)> = self
            .registry
            .iter()
            .enumerate()
            .filter(|(_, tab)| tab.path.is_none())
            .map(|(position, tab)| (tab.id, self.store.tab_file(position)))
            .collect();
        for (id, path) in unbound {
            self.registry.bind_path(id, path);
        }

        let mut entries = Vec::with_capacity(self.registry.len());
        for tab in self.registry.iter() {
            let path = tab
                .path
                .clone()
                .ok_or_else(|| SessionError::PersistenceFailed("unbound tab".to_string()))?;
            self.store.write_tab_file(&path, &tab.content)?;
            entries.push(SessionEntry {
                title: tab.title.clone(),
                path: Some(path),
                file: None,
                theme: Some(tab.theme.name().to_string()),
            });
        }

        self.store.save_manifest(&entries)?;
        self.store.save_theme_preference(self.selected_theme.name())?;

        info!("Saved session with {} tabs", entries.len());
        Ok(())
    }

    /// Reconstruct tabs from the manifest, or start with one empty tab
    ///
    /// Manifest records whose files no longer exist produce tabs with empty
    /// content; unknown theme names fall back to the default.
    #[instrument(skip(self))]
    pub fn load_session(&mut self) -> Result<()> {
        if let Some(name) = self.store.load_theme_preference() {
            self.selected_theme = Theme::resolve(&name);
        }

        match self.store.load_manifest()? {
            Some(entries) => {
                info!("Restoring session with {} tabs", entries.len());
                for entry in entries {
                    let path = entry.resolved_path(self.store.data_dir());
                    let content = match &path {
                        Some(path) => self.store.read_tab_file(path)?,
                        None => String::new(),
                    };
                    let theme = Theme::resolve(entry.theme.as_deref().unwrap_or_default());

                    let id = self.registry.create_tab(Some(entry.title), content, theme);
                    if let Some(path) = path {
                        self.registry.bind_path(id, path);
                    }
                }
            }
            None => {
                info!("No saved session, starting with one empty tab");
                self.registry.create_tab(None, String::new(), self.selected_theme);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, SessionManager) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        (dir, SessionManager::new(store))
    }

    #[test]
    fn test_close_empty_tab_skips_prompt() {
        let (_dir, mut manager) = manager();
        let id = manager.create_tab(None, "   \n".to_string(), None);

        assert_eq!(manager.close_tab(id).unwrap(), CloseOutcome::Closed);
        assert!(manager.get_tab(id).is_none());
    }

    #[test]
    fn test_close_with_content_needs_decision() {
        let (_dir, mut manager) = manager();
        let id = manager.create_tab(None, "draft".to_string(), None);

        assert_eq!(manager.close_tab(id).unwrap(), CloseOutcome::NeedsDecision);
        assert!(manager.get_tab(id).is_some());
    }

    #[test]
    fn test_close_cancel_leaves_tab_open() {
        let (_dir, mut manager) = manager();
        let id = manager.create_tab(None, "draft".to_string(), None);

        let outcome = manager.resolve_close(id, CloseDecision::Cancel).unwrap();
        assert_eq!(outcome, CloseOutcome::Cancelled);

        let tab = manager.get_tab(id).unwrap();
        assert_eq!(tab.content, "draft");
        assert_eq!(manager.selected_id(), Some(id));
    }

    #[test]
    fn test_close_discard_writes_nothing() {
        let (dir, mut manager) = manager();
        let id = manager.create_tab(None, "draft".to_string(), None);

        let outcome = manager.resolve_close(id, CloseDecision::Discard).unwrap();
        assert_eq!(outcome, CloseOutcome::Closed);
        assert!(manager.get_tab(id).is_none());

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .map(|rd| rd.filter_map(|e| e.ok()).collect())
            .unwrap_or_default();
        assert!(files.is_empty());
    }

    #[test]
    fn test_close_save_with_bound_path() {
        let (dir, mut manager) = manager();
        let path = dir.path().join("notes.txt");
        let id = manager.create_tab(None, "draft".to_string(), None);
        manager.save_tab_at(id, path.clone()).unwrap();

        // Edit after the first save, then close via Save
        manager.get_tab_mut(id).unwrap().content = "final".to_string();
        let outcome = manager.resolve_close(id, CloseDecision::Save).unwrap();
        assert_eq!(outcome, CloseOutcome::Closed);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "final");
        assert!(manager.get_tab(id).is_none());
    }

    #[test]
    fn test_close_save_without_path_needs_path() {
        let (_dir, mut manager) = manager();
        let id = manager.create_tab(None, "draft".to_string(), None);

        let outcome = manager.resolve_close(id, CloseDecision::Save).unwrap();
        assert_eq!(outcome, CloseOutcome::NeedsPath);
        assert!(manager.get_tab(id).is_some());
    }

    #[test]
    fn test_save_as_rebinds_path() {
        let (dir, mut manager) = manager();
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.txt");

        let id = manager.create_tab(None, "one".to_string(), None);
        manager.save_tab_at(id, first.clone()).unwrap();
        manager.save_tab_at(id, second.clone()).unwrap();

        assert_eq!(manager.get_tab(id).unwrap().path, Some(second.clone()));

        // Plain save now targets the rebound path
        manager.get_tab_mut(id).unwrap().content = "two".to_string();
        let outcome = manager.save_tab(id).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(second.clone()));
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "two");
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "one");
    }

    #[test]
    fn test_apply_theme_only_touches_selected_tab() {
        let (_dir, mut manager) = manager();
        let a = manager.create_tab(None, String::new(), None);
        let b = manager.create_tab(None, String::new(), None);

        manager.select_tab(b);
        manager.apply_theme(Theme::NightMode).unwrap();

        assert_eq!(manager.get_tab(a).unwrap().theme, Theme::ClassicWhite);
        assert_eq!(manager.get_tab(b).unwrap().theme, Theme::NightMode);

        // Reselecting a restores its own theme, not the global preference
        manager.select_tab(a);
        assert_eq!(manager.selected_tab().unwrap().theme, Theme::ClassicWhite);
        assert_eq!(manager.selected_theme(), Theme::NightMode);
    }

    #[test]
    fn test_apply_theme_persists_preference_immediately() {
        let (_dir, mut manager) = manager();
        manager.create_tab(None, String::new(), None);
        manager.apply_theme(Theme::PaleGreen).unwrap();

        assert_eq!(
            manager.store().load_theme_preference().as_deref(),
            Some("Pale Green")
        );
    }

    #[test]
    fn test_preference_seeds_new_tabs() {
        let (_dir, mut manager) = manager();
        manager.create_tab(None, String::new(), None);
        manager.apply_theme(Theme::NightMode).unwrap();

        let id = manager.create_tab(None, String::new(), None);
        assert_eq!(manager.get_tab(id).unwrap().theme, Theme::NightMode);
    }

    #[test]
    fn test_save_session_synthesizes_and_binds_paths() {
        let (dir, mut manager) = manager();
        let bound = dir.path().join("bound.txt");

        let a = manager.create_tab(None, "first".to_string(), None);
        manager.save_tab_at(a, bound.clone()).unwrap();
        let b = manager.create_tab(None, "second".to_string(), None);

        manager.save_session().unwrap();

        assert_eq!(std::fs::read_to_string(&bound).unwrap(), "first");
        let synthesized = manager.store().tab_file(1);
        assert_eq!(std::fs::read_to_string(&synthesized).unwrap(), "second");
        assert_eq!(manager.get_tab(b).unwrap().path, Some(synthesized));
    }

    #[test]
    fn test_session_roundtrip() {
        let dir = TempDir::new().unwrap();

        {
            let store = SessionStore::new(dir.path().to_path_buf());
            let mut manager = SessionManager::new(store);
            manager.create_tab(None, "alpha".to_string(), None);
            let b = manager.create_tab(None, "beta".to_string(), None);
            manager.select_tab(b);
            manager.apply_theme(Theme::NightMode).unwrap();
            manager.save_session().unwrap();
        }

        let store = SessionStore::new(dir.path().to_path_buf());
        let mut manager = SessionManager::new(store);
        manager.load_session().unwrap();

        let tabs: Vec<_> = manager.registry().iter().collect();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].title, "Tab 1");
        assert_eq!(tabs[0].content, "alpha");
        assert_eq!(tabs[0].theme, Theme::ClassicWhite);
        assert_eq!(tabs[1].title, "Tab 2");
        assert_eq!(tabs[1].content, "beta");
        assert_eq!(tabs[1].theme, Theme::NightMode);
        assert_eq!(manager.selected_theme(), Theme::NightMode);
    }

    #[test]
    fn test_load_session_tolerates_deleted_file() {
        let dir = TempDir::new().unwrap();

        {
            let store = SessionStore::new(dir.path().to_path_buf());
            let mut manager = SessionManager::new(store);
            manager.create_tab(None, "ephemeral".to_string(), None);
            manager.save_session().unwrap();
        }

        let store = SessionStore::new(dir.path().to_path_buf());
        std::fs::remove_file(store.tab_file(0)).unwrap();

        let mut manager = SessionManager::new(store);
        manager.load_session().unwrap();

        let tabs: Vec<_> = manager.registry().iter().collect();
        assert_eq!(tabs.len(), 1);
        assert!(tabs[0].content.is_empty());
    }

    #[test]
    fn test_load_session_without_manifest_creates_one_tab() {
        let (_dir, mut manager) = manager();
        manager.load_session().unwrap();

        let tabs: Vec<_> = manager.registry().iter().collect();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "Tab 1");
        assert!(tabs[0].content.is_empty());
        assert_eq!(tabs[0].theme, Theme::ClassicWhite);
    }

    #[test]
    fn test_load_session_unknown_theme_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());

        let json = r#"[{"title": "t", "path": "/nonexistent/x.txt", "theme": "Hot Pink"}]"#;
        std::fs::write(store.session_file(), json).unwrap();

        let mut manager = SessionManager::new(store);
        manager.load_session().unwrap();

        let tabs: Vec<_> = manager.registry().iter().collect();
        assert_eq!(tabs[0].theme, Theme::ClassicWhite);
    }
}
