//! Integration tests for tabpad's session core
//!
//! All tests use isolated temp data directories to avoid polluting user data.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tabpad::session::{
    CloseDecision, CloseOutcome, SessionManager, SessionStore, Theme,
};

fn manager_in(dir: &TempDir) -> SessionManager {
    SessionManager::new(SessionStore::new(dir.path().to_path_buf()))
}

#[test]
fn first_launch_creates_single_empty_tab() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager_in(&dir);

    manager.load_session().unwrap();

    let tabs: Vec<_> = manager.registry().iter().collect();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].title, "Tab 1");
    assert_eq!(tabs[0].content, "");
    assert_eq!(tabs[0].theme, Theme::ClassicWhite);
    assert_eq!(manager.selected_id(), Some(tabs[0].id));
}

#[test]
fn session_survives_relaunch_end_to_end() {
    let dir = TempDir::new().unwrap();

    // First launch: no manifest
    {
        let mut manager = manager_in(&dir);
        manager.load_session().unwrap();
        assert_eq!(manager.registry().len(), 1);

        // Write into the default tab, open two more
        let first = manager.selected_id().unwrap();
        manager.get_tab_mut(first).unwrap().content = "first tab".to_string();

        let second = manager.create_tab(None, "second tab".to_string(), None);
        manager.create_tab(None, "third tab".to_string(), None);

        // Theme only the second tab
        manager.select_tab(second);
        manager.apply_theme(Theme::NightMode).unwrap();

        manager.save_session().unwrap();
    }

    // Relaunch
    let mut manager = manager_in(&dir);
    manager.load_session().unwrap();

    let tabs: Vec<_> = manager.registry().iter().collect();
    assert_eq!(tabs.len(), 3);

    assert_eq!(tabs[0].title, "Tab 1");
    assert_eq!(tabs[0].content, "first tab");
    assert_eq!(tabs[0].theme, Theme::ClassicWhite);

    assert_eq!(tabs[1].title, "Tab 2");
    assert_eq!(tabs[1].content, "second tab");
    assert_eq!(tabs[1].theme, Theme::NightMode);

    assert_eq!(tabs[2].title, "Tab 3");
    assert_eq!(tabs[2].content, "third tab");
    assert_eq!(tabs[2].theme, Theme::ClassicWhite);

    // The last picked theme is restored as the suggested default
    assert_eq!(manager.selected_theme(), Theme::NightMode);
}

#[test]
fn roundtrip_preserves_bound_and_synthesized_paths() {
    let dir = TempDir::new().unwrap();
    let chosen = dir.path().join("chosen.txt");

    {
        let mut manager = manager_in(&dir);
        let a = manager.create_tab(None, "explicitly saved".to_string(), None);
        manager.save_tab_at(a, chosen.clone()).unwrap();
        manager.create_tab(None, "never saved".to_string(), None);
        manager.save_session().unwrap();
    }

    let mut manager = manager_in(&dir);
    manager.load_session().unwrap();

    let tabs: Vec<_> = manager.registry().iter().collect();
    assert_eq!(tabs[0].path, Some(chosen));
    assert_eq!(tabs[0].content, "explicitly saved");
    assert_eq!(tabs[1].path, Some(dir.path().join("tab2.txt")));
    assert_eq!(tabs[1].content, "never saved");
}

#[test]
fn manifest_referencing_deleted_file_loads_empty_tab() {
    let dir = TempDir::new().unwrap();

    {
        let mut manager = manager_in(&dir);
        manager.create_tab(None, "going away".to_string(), None);
        manager.save_session().unwrap();
    }

    std::fs::remove_file(dir.path().join("tab1.txt")).unwrap();

    let mut manager = manager_in(&dir);
    manager.load_session().unwrap();

    let tabs: Vec<_> = manager.registry().iter().collect();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].title, "Tab 1");
    assert_eq!(tabs[0].content, "");
}

#[test]
fn legacy_manifest_with_file_field_is_accepted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("old.txt"), "from an older version").unwrap();
    std::fs::write(
        dir.path().join("session.json"),
        r#"[{"title": "Old Tab", "file": "old.txt", "theme": "Pale Green"}]"#,
    )
    .unwrap();

    let mut manager = manager_in(&dir);
    manager.load_session().unwrap();

    let tabs: Vec<_> = manager.registry().iter().collect();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].title, "Old Tab");
    assert_eq!(tabs[0].content, "from an older version");
    assert_eq!(tabs[0].theme, Theme::PaleGreen);
    assert_eq!(tabs[0].path, Some(dir.path().join("old.txt")));
}

#[test]
fn close_flow_save_writes_then_removes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kept.txt");
    let mut manager = manager_in(&dir);

    let id = manager.create_tab(None, "keep this".to_string(), None);
    manager.save_tab_at(id, path.clone()).unwrap();

    assert_eq!(manager.close_tab(id).unwrap(), CloseOutcome::NeedsDecision);
    assert_eq!(
        manager.resolve_close(id, CloseDecision::Save).unwrap(),
        CloseOutcome::Closed
    );

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep this");
    assert!(manager.get_tab(id).is_none());
}

#[test]
fn tab_titles_never_reuse_numbers_across_closes() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager_in(&dir);

    let a = manager.create_tab(None, String::new(), None);
    let b = manager.create_tab(None, String::new(), None);
    manager.close_tab(b).unwrap();
    manager.close_tab(a).unwrap();

    let c = manager.create_tab(None, String::new(), None);
    assert_eq!(manager.get_tab(c).unwrap().title, "Tab 3");
}
