use super::*;

fn files(paths: &[&str]) -> FileStore {
    let mut store = FileStore::new();
    for path in paths {
        store.set(path, format!("// {path}")).unwrap();
    }
    let _ = store.take_changes();
    store
}

fn session_with(files: &FileStore, tabs: &[&str], active: &str) -> EditorSession {
    let mut editor = EditorSession::new();
    for tab in tabs {
        editor.open_tab(files, tab).unwrap();
    }
    editor.focus(files, active).unwrap();
    editor
}

#[test]
fn focus_unknown_file_fails() {
    let store = files(&["a.ts"]);
    let mut editor = EditorSession::new();

    assert_eq!(
        editor.focus(&store, "b.ts").unwrap_err(),
        SessionError::UnknownFile("b.ts".to_string())
    );
    assert_eq!(editor.active_file(), None);
    assert!(editor.open_tabs().is_empty());
}

#[test]
fn focus_on_directory_is_unknown_file() {
    let mut store = FileStore::new();
    store.create_dir("src").unwrap();
    let mut editor = EditorSession::new();

    assert!(matches!(
        editor.focus(&store, "src"),
        Err(SessionError::UnknownFile(_))
    ));
}

#[test]
fn focus_appends_tab_once() {
    let store = files(&["a.ts", "b.ts"]);
    let mut editor = EditorSession::new();

    assert!(editor.focus(&store, "a.ts").unwrap());
    assert!(editor.focus(&store, "b.ts").unwrap());
    assert!(editor.focus(&store, "a.ts").unwrap());
    assert!(!editor.focus(&store, "a.ts").unwrap());

    assert_eq!(editor.open_tabs(), ["a.ts", "b.ts"]);
    assert_eq!(editor.active_file(), Some("a.ts"));
}

#[test]
fn open_tab_is_idempotent_and_keeps_focus() {
    let store = files(&["a.ts", "b.ts"]);
    let mut editor = session_with(&store, &["a.ts"], "a.ts");

    assert!(editor.open_tab(&store, "b.ts").unwrap());
    assert!(!editor.open_tab(&store, "b.ts").unwrap());

    assert_eq!(editor.open_tabs(), ["a.ts", "b.ts"]);
    assert_eq!(editor.active_file(), Some("a.ts"));
}

#[test]
fn closing_active_middle_tab_focuses_left_neighbor() {
    let store = files(&["a", "b", "c"]);
    let mut editor = session_with(&store, &["a", "b", "c"], "b");

    assert!(editor.close_tab("b"));

    assert_eq!(editor.open_tabs(), ["a", "c"]);
    assert_eq!(editor.active_file(), Some("a"));
}

#[test]
fn closing_only_tab_clears_focus() {
    let store = files(&["a"]);
    let mut editor = session_with(&store, &["a"], "a");

    assert!(editor.close_tab("a"));

    assert!(editor.open_tabs().is_empty());
    assert_eq!(editor.active_file(), None);
}

#[test]
fn closing_active_leftmost_tab_focuses_new_leftmost() {
    let store = files(&["a", "b", "c"]);
    let mut editor = session_with(&store, &["a", "b", "c"], "a");

    assert!(editor.close_tab("a"));

    assert_eq!(editor.active_file(), Some("b"));
}

#[test]
fn closing_inactive_tab_keeps_focus() {
    let store = files(&["a", "b", "c"]);
    let mut editor = session_with(&store, &["a", "b", "c"], "c");

    assert!(editor.close_tab("a"));
    assert!(!editor.close_tab("a"));

    assert_eq!(editor.open_tabs(), ["b", "c"]);
    assert_eq!(editor.active_file(), Some("c"));
}

#[test]
fn close_tab_never_leaves_dangling_focus() {
    let store = files(&["a", "b", "c", "d"]);
    let orders: [&[&str]; 4] = [
        &["a", "b", "c", "d"],
        &["d", "c", "b", "a"],
        &["b", "d", "a", "c"],
        &["c", "a", "d", "b"],
    ];

    for active in ["a", "b", "c", "d"] {
        for order in orders {
            let mut editor = session_with(&store, &["a", "b", "c", "d"], active);
            for path in order {
                editor.close_tab(path);
                if let Some(active) = editor.active_file() {
                    assert!(editor.is_open(active));
                }
            }
            assert_eq!(editor.active_file(), None);
        }
    }
}

#[test]
fn deleted_notification_behaves_like_close_tab() {
    let store = files(&["a", "b"]);
    let mut editor = session_with(&store, &["a", "b"], "b");

    let changed = editor.apply_change(&FileChange {
        path: "b".to_string(),
        kind: ChangeKind::Deleted,
    });

    assert!(changed);
    assert_eq!(editor.open_tabs(), ["a"]);
    assert_eq!(editor.active_file(), Some("a"));

    assert!(!editor.apply_change(&FileChange {
        path: "a".to_string(),
        kind: ChangeKind::Updated,
    }));
}

#[test]
fn cursor_and_selection_require_active_file_and_reset_on_focus_change() {
    let store = files(&["a", "b"]);
    let mut editor = EditorSession::new();
    assert!(!editor.set_cursor(Position::new(1, 1)));

    editor.focus(&store, "a").unwrap();
    assert!(editor.set_cursor(Position::new(0, 2)));
    assert!(editor.set_selection(Some(Selection::new(
        Position::new(0, 5),
        Position::new(0, 1),
    ))));
    assert_eq!(
        editor.selection(),
        Some(Selection::new(Position::new(0, 1), Position::new(0, 5)))
    );

    editor.focus(&store, "b").unwrap();
    assert_eq!(editor.cursor(), None);
    assert_eq!(editor.selection(), None);
}

#[test]
fn selected_text_reads_from_active_file() {
    let mut store = FileStore::new();
    store.set("a.ts", "let x = 1;\nlet yy = 2;\n").unwrap();
    let mut editor = EditorSession::new();
    editor.focus(&store, "a.ts").unwrap();

    editor.set_selection(Some(Selection::new(Position::new(0, 4), Position::new(1, 6))));
    assert_eq!(
        editor.selected_text(&store).as_deref(),
        Some("x = 1;\nlet yy")
    );

    editor.set_selection(Some(Selection::new(Position::new(1, 2), Position::new(1, 2))));
    assert_eq!(editor.selected_text(&store), None);
}
