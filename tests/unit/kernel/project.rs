use super::*;

fn paths(store: &FileStore) -> Vec<&str> {
    store.list().map(|(path, _)| path).collect()
}

#[test]
fn set_creates_then_updates_and_tracks_byte_size() {
    let mut store = FileStore::new();

    assert_eq!(store.set("src/a.ts", "hi").unwrap(), ChangeKind::Created);
    let node = store.get("src/a.ts").unwrap();
    assert_eq!(node.text(), "hi");
    assert_eq!(node.metadata.byte_size, 2);
    assert_eq!(node.metadata.version, 1);
    assert_eq!(node.metadata.language, LanguageTag::TypeScript);

    assert_eq!(store.set("src/a.ts", "héllo").unwrap(), ChangeKind::Updated);
    let node = store.get("src/a.ts").unwrap();
    assert_eq!(node.metadata.byte_size, "héllo".len());
    assert_eq!(node.metadata.byte_size, 6);
    assert_eq!(node.metadata.version, 2);
}

#[test]
fn get_does_not_bump_metadata() {
    let mut store = FileStore::new();
    store.set("a.md", "x").unwrap();
    let before = store.get("a.md").unwrap().metadata.clone();

    let _ = store.get("a.md").unwrap();
    let _ = store.list().count();

    assert_eq!(store.get("a.md").unwrap().metadata, before);
}

#[test]
fn update_moves_last_modified_forward() {
    let mut store = FileStore::new();
    store.set("a.md", "x").unwrap();
    let first = store.get("a.md").unwrap().metadata.last_modified;

    store.set("a.md", "y").unwrap();
    let second = store.get("a.md").unwrap().metadata.last_modified;

    assert!(second >= first);
}

#[test]
fn list_reflects_net_effect_in_insertion_order() {
    let mut store = FileStore::new();
    store.set("c.txt", "3").unwrap();
    store.set("a.txt", "1").unwrap();
    store.set("b.txt", "2").unwrap();
    store.remove("a.txt");
    store.set("c.txt", "33").unwrap();
    store.set("a.txt", "again").unwrap();

    assert_eq!(paths(&store), vec!["c.txt", "b.txt", "a.txt"]);
    for (_, node) in store.list() {
        assert_eq!(node.metadata.byte_size, node.text().len());
    }
    assert_eq!(store.get("c.txt").unwrap().text(), "33");
}

#[test]
fn remove_absent_path_is_noop() {
    let mut store = FileStore::new();
    store.set("a.txt", "1").unwrap();
    let _ = store.take_changes();
    let revision = store.revision();

    assert!(store.remove("missing.txt").is_empty());
    assert!(store.take_changes().is_empty());
    assert_eq!(store.revision(), revision);
}

#[test]
fn get_missing_is_not_found() {
    let mut store = FileStore::new();
    store.set("p.ts", "c").unwrap();
    store.remove("p.ts");

    assert_eq!(
        store.get("p.ts").unwrap_err(),
        SessionError::NotFound("p.ts".to_string())
    );
}

#[test]
fn mutations_queue_change_notifications_in_order() {
    let mut store = FileStore::new();
    store.set("a.ts", "1").unwrap();
    store.set("a.ts", "2").unwrap();
    store.remove("a.ts");

    let kinds: Vec<ChangeKind> = store.take_changes().into_iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ChangeKind::Created, ChangeKind::Updated, ChangeKind::Deleted]
    );
    assert!(store.take_changes().is_empty());
}

#[test]
fn invalid_paths_are_rejected_without_notification() {
    let mut store = FileStore::new();
    for bad in ["", "/abs.ts", "dir/", "a//b.ts", "a\\b.ts", "../x.ts", "a/./b.ts", "a\nb"] {
        let err = store.set(bad, "x").unwrap_err();
        assert!(matches!(err, SessionError::InvalidPath { .. }), "{bad:?}");
    }
    assert!(store.is_empty());
    assert!(store.take_changes().is_empty());
}

#[test]
fn set_below_a_file_is_rejected() {
    let mut store = FileStore::new();
    store.set("src/App.tsx", "x").unwrap();

    let err = store.set("src/App.tsx/inner.ts", "y").unwrap_err();
    assert!(matches!(err, SessionError::InvalidPath { .. }));
}

#[test]
fn set_over_implied_directory_is_rejected() {
    let mut store = FileStore::new();
    store.set("src/App.tsx", "x").unwrap();
    let _ = store.take_changes();

    let err = store.set("src", "y").unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidPath {
            path: "src".to_string(),
            reason: "path has descendants",
        }
    );
    assert!(store.take_changes().is_empty());
    assert_eq!(paths(&store), vec!["src/App.tsx"]);

    // Sibling names sharing the prefix are not descendants.
    store.set("src.md", "notes").unwrap();
    let rows: Vec<(String, FileKind)> = store
        .tree()
        .into_iter()
        .map(|row| (row.path, row.kind))
        .collect();
    assert!(rows.contains(&("src".to_string(), FileKind::Directory)));
    assert!(rows.contains(&("src/App.tsx".to_string(), FileKind::File)));
}

#[test]
fn directories_hold_no_content_and_cannot_be_overwritten() {
    let mut store = FileStore::new();
    assert!(store.create_dir("src").unwrap());
    assert!(!store.create_dir("src").unwrap());

    let node = store.get("src").unwrap();
    assert_eq!(node.kind, FileKind::Directory);
    assert!(node.content.is_none());
    assert!(!store.contains_file("src"));

    let err = store.set("src", "x").unwrap_err();
    assert!(matches!(err, SessionError::InvalidPath { .. }));
}

#[test]
fn removing_directory_removes_descendants_in_insertion_order() {
    let mut store = FileStore::new();
    store.set("src/b.ts", "b").unwrap();
    store.create_dir("src").unwrap();
    store.set("srcx.ts", "keep").unwrap();
    store.set("src/nested/c.ts", "c").unwrap();
    let _ = store.take_changes();

    let removed = store.remove("src");

    assert_eq!(removed, vec!["src/b.ts", "src", "src/nested/c.ts"]);
    assert_eq!(paths(&store), vec!["srcx.ts"]);
    let deleted: Vec<String> = store.take_changes().into_iter().map(|c| c.path).collect();
    assert_eq!(deleted, removed);
}

#[test]
fn source_snapshot_skips_directories() {
    let mut store = FileStore::new();
    store.create_dir("public").unwrap();
    store.set("src/App.tsx", "app").unwrap();

    let snapshot = store.source_snapshot();
    assert_eq!(
        snapshot,
        vec![SourceFile {
            path: "src/App.tsx".to_string(),
            content: "app".to_string(),
        }]
    );
}

#[test]
fn tree_lists_implied_parents_sorted_by_path() {
    let mut store = FileStore::new();
    store.set("src/components/Button.tsx", "").unwrap();
    store.set("index.html", "").unwrap();
    store.set("src/App.tsx", "").unwrap();

    let rows: Vec<(String, usize, FileKind)> = store
        .tree()
        .into_iter()
        .map(|row| (row.path, row.depth, row.kind))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("index.html".to_string(), 0, FileKind::File),
            ("src".to_string(), 0, FileKind::Directory),
            ("src/App.tsx".to_string(), 1, FileKind::File),
            ("src/components".to_string(), 1, FileKind::Directory),
            ("src/components/Button.tsx".to_string(), 2, FileKind::File),
        ]
    );
    assert_eq!(store.tree()[4].name, "Button.tsx");
}
