use super::*;
use crate::kernel::project::ChangeKind;
use serde_json::json;

#[test]
fn actions_apply_in_order() {
    let mut files = FileStore::new();
    let actions = vec![
        AssistantAction::create_file("src/a.ts", "1"),
        AssistantAction::update_file("src/a.ts", "2"),
        AssistantAction::create_file("src/b.ts", "b"),
        AssistantAction::delete_file("src/b.ts"),
    ];

    let result = apply_actions(&mut files, &actions);

    assert_eq!(result.failures().count(), 0);
    assert_eq!(files.get("src/a.ts").unwrap().text(), "2");
    assert!(files.get("src/b.ts").is_err());
    let kinds: Vec<ChangeKind> = files.take_changes().into_iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChangeKind::Created,
            ChangeKind::Updated,
            ChangeKind::Created,
            ChangeKind::Deleted
        ]
    );
}

#[test]
fn failed_action_does_not_block_siblings() {
    let mut files = FileStore::new();
    let actions = vec![
        AssistantAction::create_file("ok-1.ts", "a"),
        AssistantAction::create_file("../escape.ts", "b"),
        AssistantAction::create_file("ok-2.ts", "c"),
        AssistantAction::update_file("", "d"),
    ];

    let result = apply_actions(&mut files, &actions);

    let failed: Vec<usize> = result.failures().map(|o| o.index).collect();
    assert_eq!(failed, vec![1, 3]);
    assert_eq!(files.get("ok-1.ts").unwrap().text(), "a");
    assert_eq!(files.get("ok-2.ts").unwrap().text(), "c");
    assert_eq!(result.written_paths(), vec!["ok-1.ts", "ok-2.ts"]);
}

#[test]
fn update_of_missing_file_creates_it() {
    let mut files = FileStore::new();

    let result = apply_actions(&mut files, &[AssistantAction::update_file("new.ts", "x")]);

    assert_eq!(result.outcomes[0].status, ActionStatus::Applied);
    assert_eq!(files.get("new.ts").unwrap().text(), "x");
}

#[test]
fn delete_of_missing_file_is_applied_noop() {
    let mut files = FileStore::new();

    let result = apply_actions(&mut files, &[AssistantAction::delete_file("ghost.ts")]);

    assert_eq!(result.outcomes[0].status, ActionStatus::Applied);
    assert!(files.take_changes().is_empty());
}

#[test]
fn run_command_is_left_pending_for_executor() {
    let mut files = FileStore::new();
    let actions = vec![
        AssistantAction::run_command(json!({"cmd": "npm install"})),
        AssistantAction::create_file("a.ts", ""),
    ];

    let result = apply_actions(&mut files, &actions);

    assert_eq!(result.outcomes[0].status, ActionStatus::Pending);
    assert_eq!(result.outcomes[0].path, None);
    assert_eq!(
        result.commands,
        vec![(0, CommandDescriptor(json!({"cmd": "npm install"})))]
    );
    assert_eq!(result.outcomes[1].status, ActionStatus::Applied);
}

#[test]
fn actions_decode_from_wire_shape() {
    let raw = json!([
        {"type": "create_file", "payload": {"filename": "src/NewComponent.tsx", "content": "// Generated component"}},
        {"type": "update_file", "payload": {"path": "src/App.tsx"}},
        {"type": "delete_file", "payload": {"path": "old.ts"}},
        {"type": "run_command", "payload": {"argv": ["npm", "test"]}}
    ]);

    let actions: Vec<AssistantAction> = serde_json::from_value(raw).unwrap();

    assert_eq!(
        actions,
        vec![
            AssistantAction::create_file("src/NewComponent.tsx", "// Generated component"),
            AssistantAction::update_file("src/App.tsx", ""),
            AssistantAction::delete_file("old.ts"),
            AssistantAction::run_command(json!({"argv": ["npm", "test"]})),
        ]
    );
}
