/// Integration tests for the blocking facade
///
/// These run on plain threads with no async runtime, the way the desktop
/// front end calls the store.
///
/// Run with: cargo test -p taskman-store --test blocking_tests

mod common;

use chrono::NaiveDate;
use taskman_store::validation::{parse_due_date, NewAccount, NewTask};
use taskman_store::{Store, StoreError, WriteOutcome};

fn open_store() -> (Store, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::open(common::test_config(&dir)).expect("Failed to open store");
    store.init_schema().expect("Failed to create tables");
    (store, dir)
}

#[test]
fn test_blocking_alice_scenario() {
    let (store, _dir) = open_store();

    let alice = store
        .create_account(NewAccount::new("alice", "a@example.com", "secret123"))
        .unwrap();
    assert!(store.user_exists("alice").unwrap());
    assert!(store.authenticate("alice", "secret123"));
    assert!(!store.authenticate("alice", "wrong"));

    let task = store
        .create_task(NewTask {
            owner_id: alice.id,
            name: "Write report".to_string(),
            description: Some(String::new()),
            due_date: parse_due_date("2025-01-01").unwrap(),
            priority: Some("high".to_string()),
            status: "pending".to_string(),
        })
        .unwrap();

    assert_eq!(store.update_task_status(task.id, "done").unwrap(), WriteOutcome::Applied);
    let updated = store.find_task(task.id).unwrap().unwrap();
    assert_eq!(updated.status, "done");
    assert_eq!(updated.name, "Write report");
    assert_eq!(updated.due_date, NaiveDate::from_ymd_opt(2025, 1, 1));

    assert_eq!(store.remove_task(task.id).unwrap(), WriteOutcome::Applied);
    assert!(store.find_task(task.id).unwrap().is_none());
}

#[test]
fn test_blocking_schema_idempotence() {
    let (store, _dir) = open_store();

    store.init_schema().unwrap();
    store.drop_tasks_table().unwrap();
    store.drop_tasks_table().unwrap();
    store.drop_users_table().unwrap();
    store.drop_users_table().unwrap();

    let summary = store.summary().unwrap();
    assert!(!summary.schema.users_table);
    assert!(!summary.schema.tasks_table);
}

#[test]
fn test_blocking_updates_and_lists() {
    let (store, _dir) = open_store();
    let alice = store
        .create_account(NewAccount::new("alice", "a@example.com", "secret123"))
        .unwrap();

    let task = store
        .create_task(common::full_task(alice.id, "Write report"))
        .unwrap();

    store.update_task_name(task.id, "Write summary").unwrap();
    store.update_task_description(task.id, Some("Short".to_string())).unwrap();
    store.update_task_due_date(task.id, None).unwrap();
    store.update_task_priority(task.id, Some("low".to_string())).unwrap();

    let tasks = store.list_tasks(alice.id).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Write summary");
    assert_eq!(tasks[0].description.as_deref(), Some("Short"));
    assert_eq!(tasks[0].due_date, None);
    assert_eq!(tasks[0].priority.as_deref(), Some("low"));
    assert_eq!(tasks[0].status, "pending");
}

#[test]
fn test_blocking_errors_surface_as_values() {
    let (store, _dir) = open_store();

    assert!(matches!(
        store.create_task(common::full_task(1, "Orphan")),
        Err(StoreError::UnknownOwner(1))
    ));
    assert_eq!(store.remove_user("nobody").unwrap(), WriteOutcome::NotFound);
    assert_eq!(store.remove_task(1).unwrap(), WriteOutcome::NotFound);
    assert!(store.find_user("nobody").unwrap().is_none());
}

#[test]
fn test_blocking_store_on_unreachable_path() {
    let config = taskman_store::StoreConfig {
        database: taskman_store::db::connection::DatabaseConfig::at(
            "/nonexistent-dir/taskManager.db",
        ),
        ..Default::default()
    };
    let store = Store::open(config).expect("opening does not touch the file");

    assert!(matches!(store.init_schema(), Err(StoreError::Connection(_))));
    assert!(!store.authenticate("alice", "secret123"));
}
