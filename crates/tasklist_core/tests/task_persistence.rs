use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{
    KeyValueStore, LoadError, MemoryKeyValueStore, SqliteKeyValueStore, Task, TaskListController,
    TaskStore, LOAD_FAILURE_WARNING, SKIPPED_TASKS_WARNING, TASKS_STORAGE_KEY,
};

fn sample_tasks() -> Vec<Task> {
    let mut done = Task::new("1700000000001", "file taxes");
    done.completed = true;
    vec![
        Task::new("1700000000000", "buy milk"),
        done,
        Task::new("1700000000002", "call mom • later"),
    ]
}

#[test]
fn sqlite_slot_round_trips_task_sequence() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteKeyValueStore::new(&conn));
    let tasks = sample_tasks();

    assert!(store.save(&tasks));
    assert_eq!(store.load().unwrap(), tasks);
}

#[test]
fn save_overwrites_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::new(SqliteKeyValueStore::new(&conn));

    store.save(&sample_tasks());
    store.save(&[Task::new("9", "only")]);

    assert_eq!(store.load().unwrap(), vec![Task::new("9", "only")]);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn empty_list_round_trips_as_empty_array() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    let store = TaskStore::new(&kv);

    store.save(&[]);
    assert_eq!(kv.get_item(TASKS_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn tasks_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    {
        let conn = open_db(&path).unwrap();
        let mut controller = TaskListController::load(SqliteKeyValueStore::new(&conn));
        controller.add("first");
        let second = controller.add("second").unwrap();
        controller.toggle_complete(&second);
    }

    let conn = open_db(&path).unwrap();
    let controller = TaskListController::load(SqliteKeyValueStore::new(&conn));
    let texts: Vec<&str> = controller.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert!(controller.tasks()[1].completed);
    assert_eq!(controller.view().count_text(), "1 remaining • 2 total");
}

#[test]
fn reads_slot_written_by_browser_build() {
    let raw = r#"[{"id":"1712000000000","text":"water plants","completed":true}]"#;
    let store = TaskStore::new(MemoryKeyValueStore::with_item(TASKS_STORAGE_KEY, raw));

    let tasks = store.load().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, "1712000000000");
    assert!(tasks[0].completed);
}

#[test]
fn malformed_slot_is_an_error_at_gateway_level() {
    let store = TaskStore::new(MemoryKeyValueStore::with_item(
        TASKS_STORAGE_KEY,
        r#"{"id":"1"}"#,
    ));
    assert!(matches!(store.load(), Err(LoadError::Malformed(_))));
}

#[test]
fn controller_falls_back_to_empty_list_with_warning() {
    let kv = MemoryKeyValueStore::with_item(TASKS_STORAGE_KEY, "not json at all");
    let mut controller = TaskListController::load(&kv);

    assert!(controller.tasks().is_empty());
    assert_eq!(controller.view().warning.as_deref(), Some(LOAD_FAILURE_WARNING));
    assert_eq!(
        kv.get_item(TASKS_STORAGE_KEY).unwrap().as_deref(),
        Some("not json at all")
    );

    controller.add("fresh start");
    assert_eq!(controller.view().warning, None);
    assert_eq!(TaskStore::new(&kv).load().unwrap().len(), 1);
}

#[test]
fn write_failures_do_not_interrupt_the_session() {
    let kv = MemoryKeyValueStore::new();
    kv.set_fail_writes(true);
    let mut controller = TaskListController::load(&kv);

    controller.add("still shown");
    assert_eq!(controller.tasks().len(), 1);
    assert_eq!(controller.view().rows[0].text, "still shown");
    assert_eq!(kv.get_item(TASKS_STORAGE_KEY).unwrap(), None);
}

#[test]
fn new_ids_stay_above_loaded_ids() {
    let raw = r#"[{"id":"99999999999999","text":"from the future","completed":false}]"#;
    let mut controller =
        TaskListController::load(MemoryKeyValueStore::with_item(TASKS_STORAGE_KEY, raw));

    let id = controller.add("next").unwrap();
    assert_eq!(id, "100000000000000");
}

#[test]
fn adding_after_the_largest_possible_id_still_yields_a_fresh_id() {
    let raw = r#"[{"id":"18446744073709551615","text":"x","completed":false}]"#;
    let mut controller =
        TaskListController::load(MemoryKeyValueStore::with_item(TASKS_STORAGE_KEY, raw));

    let first = controller.add("next").unwrap();
    let second = controller.add("after").unwrap();
    assert_ne!(first, "18446744073709551615");
    assert_ne!(first, second);
    assert_eq!(controller.tasks().len(), 3);
}

#[test]
fn one_bad_entry_does_not_discard_the_others() {
    let kv = MemoryKeyValueStore::with_item(
        TASKS_STORAGE_KEY,
        r#"[{"id":"1","text":"keep me","completed":false},{"id":"2","text":"","completed":false}]"#,
    );
    let mut controller = TaskListController::load(&kv);

    let texts: Vec<&str> = controller.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["keep me"]);
    assert_eq!(controller.view().warning.as_deref(), Some(SKIPPED_TASKS_WARNING));

    controller.add("new");
    let saved = TaskStore::new(&kv).load().unwrap();
    let texts: Vec<&str> = saved.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["keep me", "new"]);
    assert_eq!(controller.view().warning, None);
}

#[test]
fn empty_slot_value_loads_quietly() {
    let controller =
        TaskListController::load(MemoryKeyValueStore::with_item(TASKS_STORAGE_KEY, ""));
    assert!(controller.tasks().is_empty());
    assert_eq!(controller.view().warning, None);
}
