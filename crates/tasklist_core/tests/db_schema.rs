use rusqlite::Connection;
use tasklist_core::db::schema::SCHEMA_VERSION;
use tasklist_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn in_memory_database_gets_the_slot_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), SCHEMA_VERSION);
    assert_kv_store_exists(&conn);
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("tasks.db");

    let conn = open_db(&path).unwrap();
    assert!(path.exists());
    assert_kv_store_exists(&conn);
}

#[test]
fn reopening_a_file_keeps_its_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), SCHEMA_VERSION);
}

#[test]
fn file_from_a_later_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::NewerSchema { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_kv_store_exists(conn: &Connection) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}
