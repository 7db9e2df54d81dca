//! The one table backing the key-value slot.
//!
//! `PRAGMA user_version` records which layout a file was written with. A file
//! stamped with a newer layout is refused rather than guessed at.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Layout version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const KV_STORE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Creates `kv_store` on a fresh file and stamps the version.
///
/// # Errors
/// - `NewerSchema` when the file was written by a later build.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::NewerSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_STORE_TABLE)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}
