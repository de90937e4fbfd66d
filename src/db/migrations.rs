/// Database schema management.
use anyhow::Result;
use rusqlite::Connection;

/// Creates the key-value table if it doesn't exist yet.
///
/// Entry data is versioned through the storage key, so the table itself never changes shape.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv (
            key         TEXT    PRIMARY KEY NOT NULL,
            value       BLOB    NOT NULL,
            updated_at  TEXT    NOT NULL
        );
        ",
    )?;
    Ok(())
}
