/// Storage: the key-value byte store, its SQLite backing and the entry store on top of it.
mod entries;
mod kv;
mod migrations;

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub use entries::{EntryStore, build_entry};

/// Key-value byte store the history is persisted into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl KeyValueStore for Connection {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        kv::query_value(key, self)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        kv::upsert_value(key, value, self)
    }

    fn remove(&self, key: &str) -> Result<()> {
        kv::delete_value(key, self)
    }
}

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Returns the default database path inside the user's data directory.
/// Falls back to `./timetally.db` when no data dir is found.
pub fn default_db_path() -> std::path::PathBuf {
    match crate::logging::data_dir() {
        Some(dir) => dir.join("timetally.db"),
        None => "timetally.db".into(),
    }
}
