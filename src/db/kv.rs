/// Key-value queries against the `kv` table.
use anyhow::Result;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};

pub fn query_value(key: &str, conn: &Connection) -> Result<Option<Vec<u8>>> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
    let value = stmt
        .query_row([key], |row| row.get::<_, Vec<u8>>(0))
        .optional()?;
    Ok(value)
}

pub fn upsert_value(key: &str, value: &[u8], conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn delete_value(key: &str, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    #[test]
    fn missing_key_reads_as_none() {
        let conn = init_in_memory().unwrap();
        assert_eq!(query_value("absent", &conn).unwrap(), None);
    }

    #[test]
    fn upsert_replaces_the_whole_value() {
        let conn = init_in_memory().unwrap();
        upsert_value("history", b"first", &conn).unwrap();
        upsert_value("history", b"second", &conn).unwrap();
        assert_eq!(
            query_value("history", &conn).unwrap(),
            Some(b"second".to_vec())
        );
    }

    #[test]
    fn delete_erases_the_key() {
        let conn = init_in_memory().unwrap();
        upsert_value("history", b"[]", &conn).unwrap();
        delete_value("history", &conn).unwrap();
        delete_value("history", &conn).unwrap();
        assert_eq!(query_value("history", &conn).unwrap(), None);
    }
}
