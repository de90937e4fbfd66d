/// The ordered history of committed entries, persisted as one JSON array.
use anyhow::{Context, Result};
use rand::RngExt;
use tracing::{debug, error, info, warn};

use super::KeyValueStore;
use crate::types::{EntryId, MS_IN_SECOND, Millis, TimeEntry};

const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Entries in commit order, together with the storage key they are persisted under.
#[derive(Debug)]
pub struct EntryStore {
    key: String,
    entries: Vec<TimeEntry>,
}

impl EntryStore {
    /// Loads whatever is stored under `key`. Absent or unreadable data yields an empty history.
    pub fn load(key: &str, store: &impl KeyValueStore) -> Self {
        let entries = match store.get(key) {
            Ok(Some(raw)) => match serde_json::from_slice::<Vec<TimeEntry>>(&raw) {
                Ok(entries) => {
                    info!(count = entries.len(), key, "Loaded history");
                    entries
                }
                Err(err) => {
                    error!(%err, key, "Stored history is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                info!(key, "No stored history, starting empty");
                Vec::new()
            }
            Err(err) => {
                error!(%err, key, "Failed to read stored history, starting empty");
                Vec::new()
            }
        };
        Self {
            key: key.to_string(),
            entries,
        }
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends and persists. The entry stays in memory even when the write fails.
    pub fn append(&mut self, entry: TimeEntry, store: &impl KeyValueStore) -> Result<()> {
        debug!(id = %entry.id, category = %entry.category, duration = entry.duration, "Appending entry");
        self.entries.push(entry);
        self.persist(store)
    }

    /// Removes the entry with `id`. Returns `Ok(false)` without touching storage when nothing matched.
    pub fn remove_by_id(&mut self, id: &str, store: &impl KeyValueStore) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            warn!(id, "No entry with this id, nothing deleted");
            return Ok(false);
        }
        self.persist(store)?;
        Ok(true)
    }

    /// Empties the history and erases the persisted blob.
    pub fn clear_all(&mut self, store: &impl KeyValueStore) -> Result<()> {
        self.entries.clear();
        store
            .remove(&self.key)
            .with_context(|| format!("Failed to erase stored history under {}", self.key))?;
        info!(key = %self.key, "History cleared");
        Ok(())
    }

    fn persist(&self, store: &impl KeyValueStore) -> Result<()> {
        let raw = serde_json::to_vec(&self.entries)?;
        store
            .set(&self.key, &raw)
            .with_context(|| format!("Failed to save history under {}", self.key))?;
        debug!(count = self.entries.len(), "History saved");
        Ok(())
    }
}

/// Turns an ended session into an entry, declining sessions shorter than a second
/// or without a category.
pub fn build_entry(category: &str, start: Millis, end: Millis) -> Option<TimeEntry> {
    let duration = end - start;
    if duration < MS_IN_SECOND || category.is_empty() {
        warn!(duration, category, "Session not recorded: too short or without a category");
        return None;
    }
    Some(TimeEntry {
        id: generate_entry_id(end),
        category: category.to_string(),
        start,
        end,
        duration,
    })
}

/// `entry_<timestamp>_<9 random base36 chars>`. Collisions are not checked for.
pub fn generate_entry_id(now: Millis) -> EntryId {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.random_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("entry_{now}_{suffix}")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::db::init_in_memory;

    const KEY: &str = "timetally.history.test";

    fn entry(id: &str, category: &str, start: Millis, end: Millis) -> TimeEntry {
        TimeEntry {
            id: id.to_string(),
            category: category.to_string(),
            start,
            end,
            duration: end - start,
        }
    }

    /// Store whose writes always fail; reads see nothing.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }

        fn remove(&self, _key: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn absent_history_loads_empty() {
        let conn = init_in_memory().unwrap();
        let store = EntryStore::load(KEY, &conn);
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_history_loads_empty() {
        let conn = init_in_memory().unwrap();
        conn.set(KEY, b"{not json").unwrap();
        assert!(EntryStore::load(KEY, &conn).is_empty());

        conn.set(KEY, &[0xff, 0xfe, 0x00]).unwrap();
        assert!(EntryStore::load(KEY, &conn).is_empty());
    }

    #[test]
    fn appended_entry_survives_reload() {
        let conn = init_in_memory().unwrap();
        let mut store = EntryStore::load(KEY, &conn);
        store.append(entry("1", "Work", 0, 5_000), &conn).unwrap();
        let last = entry("2", "Reading", 10_000, 70_000);
        store.append(last.clone(), &conn).unwrap();

        let reloaded = EntryStore::load(KEY, &conn);
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.entries().last(), Some(&last));
    }

    #[test]
    fn persisted_layout_is_a_plain_json_array() {
        let conn = init_in_memory().unwrap();
        let mut store = EntryStore::load(KEY, &conn);
        store.append(entry("a", "Work", 1_000, 3_000), &conn).unwrap();

        let raw = conn.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"id": "a", "category": "Work", "start": 1000, "end": 3000, "duration": 2000}
            ])
        );
    }

    #[test]
    fn failed_write_keeps_entry_in_memory() {
        let mut store = EntryStore::load(KEY, &ReadOnlyStore);
        let result = store.append(entry("1", "Work", 0, 5_000), &ReadOnlyStore);
        assert!(result.is_err());
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn remove_by_id_drops_only_the_match() {
        let conn = init_in_memory().unwrap();
        let mut store = EntryStore::load(KEY, &conn);
        let a = entry("1", "Work", 0, 5_000);
        store.append(a.clone(), &conn).unwrap();
        store.append(entry("2", "Play", 5_000, 9_000), &conn).unwrap();

        assert!(store.remove_by_id("2", &conn).unwrap());
        assert_eq!(store.entries(), &[a.clone()]);
        assert_eq!(EntryStore::load(KEY, &conn).entries(), &[a.clone()]);

        assert!(!store.remove_by_id("99", &conn).unwrap());
        assert_eq!(store.entries(), &[a]);
    }

    #[test]
    fn remove_of_unknown_id_does_not_write() {
        let mut store = EntryStore::load(KEY, &ReadOnlyStore);
        assert!(!store.remove_by_id("missing", &ReadOnlyStore).unwrap());
    }

    #[test]
    fn clear_all_erases_memory_and_storage() {
        let conn = init_in_memory().unwrap();
        let mut store = EntryStore::load(KEY, &conn);
        store.append(entry("1", "Work", 0, 5_000), &conn).unwrap();

        store.clear_all(&conn).unwrap();
        assert!(store.is_empty());
        assert_eq!(conn.get(KEY).unwrap(), None);
    }

    #[test]
    fn build_entry_applies_commit_policy() {
        assert_eq!(build_entry("Work", 10_000, 10_999), None);
        assert_eq!(build_entry("", 10_000, 15_000), None);

        let built = build_entry("Work", 10_000, 11_000).unwrap();
        assert_eq!(built.category, "Work");
        assert_eq!(built.start, 10_000);
        assert_eq!(built.end, 11_000);
        assert_eq!(built.duration, 1_000);
        assert!(built.id.starts_with("entry_11000_"));
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let ids: HashSet<_> = (0..1_000).map(|_| generate_entry_id(42)).collect();
        assert_eq!(ids.len(), 1_000);
        let id = ids.iter().next().unwrap();
        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
