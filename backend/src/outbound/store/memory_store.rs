//! Process-local key-value store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, Revision, VersionedPayload};

#[derive(Debug, Clone)]
struct Entry {
    payload: String,
    revision: Revision,
}

/// In-memory [`KeyValueStore`] for tests and ephemeral sessions.
///
/// # Examples
/// ```
/// use leadboard::domain::ports::KeyValueStore;
/// use leadboard::outbound::MemoryStore;
///
/// let store = MemoryStore::default();
/// assert_eq!(store.set("users", "[]").expect("set"), 1);
/// assert_eq!(store.get("users").expect("get").payload.as_deref(), Some("[]"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    fn entries(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, Entry>>, KeyValueStoreError> {
        self.entries
            .lock()
            .map_err(|_| KeyValueStoreError::io(key, "memory store lock poisoned"))
    }
}

fn current_revision(entries: &HashMap<String, Entry>, key: &str) -> Revision {
    entries.get(key).map_or(0, |entry| entry.revision)
}

fn write(entries: &mut HashMap<String, Entry>, key: &str, payload: &str) -> Revision {
    let revision = current_revision(entries, key) + 1;
    entries.insert(
        key.to_owned(),
        Entry {
            payload: payload.to_owned(),
            revision,
        },
    );
    revision
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<VersionedPayload, KeyValueStoreError> {
        let entries = self.entries(key)?;
        Ok(entries
            .get(key)
            .map_or_else(VersionedPayload::absent, |entry| VersionedPayload {
                payload: Some(entry.payload.clone()),
                revision: entry.revision,
            }))
    }

    fn set(&self, key: &str, payload: &str) -> Result<Revision, KeyValueStoreError> {
        let mut entries = self.entries(key)?;
        Ok(write(&mut entries, key, payload))
    }

    fn compare_and_set(
        &self,
        key: &str,
        expected: Revision,
        payload: &str,
    ) -> Result<Revision, KeyValueStoreError> {
        let mut entries = self.entries(key)?;
        let actual = current_revision(&entries, key);
        if actual != expected {
            return Err(KeyValueStoreError::revision_mismatch(key, expected, actual));
        }
        Ok(write(&mut entries, key, payload))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn absent_keys_report_revision_zero() {
        let store = MemoryStore::default();
        assert_eq!(store.get("leads").expect("get"), VersionedPayload::absent());
    }

    #[test]
    fn compare_and_set_at_zero_creates_once() {
        let store = MemoryStore::default();
        assert_eq!(store.compare_and_set("users", 0, "[1]").expect("create"), 1);
        let err = store
            .compare_and_set("users", 0, "[2]")
            .expect_err("second create loses");
        assert_eq!(err, KeyValueStoreError::revision_mismatch("users", 0_u64, 1_u64));
        assert_eq!(store.get("users").expect("get").payload.as_deref(), Some("[1]"));
    }

    #[test]
    fn keys_are_versioned_independently() {
        let store = MemoryStore::default();
        store.set("users", "[]").expect("set users");
        store.set("users", "[]").expect("set users again");
        store.set("leads", "[]").expect("set leads");
        assert_eq!(store.get("users").expect("get").revision, 2);
        assert_eq!(store.get("leads").expect("get").revision, 1);
    }
}
