//! Saved jobs: an ordered set of job ids persisted under `savedJobs`.
//!
//! The in-memory list is the only writer; every change is written through to
//! the store before it is reported back.

use std::sync::Arc;

use tracing::debug;

use crate::session::store::{load_json, save_json, KeyValueStore, StoreError};

pub const SAVED_JOBS_KEY: &str = "savedJobs";

pub struct SavedJobs {
    store: Arc<dyn KeyValueStore>,
    ids: Vec<i64>,
}

impl SavedJobs {
    /// Reads the persisted set. A missing or undecodable value starts empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let mut ids: Vec<i64> = load_json(store.as_ref(), SAVED_JOBS_KEY)?.unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(*id));
        Ok(Self { store, ids })
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }


    /// Adds `id` if absent, removes it otherwise. Returns whether it is now saved.
    /// The in-memory set only changes once the store write succeeded.
    pub fn toggle(&mut self, id: i64) -> Result<bool, StoreError> {
        let mut next = self.ids.clone();
        let saved = match next.iter().position(|&x| x == id) {
            Some(pos) => {
                next.remove(pos);
                false
            }
            None => {
                next.push(id);
                true
            }
        };
        save_json(self.store.as_ref(), SAVED_JOBS_KEY, &next)?;
        self.ids = next;
        debug!(job_id = id, saved, "toggled saved job");
        Ok(saved)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(SAVED_JOBS_KEY)?;
        self.ids.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::{FileStore, MemoryStore};

    /// Reads succeed, every write fails.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "store.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.set(key, "")
        }
    }

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::default())
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let store = memory();
        store.set(SAVED_JOBS_KEY, "[4,9]").unwrap();
        let mut saved = SavedJobs::load(store.clone()).unwrap();

        assert!(saved.toggle(12).unwrap());
        assert!(!saved.toggle(12).unwrap());
        assert_eq!(saved.ids(), &[4, 9]);
        assert_eq!(store.get(SAVED_JOBS_KEY).unwrap().as_deref(), Some("[4,9]"));
    }

    #[test]
    fn test_toggle_removes_existing() {
        let mut saved = SavedJobs::load(memory()).unwrap();
        saved.toggle(1).unwrap();
        saved.toggle(2).unwrap();
        assert!(!saved.toggle(1).unwrap());
        assert_eq!(saved.ids(), &[2]);
    }

    #[test]
    fn test_corrupt_value_starts_empty() {
        let store = memory();
        store.set(SAVED_JOBS_KEY, "not json").unwrap();
        let saved = SavedJobs::load(store).unwrap();
        assert_eq!(saved.len(), 0);
    }

    #[test]
    fn test_duplicates_in_store_are_collapsed() {
        let store = memory();
        store.set(SAVED_JOBS_KEY, "[3,3,5]").unwrap();
        let saved = SavedJobs::load(store).unwrap();
        assert_eq!(saved.ids(), &[3, 5]);
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn test_clear_removes_key() {
        let store = memory();
        let mut saved = SavedJobs::load(store.clone()).unwrap();
        saved.toggle(7).unwrap();
        saved.clear().unwrap();
        assert!(saved.ids().is_empty());
        assert_eq!(store.get(SAVED_JOBS_KEY).unwrap(), None);
    }

    #[test]
    fn test_persists_across_file_store_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
            let mut saved = SavedJobs::load(store).unwrap();
            saved.toggle(21).unwrap();
        }
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
        assert_eq!(SavedJobs::load(store).unwrap().ids(), &[21]);
    }

    #[test]
    fn test_failed_write_leaves_set_unchanged() {
        let inner = MemoryStore::default();
        inner.set(SAVED_JOBS_KEY, "[2]").unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(ReadOnlyStore(inner));
        let mut saved = SavedJobs::load(store.clone()).unwrap();

        assert!(saved.toggle(5).is_err());
        assert!(saved.toggle(2).is_err());
        assert_eq!(saved.ids(), &[2]);

        assert!(saved.clear().is_err());
        assert_eq!(saved.ids(), &[2]);
        assert_eq!(store.get(SAVED_JOBS_KEY).unwrap().as_deref(), Some("[2]"));
    }
}
