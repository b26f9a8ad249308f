use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{KeyValueStore, StorageError};

/// In-memory store. Clones share the same map, so a clone handed to a fresh
/// `Workspace` behaves like the browser store surviving a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store refusing writes once keys plus values would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(bytes),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        if let Some(limit) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStorage::new();
        let reloaded = store.clone();

        store.set("projects", "[]").unwrap();
        assert_eq!(reloaded.get("projects").unwrap().as_deref(), Some("[]"));

        reloaded.remove("projects").unwrap();
        assert!(store.get("projects").unwrap().is_none());
        // removing twice is fine
        assert!(store.remove("projects").is_ok());
    }

    #[test]
    fn test_quota_rejects_write_and_keeps_previous_value() {
        let store = MemoryStorage::with_quota(20);
        store.set("projects", "[1]").unwrap();

        let err = store.set("projects", "[1,2,3,4,5,6,7,8,9]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 20, .. }));
        assert_eq!(store.get("projects").unwrap().as_deref(), Some("[1]"));

        // replacing a key does not count its old value against the quota
        store.set("projects", "[1,2,3,4]").unwrap();
        assert_eq!(store.get("projects").unwrap().as_deref(), Some("[1,2,3,4]"));
    }
}
