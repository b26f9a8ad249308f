//! Local key-value persistence.
//!
//! Everything the application knows lives under a handful of string keys, each holding
//! one JSON document that is read and rewritten wholesale:
//!
//! - `mockUser` holds the signed-in [`User`](crate::models::User), or is absent.
//! - `projects` holds the ordered project list.
//! - `tasks-<projectId>` and `messages-<projectId>` hold one project's tasks and chat.
//!
//! [`KeyValueStore`] is the seam between the domain and the backend. [`MemoryStorage`]
//! backs tests and simulated reloads; [`FileStorage`] keeps the same map in a JSON file.

pub mod file;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

pub use file::FileStorage;
pub use memory::MemoryStorage;

pub const USER_KEY: &str = "mockUser";
pub const PROJECTS_KEY: &str = "projects";

pub fn tasks_key(project_id: &str) -> String {
    format!("tasks-{}", project_id)
}

pub fn messages_key(project_id: &str) -> String {
    format!("messages-{}", project_id)
}

/// Failure of the underlying store. Any of these aborts the operation that hit it.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    /// The write would push the store past its byte quota.
    QuotaExceeded { key: String, limit: usize },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "io error: {}", e),
            StorageError::Serialization(e) => write!(f, "serialization error: {}", e),
            StorageError::QuotaExceeded { key, limit } => {
                write!(f, "writing '{}' exceeds the storage quota of {} bytes", key, limit)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e)
    }
}

/// A synchronous string key-value store with whole-value reads and writes.
///
/// Implementations use interior mutability so one store can be shared between the
/// session and the entity stores behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`. On error the previous value is kept.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and decodes the JSON document under `key`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` and writes it under `key`, replacing whatever was there.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_layout() {
        assert_eq!(tasks_key("abc123def"), "tasks-abc123def");
        assert_eq!(messages_key("abc123def"), "messages-abc123def");
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStorage::new();
        assert_eq!(load_json::<Vec<u32>>(&store, "numbers").unwrap(), None);

        save_json(&store, "numbers", &vec![3, 1, 2]).unwrap();
        assert_eq!(store.get("numbers").unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(
            load_json::<Vec<u32>>(&store, "numbers").unwrap(),
            Some(vec![3, 1, 2])
        );
    }

    #[test]
    fn test_load_json_reports_corrupt_documents() {
        let store = MemoryStorage::new();
        store.set("numbers", "[1, 2,").unwrap();
        match load_json::<Vec<u32>>(&store, "numbers") {
            Err(StorageError::Serialization(_)) => {}
            other => panic!("expected serialization error, got {:?}", other),
        }
    }
}
