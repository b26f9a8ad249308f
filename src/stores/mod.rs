//! Entity stores: ordered sequences persisted wholesale under one key each.
//!
//! A store is loaded once when its scope is entered and then serves reads from memory.
//! Every mutation builds the complete next sequence, writes it under the store's key
//! and only then adopts it, so a failed write leaves both the stored and the in-memory
//! sequence as they were.

pub mod messages;
pub mod projects;
pub mod tasks;

use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::storage::{load_json, save_json, KeyValueStore, StorageError};

pub use messages::MessageStore;
pub use projects::ProjectStore;
pub use tasks::{Board, BoardColumn, TaskStore};

#[derive(Debug, Clone)]
pub struct Collection<T> {
    key: String,
    items: Vec<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Reads the sequence under `key`; an absent key is an empty sequence.
    pub fn load(storage: &dyn KeyValueStore, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        let items = load_json::<Vec<T>>(storage, &key)?.unwrap_or_default();
        debug!("Loaded {} items from '{}'", items.len(), key);
        Ok(Self { key, items })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Persists `next` as the whole sequence, then makes it the in-memory value.
    pub fn commit(&mut self, storage: &dyn KeyValueStore, next: Vec<T>) -> Result<(), StorageError> {
        save_json(storage, &self.key, &next)?;
        self.items = next;
        Ok(())
    }
}
