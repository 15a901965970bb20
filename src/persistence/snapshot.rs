use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{KeyValueStore, PersistenceError};
use crate::actor_framework::Snapshotter;

/// One JSON value stored under a single key.
///
/// A value that no longer decodes is removed from the store and reported as
/// absent, so callers fall back to their defaults instead of failing.
pub struct JsonSlot<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> Result<Option<T>, PersistenceError> {
        let Some(raw) = self.store.load(&self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %self.key(), error = %e, "Discarding corrupt stored value");
                if let Err(e) = self.store.remove(self.key()) {
                    warn!(key = %self.key(), error = %e, "Failed to remove corrupt stored value");
                }
                Ok(None)
            }
        }
    }

    pub fn save(&self, value: &T) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.store.save(&self.key, &raw)
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)
    }
}

/// The whole entity list as one JSON array, rewritten after every mutation.
pub struct JsonSnapshot<T> {
    slot: JsonSlot<Vec<T>>,
}

impl<T> JsonSnapshot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            slot: JsonSlot::new(store, key),
        }
    }

    /// `None` when nothing usable is stored (absent or corrupt).
    pub fn load(&self) -> Result<Option<Vec<T>>, PersistenceError> {
        self.slot.load()
    }
}

impl<T> Snapshotter<T> for JsonSnapshot<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn save(&self, items: &[T]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(items).map_err(|source| PersistenceError::Encode {
            key: self.slot.key().to_string(),
            source,
        })?;
        self.slot.store.save(self.slot.key(), &raw)
    }
}
