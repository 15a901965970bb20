//! Key-value persistence standing in for browser local storage.
//!
//! Stores deal in raw strings, exactly like local storage does; the JSON
//! codec lives in [`JsonSlot`] and [`JsonSnapshot`] so corrupt values can be
//! detected and discarded by the reader.

mod file;
mod memory;
mod snapshot;

pub use file::*;
pub use memory::*;
pub use snapshot::*;

use thiserror::Error;

/// Storage key holding the full product array.
pub const PRODUCTS_KEY: &str = "luxora-products";
/// Storage key holding the signed-in user.
pub const SESSION_KEY: &str = "luxora-user";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A namespaced string store. Implementations must be shareable between the
/// actors that persist through them.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
