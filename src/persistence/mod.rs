//! Best-effort key/value persistence
//!
//! The game only ever stores a handful of small strings. Callers go through
//! [`KeyValueStore`] so the simulation side never touches browser APIs:
//! - `MemoryStore` for tests and the native build
//! - `LocalStorage` (wasm only) backed by `window.localStorage`

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStore;

use std::fmt;

/// Why a storage call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage backend (private mode, disabled, no window)
    Unavailable,
    /// Backend refused the operation (quota, security error)
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Rejected(why) => write!(f, "storage rejected the operation: {why}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value port
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and parse an integer, `None` on any failure
pub fn read_u64(store: &impl KeyValueStore, key: &str) -> Option<u64> {
    match store.get(key) {
        Ok(Some(raw)) => raw.trim().parse().ok(),
        Ok(None) => None,
        Err(e) => {
            log::warn!("Reading {key}: {e}");
            None
        }
    }
}

/// Write an integer, logging and swallowing failures
pub fn write_u64(store: &mut impl KeyValueStore, key: &str, value: u64) {
    if let Err(e) = store.set(key, &value.to_string()) {
        log::warn!("Writing {key}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u64_ignores_garbage() {
        let mut store = MemoryStore::new();
        assert_eq!(read_u64(&store, "k"), None);
        store.set("k", "not a number").unwrap();
        assert_eq!(read_u64(&store, "k"), None);
        store.set("k", "42").unwrap();
        assert_eq!(read_u64(&store, "k"), Some(42));
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut store = MemoryStore::unavailable();
        write_u64(&mut store, "k", 5);
        assert_eq!(read_u64(&store, "k"), None);
    }
}
