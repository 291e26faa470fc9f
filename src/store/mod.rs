//! Key-value persistence.
//!
//! The sole durability mechanism: synchronous get/set/remove over string
//! keys holding JSON-serialized values, last-write-wins, no transactions.
//! `KvStore` is the seam for a browser-storage or file-backed adapter;
//! `MemStore` is the in-crate implementation.

pub mod keys;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

pub use keys::StoreKey;

/// Synchronous string-keyed storage. Assumed always available; callers get
/// no retry policy and expect none.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store, also the test double for every engine.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    entries: BTreeMap<String, String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Read a typed value, degrading to the type's default when the key is
/// absent or its value no longer parses. Corrupt local state must never
/// crash a view.
pub fn read_or_default<T, S>(store: &S, key: StoreKey<T>) -> T
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    let Some(raw) = store.get(key.name()) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key = key.name(), %err, "discarding unparseable stored value");
            T::default()
        }
    }
}

/// Read a typed value, `None` when absent or unparseable.
pub fn read<T, S>(store: &S, key: StoreKey<T>) -> Option<T>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = store.get(key.name())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key = key.name(), %err, "discarding unparseable stored value");
            None
        }
    }
}

/// Serialize and persist a typed value under its key.
pub fn write<T, S>(store: &mut S, key: StoreKey<T>, value: &T)
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key.name(), raw),
        // Domain types serialize infallibly; a failure here is a bug, but
        // storage I/O has no error channel to surface it through.
        Err(err) => warn!(key = key.name(), %err, "failed to serialize value for storage"),
    }
}
