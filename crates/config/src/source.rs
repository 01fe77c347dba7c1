//! Raw settings sources

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

/// A read-only key/value store backing all configuration lookups.
///
/// Keys are fully qualified (`"<Section>:<setting>"`). A lookup either yields
/// the raw string or nothing; how the values got there is up to the
/// implementation.
pub trait SettingsSource: Send + Sync {
    /// Look up the raw value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Human-readable name for logging
    fn name(&self) -> String {
        "settings".to_string()
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// In-memory settings source with case-insensitive keys.
///
/// Entries may be updated between lookups; a key can also be stored with a
/// null value, which reads back the same as an absent key.
#[derive(Debug)]
pub struct InMemorySource {
    name: String,
    entries: RwLock<HashMap<String, Option<String>>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Create an empty source with a display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Builder-style insert
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Store a value, replacing any previous entry for the same key
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key.into(), Some(value.into()));
    }

    /// Store a key with no value
    pub fn set_null(&self, key: impl Into<String>) {
        self.insert(key.into(), None);
    }

    /// Copy every entry of `other` into this source, overriding on conflict
    pub fn extend_from(&self, other: &InMemorySource) {
        let incoming = other.entries.read().unwrap_or_else(PoisonError::into_inner).clone();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.extend(incoming);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, key: String, value: Option<String>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(normalize(&key), value);
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsSource for InMemorySource {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let value = entries.get(&normalize(key)).cloned().flatten();
        trace!(source = %self.name, key = key, found = value.is_some(), "Settings lookup");
        value
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let source = Self::new();
        for (key, value) in iter {
            source.set(key, value);
        }
        source
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}
