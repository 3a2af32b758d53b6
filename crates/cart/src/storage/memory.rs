//! In-memory storage backend.
//!
//! Holds values in a `HashMap` for the life of the process. A byte quota and
//! an availability switch let tests reproduce the ways browser storage fails
//! (quota exceeded, storage disabled).

use std::collections::HashMap;

use super::CartStorage;
use crate::error::{Result, StorageError};

/// Process-local key-value storage.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<usize>,
    available: bool,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            quota: None,
            available: true,
        }
    }

    /// Create an empty store that accepts at most `quota` bytes of keys and
    /// values combined.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new()
        }
    }

    /// Seed a value directly, bypassing quota checks.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Switch the store on or off. While off every read and write fails.
    pub const fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Peek at a stored value without going through [`CartStorage`].
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Bytes held after storing `value` under `key`.
    fn usage_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("memory storage is disabled".to_string()))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;

        if let Some(quota) = self.quota {
            let needed = self.usage_with(key, value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
