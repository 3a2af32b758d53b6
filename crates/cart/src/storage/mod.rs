//! Durable key-value storage for the cart.
//!
//! The cart is stored as one string value under one key and is always read
//! and written whole. Backends implement [`CartStorage`]:
//!
//! - [`MemoryStorage`] - process-local map, with optional quota and an
//!   "unavailable" switch for exercising failure paths
//! - [`FileStorage`] - one JSON file per key inside a data directory

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{Result, StorageError};

/// Read-all/write-all string storage keyed by a namespace string.
pub trait CartStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Check that a key is usable as a file name on every backend.
///
/// Keys may contain ASCII letters, digits, `_`, `-` and `.`, must not be
/// empty and must not start with `.`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for any other key.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
