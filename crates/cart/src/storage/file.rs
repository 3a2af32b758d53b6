//! File-backed storage.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temporary file
//! that is then renamed over the target, so a reader sees either the old or
//! the new value, never a partial one.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{CartStorage, validate_key};
use crate::error::Result;

/// Stores each key as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the data directory. It is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`](crate::StorageError::InvalidKey)
    /// if the key could escape the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("spiceaura_cart_v1").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let mut storage = FileStorage::new(&data_dir);

        storage.set("spiceaura_cart_v1", "[]").unwrap();

        let path = data_dir.join("spiceaura_cart_v1.json");
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!data_dir.join("spiceaura_cart_v1.json.tmp").exists());
        assert_eq!(
            storage.get("spiceaura_cart_v1").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_set_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set("cart", "[1,2,3,4,5]").unwrap();
        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.get("a/b"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the read fail.
        fs::create_dir(dir.path().join("cart.json")).unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(storage.get("cart"), Err(StorageError::Io(_))));
    }
}
