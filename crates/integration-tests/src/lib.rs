//! Integration tests for SpiceAura.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p spiceaura-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Multi-session cart flows against the file backend
//! - `stored_formats` - Loading carts written by older or foreign writers
//!
//! Each test gets its own temporary data directory through [`TestContext`].

use std::path::Path;

use spiceaura_cart::{CartStore, FileStorage};
use spiceaura_core::ProductDescriptor;
use tempfile::TempDir;

/// A temporary data directory standing in for one browser profile.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Start a new session: a fresh store loaded from disk.
    #[must_use]
    pub fn session(&self) -> CartStore<FileStorage> {
        CartStore::load(FileStorage::new(self.data_dir()))
    }

    /// Write a raw stored value under the default cart key.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[allow(clippy::expect_used)]
    pub fn write_raw(&self, raw: &str) {
        std::fs::write(self.data_dir().join("spiceaura_cart_v1.json"), raw)
            .expect("Failed to write stored cart");
    }

    /// Read the raw stored value under the default cart key, if any.
    #[must_use]
    pub fn read_raw(&self) -> Option<String> {
        std::fs::read_to_string(self.data_dir().join("spiceaura_cart_v1.json")).ok()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A product descriptor with a derived name and image.
#[must_use]
pub fn product(id: &str, price: f64) -> ProductDescriptor {
    ProductDescriptor::new(id, format!("Product {id}"), price, format!("img/{id}.jpg"))
}
