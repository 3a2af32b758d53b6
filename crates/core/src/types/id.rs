//! Product identifiers.
//!
//! Cart lines are keyed by a string ID taken from page markup or from a
//! persisted record. Wrapping it keeps product IDs from being confused with
//! names or image references, which are also plain strings.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a distinct purchasable product.
///
/// Serialized transparently as a JSON string.
///
/// # Example
///
/// ```rust
/// # use spiceaura_core::ProductId;
/// let id = ProductId::new("turmeric-100g");
/// assert_eq!(id.as_str(), "turmeric-100g");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from any string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random ID for records that carry neither an ID nor a name.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
