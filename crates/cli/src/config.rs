//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SPICEAURA_DATA_DIR` - Directory holding the stored cart (default: `.spiceaura`)
//! - `SPICEAURA_CART_KEY` - Storage key for the cart (default: `spiceaura_cart_v1`)
//! - `SPICEAURA_CHECKOUT_URL` - Page to hand off to at checkout (default: `checkout.html`)

use std::path::PathBuf;

use thiserror::Error;

use spiceaura_cart::CART_STORAGE_KEY;
use spiceaura_cart::checkout::DEFAULT_CHECKOUT_TARGET;
use spiceaura_cart::storage::validate_key;

const DEFAULT_DATA_DIR: &str = ".spiceaura";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory for the file storage backend
    pub data_dir: PathBuf,
    /// Key the cart is stored under
    pub cart_key: String,
    /// Checkout page the cart is handed off to
    pub checkout_url: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("SPICEAURA_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SPICEAURA_DATA_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let cart_key = lookup("SPICEAURA_CART_KEY").unwrap_or_else(|| CART_STORAGE_KEY.to_string());
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("SPICEAURA_CART_KEY".to_string(), e.to_string())
        })?;

        let checkout_url =
            lookup("SPICEAURA_CHECKOUT_URL").unwrap_or_else(|| DEFAULT_CHECKOUT_TARGET.to_string());
        if checkout_url.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SPICEAURA_CHECKOUT_URL".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            cart_key,
            checkout_url,
        })
    }
}
