//! Error types for durable cart storage.

use thiserror::Error;

/// Errors that can occur while reading or writing stored cart data.
///
/// The cart store never surfaces these to its callers: read failures load an
/// empty cart and write failures are logged. Backends still report them so
/// the store can log what happened.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Writing the value would exceed the backend's quota.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Maximum bytes the backend accepts.
        quota: usize,
    },

    /// The backend is switched off or otherwise unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
