//! Storage backends for resenha.
//!
//! Backends provide abstracted storage operations for the raw dataset bytes.
//! The [`StorageBackend`] trait defines the interface, with implementations
//! for the local filesystem (the download cache), read-only HTTP access, and
//! in-memory storage for tests.

#[cfg(feature = "http")]
pub mod http;
pub mod local;
pub mod memory;

use bytes::Bytes;
#[cfg(feature = "http")]
pub use http::HttpBackend;
pub use local::LocalBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// A storage backend for reading and writing raw dataset bytes.
///
/// Backends abstract the underlying storage mechanism, allowing the loader
/// to cache downloads on the local filesystem in production and in memory
/// during tests using the same interface.
pub trait StorageBackend: Send + Sync {
    /// Reads data from the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or cannot be read.
    fn get(&self, key: &str) -> Result<Bytes>;

    /// Writes data to the given key.
    ///
    /// Creates parent directories/prefixes as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Checks if the given key exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check fails.
    fn exists(&self, key: &str) -> Result<bool>;
}
