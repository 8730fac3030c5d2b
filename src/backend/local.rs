//! Local filesystem storage backend.

use std::{
    fs,
    path::{Path, PathBuf},
};

use bytes::Bytes;

use super::StorageBackend;
use crate::error::{Error, Result};

/// A storage backend using the local filesystem.
///
/// All keys are relative to the configured root directory. The loader uses
/// this backend as its download cache.
///
/// # Example
///
/// ```no_run
/// use resenha::backend::LocalBackend;
///
/// let backend = LocalBackend::new("/data/reviews").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Creates a new local backend with the given root directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| Error::io(e, &root))?;
        Ok(Self { root })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to a full filesystem path.
    fn resolve_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StorageBackend for LocalBackend {
    fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.resolve_path(key);
        let data = fs::read(&path).map_err(|e| Error::io(e, &path))?;
        Ok(Bytes::from(data))
    }

    fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.resolve_path(key);

        // Create parent directories
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(e, parent))?;
        }

        fs::write(&path, &data).map_err(|e| Error::io(e, &path))
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve_path(key);
        Ok(path.exists())
    }
}
