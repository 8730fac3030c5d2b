//! Download-if-missing dataset loading.
//!
//! [`DatasetSource`] ties a remote TSV archive to a local cache: the first
//! load fetches the raw bytes over HTTP and writes them through a
//! [`StorageBackend`]; every later load reads the cache and skips the
//! network entirely. Gzip-compressed archives (`.gz` basename) are
//! decompressed transparently before parsing.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use flate2::read::GzDecoder;

use crate::{
    backend::{LocalBackend, StorageBackend},
    dataset::ReviewDataset,
    error::{Error, Result},
};

/// A remote review archive paired with a cache backend.
///
/// The cache key is the final path segment of the URL, so repeated runs
/// against the same resource reuse the raw bytes already on disk.
///
/// # Example
///
/// ```no_run
/// use resenha::DatasetSource;
///
/// let source = DatasetSource::new(
///     "https://s3.amazonaws.com/amazon-reviews-pds/tsv/amazon_reviews_us_Gift_Card_v1_00.tsv.gz",
///     ".",
/// )
/// .unwrap();
/// let dataset = source.load().unwrap();
/// println!("{} reviews", dataset.len());
/// ```
#[derive(Debug)]
pub struct DatasetSource<C = LocalBackend> {
    url: String,
    cache: C,
}

impl DatasetSource<LocalBackend> {
    /// Creates a source caching into the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no basename to cache under or the
    /// cache directory cannot be created.
    pub fn new(url: impl Into<String>, cache_dir: impl AsRef<Path>) -> Result<Self> {
        let cache = LocalBackend::new(cache_dir)?;
        Self::with_cache(url, cache)
    }

    /// The filesystem path where the raw download lands.
    pub fn cache_path(&self) -> PathBuf {
        self.cache.root().join(self.cache_key())
    }
}

impl<C: StorageBackend> DatasetSource<C> {
    /// Creates a source over an arbitrary cache backend.
    ///
    /// # Errors
    ///
    /// Returns a fetch error if the URL has no basename to cache under.
    pub fn with_cache(url: impl Into<String>, cache: C) -> Result<Self> {
        let url = url.into();
        let has_basename = url.rsplit('/').next().is_some_and(|name| !name.is_empty());
        if !has_basename {
            return Err(Error::fetch(url, "resource URL has no basename to cache under"));
        }
        Ok(Self { url, cache })
    }

    /// The URL this source loads from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The cache key: the final path segment of the URL.
    pub fn cache_key(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    /// Whether the raw bytes are already cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be inspected.
    pub fn is_cached(&self) -> Result<bool> {
        self.cache.exists(self.cache_key())
    }

    /// Loads the dataset, fetching and caching the raw bytes if missing.
    ///
    /// # Errors
    ///
    /// Returns a fetch error if the resource is unreachable or returns a
    /// non-success status, and a parse error if the payload is not the
    /// expected header-prefixed TSV.
    pub fn load(&self) -> Result<ReviewDataset> {
        let raw = self.raw_bytes()?;
        decode_and_parse(self.cache_key(), &raw)
    }

    /// Reads the cached raw bytes, or fetches and caches them.
    fn raw_bytes(&self) -> Result<Bytes> {
        let key = self.cache_key();
        if self.cache.exists(key)? {
            return self.cache.get(key);
        }

        let raw = self.fetch()?;
        self.cache.put(key, raw.clone())?;
        Ok(raw)
    }

    #[cfg(feature = "http")]
    fn fetch(&self) -> Result<Bytes> {
        use crate::backend::HttpBackend;

        let (base, key) = self
            .url
            .rsplit_once('/')
            .ok_or_else(|| Error::fetch(&self.url, "resource URL has no path"))?;
        HttpBackend::new(base)?.get(key)
    }

    #[cfg(not(feature = "http"))]
    fn fetch(&self) -> Result<Bytes> {
        Err(Error::fetch(
            &self.url,
            "resource is not cached and resenha was built without the `http` feature",
        ))
    }
}

/// Loads a dataset from a local file without any network involvement.
///
/// Gzip-compressed files (`.gz` extension) are decompressed transparently.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error if the
/// content is not the expected header-prefixed TSV.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ReviewDataset> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|e| Error::io(e, path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    decode_and_parse(&name, &raw)
}

/// Decompresses (when the key names a `.gz` resource) and parses raw bytes.
fn decode_and_parse(key: &str, raw: &[u8]) -> Result<ReviewDataset> {
    if key.ends_with(".gz") {
        let mut decoder = GzDecoder::new(raw);
        let mut decoded = Vec::new();
        decoder
            .read_to_end(&mut decoded)
            .map_err(|e| Error::parse(format!("gzip decode failed: {e}")))?;
        ReviewDataset::from_tsv_bytes(&decoded)
    } else {
        ReviewDataset::from_tsv_bytes(raw)
    }
}
