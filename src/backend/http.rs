//! HTTP/HTTPS storage backend (read-only).
//!
//! Provides read-only access to datasets hosted on HTTP/HTTPS servers.
//! Useful for pulling public review archives without any credentials.

use bytes::Bytes;
use reqwest::blocking::Client;

use super::StorageBackend;
use crate::error::{Error, Result};

/// A read-only storage backend using HTTP/HTTPS.
///
/// This backend is designed for accessing publicly hosted datasets over
/// HTTP/HTTPS. The whole resource is fetched in one blocking request; there
/// is no timeout, retry, or resume — a failed transfer is fatal to the run.
///
/// # Limitations
///
/// - Read-only: `put` will return an error
///
/// # Example
///
/// ```no_run
/// use resenha::backend::{HttpBackend, StorageBackend};
///
/// let backend = HttpBackend::new("https://s3.amazonaws.com/amazon-reviews-pds/tsv").unwrap();
/// let data = backend.get("amazon_reviews_us_Gift_Card_v1_00.tsv.gz").unwrap();
/// ```
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a new HTTP backend with the given base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for all requests. Keys will be appended to this.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .user_agent("resenha/0.1.0")
            .build()
            .map_err(|e| Error::fetch(&base_url, format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Constructs the full URL for a key.
    fn url_for(&self, key: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, key)
        } else {
            format!("{}/{}", self.base_url, key)
        }
    }
}

impl StorageBackend for HttpBackend {
    fn get(&self, key: &str) -> Result<Bytes> {
        let url = self.url_for(key);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::fetch(&url, format!("HTTP GET error: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::fetch(
                &url,
                format!("HTTP GET failed: status {}", response.status()),
            ));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::fetch(&url, format!("Failed to read HTTP response body: {e}")))?;

        Ok(bytes)
    }

    fn put(&self, key: &str, _data: Bytes) -> Result<()> {
        Err(Error::storage(format!(
            "HTTP backend is read-only, cannot write to '{}'",
            key
        )))
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let url = self.url_for(key);

        let response = self
            .client
            .head(&url)
            .send()
            .map_err(|e| Error::fetch(&url, format!("HTTP HEAD error: {e}")))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_with_trailing_slash() {
        let backend = HttpBackend::new("https://example.com/data/").unwrap();
        assert_eq!(
            backend.url_for("reviews.tsv.gz"),
            "https://example.com/data/reviews.tsv.gz"
        );
    }

    #[test]
    fn test_url_for_without_trailing_slash() {
        let backend = HttpBackend::new("https://example.com/data").unwrap();
        assert_eq!(
            backend.url_for("reviews.tsv.gz"),
            "https://example.com/data/reviews.tsv.gz"
        );
    }

    #[test]
    fn test_put_is_rejected() {
        let backend = HttpBackend::new("https://example.com/data").unwrap();
        let result = backend.put("key", Bytes::from("data"));
        assert!(matches!(result, Err(Error::Storage { .. })));
    }

    #[test]
    fn test_base_url() {
        let backend = HttpBackend::new("https://example.com/data").unwrap();
        assert_eq!(backend.base_url(), "https://example.com/data");
    }
}
