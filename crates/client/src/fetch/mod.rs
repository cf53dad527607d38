//! Synchronous HTTP fetch for remote HTML documents.
//!
//! One GET per call, no retry, full body buffered. The response handle is
//! scoped to the call, so the connection is released on every exit path
//! before control returns to the caller.

pub mod url;

use std::time::{Duration, Instant};

use pagesplice_core::Error;
use reqwest::blocking::Client;

pub use url::{UrlError, canonicalize};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "pagesplice/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "pagesplice/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20_000),
        }
    }
}

impl FetchConfig {
    /// Build a fetch configuration from the application configuration.
    pub fn from_app_config(config: &pagesplice_core::AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() }
    }
}

/// Source of raw document bytes for the grab pipeline.
///
/// The pipeline only needs "bytes for a URL", so it consumes this trait
/// rather than [`FetchClient`] directly; tests substitute an in-memory
/// implementation.
pub trait PageFetcher: Send + Sync {
    /// Fetch the document at `url` as raw bytes. One attempt, no retry.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, Error>;
}

/// HTTP fetch client wrapping a blocking reqwest client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::FetchFailed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl PageFetcher for FetchClient {
    fn fetch_bytes(&self, url_str: &str) -> Result<Vec<u8>, Error> {
        let start = Instant::now();
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        tracing::info!(url = %url, "reading remote HTML document");

        let response = self
            .http
            .get(url.as_str())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .map_err(|e| Error::FetchFailed(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let declared_len = response.content_length();
        if let Some(len) = declared_len
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::FetchFailed(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        let mut content = bytes.to_vec();

        // Servers occasionally pad beyond the declared length; trust the
        // Content-Length header when it is shorter than what was read.
        if let Some(len) = declared_len {
            let len = len as usize;
            if len < content.len() {
                content.truncate(len);
            }
        }

        tracing::debug!(
            url = %url,
            bytes = content.len(),
            fetch_ms = start.elapsed().as_millis() as u64,
            "fetched remote document"
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "pagesplice/0.1");
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20_000));
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = pagesplice_core::AppConfig { max_bytes: 1024, timeout_ms: 500, ..Default::default() };
        let config = FetchConfig::from_app_config(&app);
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.user_agent, app.user_agent);
    }

    #[test]
    fn test_fetch_client_new() {
        let config = FetchConfig::default();
        let client = FetchClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_fetch_rejects_invalid_url() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let result = client.fetch_bytes("");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
