//! Backend client configuration.
//!
//! Points the client at the backend's versioned API root. Defaults target a
//! backend on localhost. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;

/// Default API root when `CSCAN_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default request timeout when `CSCAN_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the compliance backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root including the version prefix, e.g. `http://host:8000/api/v1/`.
    /// Always ends with `/`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Build a configuration from an explicit API root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CSCAN_API_URL` (default: `http://localhost:8000/api/v1`)
    /// - `CSCAN_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            std::env::var("CSCAN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs = match std::env::var("CSCAN_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            base_url: parse_base_url("CSCAN_API_URL", &raw_url)?,
            timeout_secs,
        })
    }

    /// Create a configuration pointing to a backend on a local port (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("localhost", &format!("http://127.0.0.1:{port}/api/v1"))?,
            timeout_secs: 5,
        })
    }

    /// The API root without its trailing slash, for path formatting.
    pub(crate) fn api_root(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            "URL cannot be used as an API root".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("CSCAN_TIMEOUT_SECS must be a whole number of seconds, got \"{0}\"")]
    InvalidTimeout(String),
}
