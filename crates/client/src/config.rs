//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the catalog REST API
//!
//! ## Optional
//! - `CATALOG_SESSION_FILE` - Session file path (default: `<data dir>/catalog-admin/session.json`)
//! - `CATALOG_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CATALOG_SEARCH_DEBOUNCE_MS` - Search debounce delay in milliseconds (default: 500)
//! - `CATALOG_PRODUCTS_PAGE_SIZE` - Products per page (default: 10)
//! - `CATALOG_CATEGORIES_PAGE_SIZE` - Categories per page (default: 50)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default request timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default delay between the last keystroke and the search request.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Default product page size.
pub const DEFAULT_PRODUCTS_PAGE_SIZE: u32 = 10;

/// Default category page size.
pub const DEFAULT_CATEGORIES_PAGE_SIZE: u32 = 50;

const SESSION_DIR: &str = "catalog-admin";
const SESSION_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API
    pub api_url: Url,
    /// Where the session token is persisted between runs
    pub session_file: PathBuf,
    /// Per-request timeout
    pub http_timeout: Duration,
    /// Debounce delay for search input
    pub search_debounce: Duration,
    /// Page size for product listing
    pub products_page_size: u32,
    /// Page size for category listing
    pub categories_page_size: u32,
}

impl ClientConfig {
    /// Configuration with defaults for everything except the API URL.
    ///
    /// The session file falls back to the working directory when the
    /// platform has no local data directory.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            session_file: default_session_file()
                .unwrap_or_else(|| PathBuf::from(SESSION_FILE)),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            products_page_size: DEFAULT_PRODUCTS_PAGE_SIZE,
            categories_page_size: DEFAULT_CATEGORIES_PAGE_SIZE,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_API_URL` is missing or any variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url("CATALOG_API_URL", &get_required_env("CATALOG_API_URL")?)?;

        let session_file = match get_optional_env("CATALOG_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file().ok_or_else(|| {
                ConfigError::MissingEnvVar("CATALOG_SESSION_FILE".to_string())
            })?,
        };

        let http_timeout = Duration::from_secs(parse_env(
            "CATALOG_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let search_debounce = Duration::from_millis(parse_env(
            "CATALOG_SEARCH_DEBOUNCE_MS",
            DEFAULT_SEARCH_DEBOUNCE_MS,
        )?);
        let products_page_size =
            parse_page_size("CATALOG_PRODUCTS_PAGE_SIZE", DEFAULT_PRODUCTS_PAGE_SIZE)?;
        let categories_page_size =
            parse_page_size("CATALOG_CATEGORIES_PAGE_SIZE", DEFAULT_CATEGORIES_PAGE_SIZE)?;

        Ok(Self {
            api_url,
            session_file,
            http_timeout,
            search_debounce,
            products_page_size,
            categories_page_size,
        })
    }

    /// Override the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Override the search debounce delay.
    #[must_use]
    pub const fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_page_size(key: &str, default: u32) -> Result<u32, ConfigError> {
    let size = parse_env(key, default)?;
    if size == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "page size must be at least 1".to_string(),
        ));
    }
    Ok(size)
}

fn parse_api_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(url)
}

fn default_session_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url("CATALOG_API_URL", " https://api.example.com/v1 ").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        let err = parse_api_url("CATALOG_API_URL", "ftp://api.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CATALOG_API_URL"));

        assert!(parse_api_url("CATALOG_API_URL", "not a url").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u64>("X", " 250 ").unwrap(), 250);
        let err = parse_value::<u32>("CATALOG_PRODUCTS_PAGE_SIZE", "ten").unwrap_err();
        assert!(err.to_string().contains("CATALOG_PRODUCTS_PAGE_SIZE"));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(Url::parse("http://localhost:3000").unwrap());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.products_page_size, 10);
        assert_eq!(config.categories_page_size, 50);
        assert!(config.session_file.ends_with(SESSION_FILE));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new(Url::parse("http://localhost:3000").unwrap())
            .with_session_file("/tmp/catalog-session.json")
            .with_search_debounce(Duration::from_millis(50));
        assert_eq!(config.session_file, PathBuf::from("/tmp/catalog-session.json"));
        assert_eq!(config.search_debounce, Duration::from_millis(50));
    }
}
