//! Linkscout: a bounded, concurrent, same-site web crawler
//!
//! This crate discovers pages reachable from a start URL, restricted to the
//! start URL's host and its subdomains. Links are taken from HTML anchors,
//! script `src` attributes and URL-looking literals inside inline scripts.
//! Script files are recorded but never fetched.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Linkscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Could not fetch seed URL {url}: {source}")]
    SeedUnreachable { url: String, source: FetchError },
}

/// A URL whose fetch attempts were all used up
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to fetch {url}: {source}")]
pub struct FetchFailed {
    pub url: String,
    /// Error from the last attempt
    pub source: FetchError,
}

/// A single failed fetch attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),

    /// Processing of the page stopped before a response was handled
    #[error("processing aborted: {0}")]
    Aborted(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Linkscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use output::CrawlReport;
pub use state::{CrawlState, PageBudget};
pub use crate::url::{canonicalize, CanonicalUrl, Scope};
