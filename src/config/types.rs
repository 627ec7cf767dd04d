use serde::Deserialize;

/// Main configuration structure for Linkscout
///
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages to crawl (-1 for unlimited)
    #[serde(rename = "max-pages")]
    pub max_pages: i64,

    /// Number of concurrent workers
    #[serde(rename = "num-workers")]
    pub num_workers: usize,

    /// Require a dot boundary when matching subdomains against the base host
    #[serde(rename = "strict-scope")]
    pub strict_scope: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: -1,
            num_workers: 5,
            strict_scope: false,
        }
    }
}

/// HTTP fetching and retry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Timeout for a single request attempt (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Total attempts per URL, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Multiplier applied to the delay after each retry
    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_attempts: 3,
            base_delay_ms: 1000,
            backoff_factor: 2.0,
            user_agent: format!("linkscout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File to write the crawl report to; stdout when absent
    #[serde(rename = "output-file")]
    pub output_file: Option<String>,
}
