//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and exponential backoff
//! - HTML and inline script link extraction
//! - The shared frontier and its drain detection
//! - The worker pool and overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod script;
mod worker;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{
    build_http_client, is_markup, FetchedPage, HttpTransport, PageFetcher, RetryPolicy, Transport,
};
pub use frontier::{Frontier, FrontierItem, FrontierPhase, Task};
pub use parser::LinkExtractor;
pub use script::{default_matchers, RegexMatcher, ScriptMatcher};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the fetcher settings
/// 2. Seed the frontier with `start_url`
/// 3. Fetch pages and follow in-scope links with a pool of workers
/// 4. Return the visited pages and discovered script files
///
/// # Arguments
///
/// * `start_url` - Absolute http(s) URL; its host defines the crawl scope
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(ScoutError)` - Bad start URL, client setup failure, or unreachable seed
pub async fn crawl(start_url: &str, config: Config) -> Result<CrawlReport> {
    run_crawl(start_url, &config).await
}
