//! Crawler coordinator - crawl orchestration
//!
//! The coordinator owns one crawl run from start to finish:
//! - Resolving the start URL into the seed and the crawl scope
//! - Seeding the frontier and spawning the worker pool
//! - Waiting for the frontier to drain, then stopping every worker
//! - Collecting the final report

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::LinkExtractor;
use crate::crawler::worker::{CrawlContext, Worker};
use crate::output::CrawlReport;
use crate::state::{CrawlState, PageBudget};
use crate::url::{CanonicalUrl, Scope};
use crate::{Result, ScoutError};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    crawler: CrawlerConfig,
    fetcher: PageFetcher,
    extractor: LinkExtractor,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScoutError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = PageFetcher::from_config(&config.fetcher)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: &Config, fetcher: PageFetcher) -> Self {
        Self {
            crawler: config.crawler.clone(),
            fetcher,
            extractor: LinkExtractor::new(),
        }
    }

    /// Replaces the link extractor
    pub fn with_extractor(mut self, extractor: LinkExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Crawls everything reachable from `start_url` within scope and budget
    ///
    /// Returns once the frontier has drained and every worker has exited.
    /// Fails with [`ScoutError::SeedUnreachable`] if the start page itself
    /// could not be fetched.
    pub async fn run(self, start_url: &str) -> Result<CrawlReport> {
        let start = Url::parse(start_url.trim())?;
        let seed = CanonicalUrl::parse(start.as_str())?;
        let scope = Scope::from_start_url(seed.as_url(), self.crawler.strict_scope)?;
        let budget = PageBudget::from_sentinel(self.crawler.max_pages);
        let num_workers = self.crawler.num_workers.max(1);

        tracing::info!(
            "Starting crawl of {} (scope: {}{}, budget: {}, workers: {})",
            seed,
            scope.base_host(),
            if scope.is_strict() { " strict" } else { "" },
            budget,
            num_workers
        );

        let ctx = Arc::new(CrawlContext {
            frontier: Frontier::new(),
            state: CrawlState::new(budget),
            scope,
            fetcher: self.fetcher,
            extractor: self.extractor,
            seed: seed.clone(),
            seed_failure: OnceLock::new(),
        });

        let start_time = Instant::now();
        ctx.frontier.submit(seed.clone());

        let handles: Vec<_> = (0..num_workers)
            .map(|id| tokio::spawn(Worker::new(id, Arc::clone(&ctx)).run()))
            .collect();

        ctx.frontier.await_drained().await;
        tracing::debug!("Frontier drained, stopping {} workers", num_workers);
        ctx.frontier.stop_workers(num_workers);

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }
        ctx.frontier.mark_stopped();

        if let Some(source) = ctx.seed_failure.get() {
            return Err(ScoutError::SeedUnreachable {
                url: seed.to_string(),
                source: source.clone(),
            });
        }

        let report = ctx.state.report();
        tracing::info!(
            "Crawl completed: {} pages crawled, {} JavaScript files found in {:?}",
            report.crawled_count,
            report.script_resources.len(),
            start_time.elapsed()
        );

        Ok(report)
    }
}

/// Builds an HTTP coordinator from `config` and runs it
pub async fn run_crawl(start_url: &str, config: &Config) -> Result<CrawlReport> {
    Coordinator::new(config)?.run(start_url).await
}
