//! Crawl worker
//!
//! Each worker loops: dequeue, admit or skip, fetch, extract, submit
//! children, acknowledge. Nothing that goes wrong while processing one URL
//! escapes the loop, not even a panic; failures are logged and the worker
//! moves on.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::LinkExtractor;
use crate::state::{Admission, CrawlState, SubmitDecision};
use crate::url::{canonicalize, CanonicalUrl, Scope};
use crate::FetchError;
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

/// Everything the worker pool shares for one crawl run
pub(crate) struct CrawlContext {
    pub frontier: Frontier,
    pub state: CrawlState,
    pub scope: Scope,
    pub fetcher: PageFetcher,
    pub extractor: LinkExtractor,
    pub seed: CanonicalUrl,
    /// Set if the seed page was admitted but could not be fetched or processed
    pub seed_failure: OnceLock<FetchError>,
}

pub(crate) struct Worker {
    id: usize,
    ctx: Arc<CrawlContext>,
}

impl Worker {
    pub fn new(id: usize, ctx: Arc<CrawlContext>) -> Self {
        Self { id, ctx }
    }

    /// Processes frontier items until a stop token is dequeued
    ///
    /// Each item runs in its own task, so a panic while processing one URL
    /// is logged and the worker carries on with the next item.
    pub async fn run(self) {
        tracing::debug!("Worker {} started", self.id);

        while let Some(task) = self.ctx.frontier.next().await {
            let ctx = Arc::clone(&self.ctx);
            let url = task.url().clone();
            let outcome = tokio::spawn(async move { process(&ctx, &url).await }).await;

            if let Err(e) = outcome {
                tracing::error!(
                    "Worker {} aborted processing {}: {}",
                    self.id,
                    task.url(),
                    e
                );
                if *task.url() == self.ctx.seed {
                    let _ = self
                        .ctx
                        .seed_failure
                        .set(FetchError::Aborted(e.to_string()));
                }
            }
            // Dropping the task acknowledges it
        }

        tracing::debug!("Worker {} received stop token", self.id);
    }
}

async fn process(ctx: &CrawlContext, url: &CanonicalUrl) {
    let crawled = match ctx.state.admit(url, &ctx.scope) {
        Admission::Admitted { crawled } => crawled,
        Admission::ScriptResource => {
            tracing::info!("Found JS file: {}", url);
            return;
        }
        Admission::AlreadySeen => {
            tracing::trace!("Skipping already seen {}", url);
            return;
        }
        Admission::BudgetExhausted => {
            tracing::debug!("Page budget exhausted, skipping {}", url);
            return;
        }
        Admission::OutOfScope => {
            tracing::debug!("Skipping out-of-scope {}", url);
            return;
        }
    };

    tracing::info!(
        "Crawling: {} (Crawled: {}/{})",
        url,
        crawled,
        ctx.state.budget()
    );

    let page = match ctx.fetcher.fetch(url.as_url()).await {
        Ok(page) => page,
        Err(failed) => {
            tracing::warn!("{}", failed);
            if *url == ctx.seed {
                let _ = ctx.seed_failure.set(failed.source);
            }
            return;
        }
    };

    if !page.is_markup() {
        tracing::debug!(
            "Not extracting links from {} (content type {:?})",
            url,
            page.content_type
        );
        return;
    }

    let links = ctx.extractor.extract(&page.body, &page.content_type, url.as_url());
    submit_children(ctx, url, links);
}

/// Canonicalizes discovered links and queues the eligible ones
fn submit_children(ctx: &CrawlContext, page: &CanonicalUrl, links: BTreeSet<String>) {
    let found = links.len();
    let mut submitted = 0;

    for link in links {
        let child = match canonicalize(&link, page.as_url()) {
            Ok(child) => child,
            Err(e) => {
                tracing::trace!("Dropping malformed link {}: {}", link, e);
                continue;
            }
        };

        match ctx.state.check_submission(&child, &ctx.scope) {
            SubmitDecision::Submit => {
                ctx.frontier.submit(child);
                submitted += 1;
            }
            SubmitDecision::Skip => {}
            SubmitDecision::BudgetReached => {
                tracing::debug!(
                    "Page budget reached, not submitting remaining links from {}",
                    page
                );
                break;
            }
        }
    }

    tracing::debug!("Submitted {} of {} links from {}", submitted, found, page);
}
