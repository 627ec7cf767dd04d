//! Shared accounting for a single crawl run
//!
//! All dedup and budget decisions are made inside one mutex so that a
//! check and the write that depends on it can never interleave with another
//! worker's. The lock is never held across network I/O.

use crate::output::CrawlReport;
use crate::state::PageBudget;
use crate::url::{CanonicalUrl, Scope};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Outcome of trying to admit a dequeued URL for crawling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// URL was marked visited; `crawled` is the new crawled-page count
    Admitted { crawled: usize },
    /// URL is already visited or already recorded as a script resource
    AlreadySeen,
    /// The page budget is used up
    BudgetExhausted,
    /// URL host is outside the crawl scope
    OutOfScope,
    /// URL names a script file and was recorded instead of crawled
    ScriptResource,
}

/// Whether a discovered child link should go onto the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Submit,
    Skip,
    /// Stop submitting children of the current page
    BudgetReached,
}

#[derive(Debug, Default)]
struct Ledger {
    visited: HashSet<CanonicalUrl>,
    script_resources: HashSet<CanonicalUrl>,
    crawled_count: usize,
}

/// The single shared mutable record of a crawl run
#[derive(Debug)]
pub struct CrawlState {
    ledger: Mutex<Ledger>,
    budget: PageBudget,
}

impl CrawlState {
    pub fn new(budget: PageBudget) -> Self {
        Self {
            ledger: Mutex::new(Ledger::default()),
            budget,
        }
    }

    pub fn budget(&self) -> PageBudget {
        self.budget
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        // Critical sections never panic mid-update, so a poisoned ledger is still consistent
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Classifies a dequeued URL and admits it if eligible
    ///
    /// Checks run in this order: already seen, budget, scope, script
    /// suffix. The budget check and the visited/counter update happen in the
    /// same critical section, so the crawled count never exceeds the budget.
    pub fn admit(&self, url: &CanonicalUrl, scope: &Scope) -> Admission {
        let mut ledger = self.lock();

        if ledger.visited.contains(url) || ledger.script_resources.contains(url) {
            return Admission::AlreadySeen;
        }

        if self.budget.is_exhausted(ledger.crawled_count) {
            return Admission::BudgetExhausted;
        }

        if !scope.contains(url) {
            return Admission::OutOfScope;
        }

        if url.is_script_resource() {
            ledger.script_resources.insert(url.clone());
            return Admission::ScriptResource;
        }

        ledger.visited.insert(url.clone());
        ledger.crawled_count += 1;

        Admission::Admitted {
            crawled: ledger.crawled_count,
        }
    }

    /// Decides whether a discovered link should be submitted to the frontier
    pub fn check_submission(&self, url: &CanonicalUrl, scope: &Scope) -> SubmitDecision {
        let ledger = self.lock();

        if ledger.visited.contains(url)
            || ledger.script_resources.contains(url)
            || !scope.contains(url)
        {
            return SubmitDecision::Skip;
        }

        if self.budget.is_exhausted(ledger.crawled_count) {
            return SubmitDecision::BudgetReached;
        }

        SubmitDecision::Submit
    }

    /// Returns the number of admitted pages
    pub fn crawled_count(&self) -> usize {
        self.lock().crawled_count
    }

    /// Returns true if `url` has been admitted
    pub fn is_visited(&self, url: &CanonicalUrl) -> bool {
        self.lock().visited.contains(url)
    }

    /// Builds the sorted crawl report from the current state
    pub fn report(&self) -> CrawlReport {
        let ledger = self.lock();

        let mut visited_urls: Vec<String> =
            ledger.visited.iter().map(|u| u.to_string()).collect();
        visited_urls.sort();

        let mut script_resources: Vec<String> = ledger
            .script_resources
            .iter()
            .map(|u| u.to_string())
            .collect();
        script_resources.sort();

        CrawlReport {
            visited_urls,
            script_resources,
            crawled_count: ledger.crawled_count,
            page_budget: self.budget,
        }
    }
}
