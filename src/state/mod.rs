//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the lock-guarded visited set, script-resource set and crawled counter
//! - `PageBudget`: the page limit for a run
//! - `Admission` / `SubmitDecision`: outcomes of the dedup, scope and budget checks

mod budget;
mod crawl_state;

// Re-export main types
pub use budget::PageBudget;
pub use crawl_state::{Admission, CrawlState, SubmitDecision};
