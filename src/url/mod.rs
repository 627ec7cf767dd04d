//! URL handling module for Linkscout
//!
//! This module provides link canonicalization and the host scope rule that
//! decides which discovered links belong to the crawl.

mod canonical;
mod scope;

// Re-export main types and functions
pub use canonical::{canonicalize, CanonicalUrl};
pub use scope::Scope;
