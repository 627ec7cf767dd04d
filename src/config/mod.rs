//! Configuration module for Linkscout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; command-line flags override its values.
//!
//! # Example
//!
//! ```no_run
//! use linkscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkscout.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.num_workers);
//! ```

mod parser;
mod types;
pub mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
