//! Linkscout main entry point
//!
//! This is the command-line interface for the Linkscout same-site crawler.

use clap::Parser;
use linkscout::config::{load_config, validate, Config};
use linkscout::crawler::crawl;
use linkscout::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkscout: a bounded, concurrent same-site crawler
///
/// Linkscout crawls every page reachable from a start URL on the same host
/// (and its subdomains), following links found in anchors and inline
/// scripts, and lists the JavaScript files it finds along the way.
#[derive(Parser, Debug)]
#[command(name = "crawl")]
#[command(version)]
#[command(about = "A bounded, concurrent same-site crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from; its host defines the crawl scope
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Maximum number of pages to crawl (-1 for unlimited)
    #[arg(long, allow_negative_numbers = true)]
    max_pages: Option<i64>,

    /// Number of concurrent workers
    #[arg(long)]
    num_workers: Option<usize>,

    /// File to save visited URLs and JavaScript links to
    #[arg(long, value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Only follow the start host and its dot-separated subdomains
    #[arg(long)]
    strict_scope: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(num_workers) = self.num_workers {
            config.crawler.num_workers = num_workers;
        }
        if self.strict_scope {
            config.crawler.strict_scope = true;
        }
        if let Some(path) = &self.output_file {
            config.output.output_file = Some(path.display().to_string());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config)?;

    let output_file = config.output.output_file.clone().map(PathBuf::from);

    let report = match crawl(&cli.start_url, config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&report, output_file.as_deref())?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkscout=info,warn"),
            1 => EnvFilter::new("linkscout=debug,info"),
            2 => EnvFilter::new("linkscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["crawl", "https://example.com"]).unwrap();
        assert_eq!(cli.start_url, "https://example.com");
        assert_eq!(cli.max_pages, None);
        assert!(!cli.strict_scope);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.crawler.max_pages, -1);
        assert_eq!(config.crawler.num_workers, 5);
        assert_eq!(config.output.output_file, None);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "crawl",
            "https://example.com",
            "--max-pages",
            "10",
            "--num-workers",
            "3",
            "--output-file",
            "urls.txt",
            "--strict-scope",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.crawler.max_pages, 10);
        assert_eq!(config.crawler.num_workers, 3);
        assert!(config.crawler.strict_scope);
        assert_eq!(config.output.output_file.as_deref(), Some("urls.txt"));
    }

    #[test]
    fn test_cli_negative_max_pages() {
        let cli =
            Cli::try_parse_from(["crawl", "https://example.com", "--max-pages", "-1"]).unwrap();
        assert_eq!(cli.max_pages, Some(-1));
    }

    #[test]
    fn test_cli_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["crawl", "https://example.com", "-v", "-q"]).is_err());
    }
}
