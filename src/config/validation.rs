use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig};
use crate::ConfigError;

/// Upper bound on the worker pool size
const MAX_WORKERS: usize = 256;

/// Upper bound on the retry backoff multiplier
const MAX_BACKOFF_FACTOR: f64 = 10.0;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < -1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be -1 (unlimited) or >= 0, got {}",
            config.max_pages
        )));
    }

    if config.num_workers < 1 || config.num_workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "num_workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.num_workers
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(
            "max_attempts must be >= 1".to_string(),
        ));
    }

    if !(1.0..=MAX_BACKOFF_FACTOR).contains(&config.backoff_factor) {
        return Err(ConfigError::Validation(format!(
            "backoff_factor must be between 1.0 and {}, got {}",
            MAX_BACKOFF_FACTOR, config.backoff_factor
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.output_file {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "output_file cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
