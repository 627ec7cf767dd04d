//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - Classifying transport failures
//! - Retrying failed attempts with exponential backoff
//!
//! The transport is behind the [`Transport`] trait so the retry policy can be
//! exercised without a network.

use crate::config::FetcherConfig;
use crate::{FetchError, FetchFailed, ScoutError};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Response body as text
    pub body: String,
    /// Declared media type (`Content-Type` header value, possibly empty)
    pub content_type: String,
}

impl FetchedPage {
    /// Returns true if the declared media type is markup
    pub fn is_markup(&self) -> bool {
        is_markup(&self.content_type)
    }
}

/// Classifies a media type as markup by substring match on `html`
pub fn is_markup(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}

/// A single-attempt page retrieval
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request; any non-2xx status is an error
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with the configured user agent and per-attempt timeout
///
/// # Example
///
/// ```no_run
/// use linkscout::config::FetcherConfig;
/// use linkscout::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage { body, content_type })
    }
}

/// Maps a `reqwest` error onto the attempt failure taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else if let Some(status) = e.status() {
        FetchError::Status(status.as_u16())
    } else if e.is_body() || e.is_decode() {
        FetchError::Body(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

/// Longest delay slept between two attempts
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retry schedule for failed fetch attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            backoff_factor: config.backoff_factor,
        }
    }

    /// Delays slept before each retry, in order
    ///
    /// Every delay is capped at [`MAX_RETRY_DELAY`], including when the
    /// growth overflows what a `Duration` can hold.
    ///
    /// ```
    /// use linkscout::crawler::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let delays: Vec<_> = RetryPolicy::default().delays().collect();
    /// assert_eq!(delays, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    /// ```
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let factor = self.backoff_factor;
        let first = self.base_delay.min(MAX_RETRY_DELAY);
        std::iter::successors(Some(first), move |d| {
            let next = Duration::try_from_secs_f64(d.as_secs_f64() * factor)
                .map_or(MAX_RETRY_DELAY, |next| next.min(MAX_RETRY_DELAY));
            Some(next)
        })
        .take(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Fetches pages through a [`Transport`], retrying failures per [`RetryPolicy`]
pub struct PageFetcher {
    transport: Box<dyn Transport>,
    policy: RetryPolicy,
}

impl PageFetcher {
    pub fn new(transport: impl Transport + 'static, policy: RetryPolicy) -> Self {
        Self {
            transport: Box::new(transport),
            policy,
        }
    }

    /// Builds an HTTP-backed fetcher from configuration
    pub fn from_config(config: &FetcherConfig) -> Result<Self, ScoutError> {
        Ok(Self::new(
            HttpTransport::new(config)?,
            RetryPolicy::from_config(config),
        ))
    }

    /// Fetches `url`, retrying every failed attempt until the policy is exhausted
    ///
    /// # Retry Logic
    ///
    /// | Attempt fails with | Action |
    /// |--------------------|--------|
    /// | Non-2xx status | Retry after backoff delay |
    /// | Timeout | Retry after backoff delay |
    /// | Connection failure | Retry after backoff delay |
    /// | Body read failure | Retry after backoff delay |
    ///
    /// After the last attempt the final error is returned as [`FetchFailed`].
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchFailed> {
        let mut delays = self.policy.delays();
        let mut attempt = 1;

        loop {
            let error = match self.transport.get(url).await {
                Ok(page) => return Ok(page),
                Err(e) => e,
            };

            match delays.next() {
                Some(delay) => {
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt,
                        self.policy.max_attempts,
                        url,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    return Err(FetchFailed {
                        url: url.to_string(),
                        source: error,
                    });
                }
            }
        }
    }
}
