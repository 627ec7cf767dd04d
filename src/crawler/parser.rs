//! HTML link extraction
//!
//! This module turns a fetched document into the set of links it references:
//! - `href` of every anchor (`<a>`, `<area>`)
//! - `src` of every `<script>` that has one
//! - URL-like strings inside inline `<script>` bodies, via [`ScriptMatcher`]s
//!
//! Links come back resolved against the page URL but not canonicalized;
//! canonicalization happens when they are submitted to the frontier.

use crate::crawler::fetcher::is_markup;
use crate::crawler::script::{default_matchers, ScriptMatcher};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracts candidate links from documents and script text
pub struct LinkExtractor {
    matchers: Vec<Box<dyn ScriptMatcher>>,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::with_matchers(default_matchers())
    }
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with a custom set of script matchers
    pub fn with_matchers(matchers: Vec<Box<dyn ScriptMatcher>>) -> Self {
        Self { matchers }
    }

    /// Appends another script matcher
    pub fn add_matcher(&mut self, matcher: impl ScriptMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    /// Extracts links from a fetched document
    ///
    /// Non-markup content yields no links.
    ///
    /// # Example
    ///
    /// ```
    /// use linkscout::crawler::LinkExtractor;
    /// use url::Url;
    ///
    /// let html = r#"<a href="/a">A</a><script>fetch("/api/data")</script>"#;
    /// let base = Url::parse("https://site.example.com/page").unwrap();
    /// let links = LinkExtractor::new().extract(html, "text/html", &base);
    /// assert!(links.contains("https://site.example.com/a"));
    /// assert!(links.contains("https://site.example.com/api/data"));
    /// ```
    pub fn extract(&self, body: &str, content_type: &str, base_url: &Url) -> BTreeSet<String> {
        if !is_markup(content_type) {
            return BTreeSet::new();
        }
        self.extract_from_html(body, base_url)
    }

    /// Extracts links from an HTML document
    pub fn extract_from_html(&self, html: &str, base_url: &Url) -> BTreeSet<String> {
        let document = Html::parse_document(html);
        let mut links = BTreeSet::new();

        // Anchors
        if let Ok(anchor_selector) = Selector::parse("a[href], area[href]") {
            for element in document.select(&anchor_selector) {
                if let Some(href) = element.value().attr("href") {
                    links.extend(resolve_link(href, base_url));
                }
            }
        }

        // Scripts: external sources and inline bodies
        if let Ok(script_selector) = Selector::parse("script") {
            for element in document.select(&script_selector) {
                match element.value().attr("src") {
                    Some(src) => links.extend(resolve_link(src, base_url)),
                    None => {
                        let text: String = element.text().collect();
                        if !text.trim().is_empty() {
                            links.extend(self.extract_from_script(&text, base_url));
                        }
                    }
                }
            }
        }

        links
    }

    /// Applies every script matcher to `script` and resolves the matches
    pub fn extract_from_script(&self, script: &str, base_url: &Url) -> BTreeSet<String> {
        let mut links = BTreeSet::new();

        for matcher in &self.matchers {
            for found in matcher.find(script) {
                match resolve_link(found, base_url) {
                    Some(link) => {
                        links.insert(link);
                    }
                    None => tracing::trace!("{} match {:?} did not resolve", matcher.name(), found),
                }
            }
        }

        links
    }
}

/// Resolves a link against the page URL
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only references
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that fails to resolve or is not HTTP(S) afterwards
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    matches!(absolute_url.scheme(), "http" | "https").then(|| absolute_url.to_string())
}
