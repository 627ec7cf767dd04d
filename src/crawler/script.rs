//! Heuristic URL discovery inside inline script text
//!
//! No JavaScript is executed. Each [`ScriptMatcher`] scans raw script text
//! for one call convention or literal shape and reports the URL-like strings
//! it finds. Matchers are independent, so new heuristics can be added
//! without touching dedup or scope logic.

use regex::Regex;
use std::sync::LazyLock;

/// First string-literal argument of `fetch(...)`
static FETCH_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfetch\s*\(\s*['"`]([^'"`]+)['"`]"#).expect("fetch pattern is valid")
});

/// First string-literal argument of `axios.get(...)`
static AXIOS_GET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\baxios\.get\s*\(\s*['"`]([^'"`]+)['"`]"#).expect("axios pattern is valid")
});

/// Any quoted literal that is an absolute http(s) URL or starts with `/`
static QUOTED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"`](https?://[^'"`]+|/[^'"`]+)['"`]"#).expect("quoted URL pattern is valid")
});

/// A single heuristic for finding URLs in script text
pub trait ScriptMatcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Returns every URL-like string found in `script`, unresolved
    fn find<'a>(&self, script: &'a str) -> Vec<&'a str>;
}

/// A matcher driven by a regex whose first capture group is the URL
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    name: String,
    pattern: Regex,
}

impl RegexMatcher {
    pub fn new(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// Compiles `pattern` into a matcher
    pub fn from_pattern(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(name, Regex::new(pattern)?))
    }

    pub fn fetch_call() -> Self {
        Self::new("fetch-call", FETCH_CALL.clone())
    }

    pub fn axios_get() -> Self {
        Self::new("axios-get", AXIOS_GET.clone())
    }

    pub fn quoted_url() -> Self {
        Self::new("quoted-url", QUOTED_URL.clone())
    }
}

impl ScriptMatcher for RegexMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find<'a>(&self, script: &'a str) -> Vec<&'a str> {
        self.pattern
            .captures_iter(script)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

/// The built-in matchers: `fetch(...)`, `axios.get(...)` and quoted URLs
pub fn default_matchers() -> Vec<Box<dyn ScriptMatcher>> {
    vec![
        Box::new(RegexMatcher::fetch_call()),
        Box::new(RegexMatcher::axios_get()),
        Box::new(RegexMatcher::quoted_url()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_call() {
        let matcher = RegexMatcher::fetch_call();
        assert_eq!(matcher.find(r#"fetch("/api/data")"#), vec!["/api/data"]);
        assert_eq!(matcher.find("fetch ( '/api/x', { method: 'POST' })"), vec!["/api/x"]);
        assert_eq!(matcher.find("window.fetch(`api/items`)"), vec!["api/items"]);
    }

    #[test]
    fn test_fetch_call_ignores_other_identifiers() {
        let matcher = RegexMatcher::fetch_call();
        assert!(matcher.find(r#"prefetch("/warm")"#).is_empty());
        assert!(matcher.find("fetch(url)").is_empty());
    }

    #[test]
    fn test_axios_get() {
        let matcher = RegexMatcher::axios_get();
        assert_eq!(
            matcher.find(r#"axios.get('users/1').then(r => r.data)"#),
            vec!["users/1"]
        );
        assert!(matcher.find(r#"axios.post("/users")"#).is_empty());
    }

    #[test]
    fn test_quoted_url() {
        let matcher = RegexMatcher::quoted_url();
        let script = r#"
            const api = "https://api.example.com/v1";
            const page = '/dashboard';
            const name = "not a url";
            const rel = "relative/path";
        "#;
        assert_eq!(
            matcher.find(script),
            vec!["https://api.example.com/v1", "/dashboard"]
        );
    }

    #[test]
    fn test_quoted_url_adjacent_literals() {
        let matcher = RegexMatcher::quoted_url();
        assert_eq!(matcher.find(r#"["/a","/b"]"#), vec!["/a", "/b"]);
    }

    #[test]
    fn test_custom_matcher() {
        let matcher = RegexMatcher::from_pattern("jquery-get", r#"\$\.get\(\s*['"]([^'"]+)['"]"#)
            .unwrap();
        assert_eq!(matcher.name(), "jquery-get");
        assert_eq!(matcher.find(r#"$.get("/legacy")"#), vec!["/legacy"]);
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(RegexMatcher::from_pattern("broken", "(unclosed").is_err());
    }

    #[test]
    fn test_default_matchers() {
        let names: Vec<_> = default_matchers()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["fetch-call", "axios-get", "quoted-url"]);
    }
}
