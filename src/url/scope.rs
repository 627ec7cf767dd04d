use crate::url::CanonicalUrl;
use crate::{UrlError, UrlResult};
use url::Url;

/// Host matching rule for deciding which discovered links may be crawled
///
/// The default rule is a plain suffix match against the base host. It
/// admits subdomains (`api.example.com` for `example.com`) but also any host
/// that merely ends with the same characters (`evil-example.com`). The
/// strict rule additionally requires a `.` boundary before the base host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    base_host: String,
    strict: bool,
}

impl Scope {
    /// Creates a suffix-matching scope for `base_host`
    pub fn new(base_host: impl Into<String>) -> Self {
        Self {
            base_host: base_host.into().to_lowercase(),
            strict: false,
        }
    }

    /// Creates a scope that only admits the base host and dot-separated subdomains
    pub fn strict(base_host: impl Into<String>) -> Self {
        Self {
            strict: true,
            ..Self::new(base_host)
        }
    }

    /// Derives the scope from the crawl's start URL
    ///
    /// # Examples
    ///
    /// ```
    /// use linkscout::url::Scope;
    /// use url::Url;
    ///
    /// let start = Url::parse("https://Example.COM:8443/index.html").unwrap();
    /// let scope = Scope::from_start_url(&start, false).unwrap();
    /// assert_eq!(scope.base_host(), "example.com");
    /// assert!(scope.contains_host("blog.example.com"));
    /// ```
    pub fn from_start_url(start: &Url, strict: bool) -> UrlResult<Self> {
        let host = start
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(UrlError::MissingHost)?;

        Ok(if strict {
            Self::strict(host)
        } else {
            Self::new(host)
        })
    }

    /// Returns the lowercase base host
    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    /// Returns true if the strict dot-boundary rule is in effect
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Checks a host against the scope rule
    pub fn contains_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();

        if !self.strict {
            return host.ends_with(&self.base_host);
        }

        host == self.base_host
            || host
                .strip_suffix(&self.base_host)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Checks a canonical URL's host against the scope rule
    pub fn contains(&self, url: &CanonicalUrl) -> bool {
        self.contains_host(url.host())
    }
}
