use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Path suffix that marks a URL as a script resource
const SCRIPT_SUFFIX: &str = ".js";

/// A crawl target in canonical form: `scheme://host[:port]/path`
///
/// Query string, fragment and credentials are always absent, so two links
/// name the same target exactly when their canonical forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// Canonicalizes an absolute URL string
    pub fn parse(absolute: &str) -> UrlResult<Self> {
        let url = Url::parse(absolute.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::reduce(url)
    }

    fn reduce(mut url: Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost);
        }

        url.set_query(None);
        url.set_fragment(None);
        // Cannot fail for http(s) URLs that have a host
        let _ = url.set_username("");
        let _ = url.set_password(None);

        Ok(Self(url))
    }

    /// Returns the canonical string form
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the lowercase host
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Returns the URL path
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Returns true if the path names a script file (`.js` suffix)
    pub fn is_script_resource(&self) -> bool {
        self.0.path().ends_with(SCRIPT_SUFFIX)
    }

    /// Borrows the underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Resolves a discovered link against the page it was found on and reduces
/// it to canonical form
///
/// # Canonicalization Steps
///
/// 1. Resolve `link` against `base` (absolute links are kept as-is)
/// 2. Reject anything that is not `http` or `https`
/// 3. Reject URLs without a host
/// 4. Drop query string, fragment and credentials
///
/// Rejected links are reported as `Err(UrlError)`; callers treat them as
/// malformed and drop them. The same input always yields the same result.
///
/// # Examples
///
/// ```
/// use linkscout::url::canonicalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// let url = canonicalize("../about?lang=en#team", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
///
/// assert!(canonicalize("mailto:someone@example.com", &base).is_err());
/// ```
pub fn canonicalize(link: &str, base: &Url) -> UrlResult<CanonicalUrl> {
    let resolved = base
        .join(link.trim())
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    CanonicalUrl::reduce(resolved)
}
