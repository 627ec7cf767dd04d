use std::fmt;

/// Maximum number of pages a crawl may admit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageBudget {
    /// No limit; the crawl ends when the frontier drains
    #[default]
    Unlimited,
    /// At most this many pages are admitted
    Limited(usize),
}

impl PageBudget {
    /// Command-line and config value meaning "no limit"
    pub const UNLIMITED_SENTINEL: i64 = -1;

    /// Converts a `--max-pages` style value; any negative value is unlimited
    pub fn from_sentinel(value: i64) -> Self {
        usize::try_from(value).map_or(Self::Unlimited, Self::Limited)
    }

    /// Returns true once `crawled` pages use up the budget
    pub fn is_exhausted(&self, crawled: usize) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Limited(max) => crawled >= *max,
        }
    }

    /// Returns the limit, if any
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Unlimited => None,
            Self::Limited(max) => Some(*max),
        }
    }
}

impl fmt::Display for PageBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Limited(max) => write!(f, "{}", max),
        }
    }
}
