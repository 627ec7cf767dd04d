//! Final crawl report and its text format

use crate::state::PageBudget;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header line separating visited pages from script resources
pub const SCRIPT_SECTION_HEADER: &str = "JavaScript links:";

/// Final tallies of a crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Canonical URLs of all admitted pages, sorted
    pub visited_urls: Vec<String>,

    /// Canonical URLs classified as script resources, sorted
    pub script_resources: Vec<String>,

    /// Number of pages admitted for crawling
    pub crawled_count: usize,

    /// The budget the run was started with
    pub page_budget: PageBudget,
}

impl CrawlReport {
    /// Writes the report in its file format
    ///
    /// ```text
    /// https://example.com/
    /// https://example.com/about
    ///
    /// JavaScript links:
    /// https://example.com/app.js
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for url in &self.visited_urls {
            writeln!(writer, "{}", url)?;
        }

        writeln!(writer)?;
        writeln!(writer, "{}", SCRIPT_SECTION_HEADER)?;
        for url in &self.script_resources {
            writeln!(writer, "{}", url)?;
        }

        Ok(())
    }

    /// Writes the report to a file, replacing any existing content
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}
