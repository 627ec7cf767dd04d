//! Output module for presenting crawl results
//!
//! This module handles:
//! - The `CrawlReport` produced at the end of a run
//! - Writing the report to a file
//! - Printing the summary to stdout

mod report;

pub use report::{CrawlReport, SCRIPT_SECTION_HEADER};

use std::io::{self, Write};
use std::path::Path;

/// Prints the end-of-run summary to stdout
///
/// When `output_file` is given the report is saved there and only the counts
/// are printed; otherwise the visited URLs are listed. Script resources are
/// listed in both cases.
pub fn print_summary(report: &CrawlReport, output_file: Option<&Path>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, report, output_file)
}

/// Writes the end-of-run summary to `out`, saving the report file if requested
pub fn write_summary<W: Write>(
    out: &mut W,
    report: &CrawlReport,
    output_file: Option<&Path>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Crawled {} pages.", report.crawled_count)?;

    match output_file {
        Some(path) => {
            report.save(path)?;
            writeln!(
                out,
                "Saved {} URLs to {}",
                report.visited_urls.len(),
                path.display()
            )?;
            writeln!(
                out,
                "Saved {} JavaScript files to {}",
                report.script_resources.len(),
                path.display()
            )?;
        }
        None => {
            writeln!(out, "All found URLs:")?;
            for url in &report.visited_urls {
                writeln!(out, "{}", url)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Found JavaScript files:")?;
    for url in &report.script_resources {
        writeln!(out, "{}", url)?;
    }

    Ok(())
}
