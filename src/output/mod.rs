//! Output module for sweep reports
//!
//! This module handles:
//! - Summary statistics over the observation list
//! - Rendering observations as CSV, JSON and HTML
//! - Writing the configured formats to timestamped files

mod csv;
mod html;
mod json;
pub mod stats;
mod traits;

pub use csv::CsvReport;
pub use html::HtmlReport;
pub use json::JsonReport;
pub use stats::{print_summary, ReportSummary};
pub use traits::{OutputError, OutputResult, ReportWriter};

use crate::config::ReportFormat;
use crate::state::PageObservation;
use chrono::{DateTime, Local};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Returns the writer for a report format
pub fn writer_for(format: ReportFormat) -> Box<dyn ReportWriter> {
    match format {
        ReportFormat::Csv => Box::new(CsvReport),
        ReportFormat::Json => Box::new(JsonReport),
        ReportFormat::Html => Box::new(HtmlReport),
    }
}

/// Builds `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn report_file_name(prefix: &str, timestamp: &DateTime<Local>, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Writes one report per format into `dir`
///
/// The directory is created if missing. All files of one call share the
/// same timestamp. Duplicate formats are written once.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written reports, in format order
/// * `Err(OutputError)` - A file could not be created or written
pub fn write_reports(
    dir: &Path,
    prefix: &str,
    formats: &[ReportFormat],
    observations: &[PageObservation],
) -> OutputResult<Vec<PathBuf>> {
    write_reports_at(dir, prefix, formats, observations, &Local::now())
}

/// Same as [`write_reports`] with an explicit timestamp
pub fn write_reports_at(
    dir: &Path,
    prefix: &str,
    formats: &[ReportFormat],
    observations: &[PageObservation],
    timestamp: &DateTime<Local>,
) -> OutputResult<Vec<PathBuf>> {
    if prefix.is_empty() {
        return Err(OutputError::Format("report prefix is empty".to_string()));
    }

    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    let mut seen = Vec::new();

    for &format in formats {
        if seen.contains(&format) {
            continue;
        }
        seen.push(format);

        let writer = writer_for(format);
        let path = dir.join(report_file_name(prefix, timestamp, writer.extension()));

        let file = fs::File::create(&path)?;
        let mut out = BufWriter::new(file);
        writer.write(observations, &mut out)?;
        out.flush()?;

        tracing::info!(
            "Wrote {} report ({} entries) to {}",
            writer.extension(),
            observations.len(),
            path.display()
        );
        written.push(path);
    }

    Ok(written)
}
