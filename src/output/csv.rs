//! CSV report: `phase,url,status,error`

use crate::output::traits::{OutputResult, ReportWriter};
use crate::state::PageObservation;
use std::io::Write;

/// Fixed column order of the CSV report
const COLUMNS: [&str; 4] = ["phase", "url", "status", "error"];

/// Writes observations as RFC 4180 CSV
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReport;

impl ReportWriter for CsvReport {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, observations: &[PageObservation], out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "{}", COLUMNS.join(","))?;

        for observation in observations {
            let status = observation
                .status
                .map(|code| code.to_string())
                .unwrap_or_default();
            let row = [
                observation.phase.map(|p| p.as_str()).unwrap_or(""),
                observation.url.as_str(),
                status.as_str(),
                observation.error.as_deref().unwrap_or(""),
            ];

            let line: Vec<String> = row.iter().map(|field| escape_field(field)).collect();
            writeln!(out, "{}", line.join(","))?;
        }

        Ok(())
    }
}

/// Quotes a field when it contains a delimiter, a quote or a line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
