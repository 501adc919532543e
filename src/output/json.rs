//! JSON report: a pretty-printed array of observations

use crate::output::traits::{OutputResult, ReportWriter};
use crate::state::PageObservation;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportWriter for JsonReport {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, observations: &[PageObservation], out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, observations)?;
        writeln!(out)?;
        Ok(())
    }
}
