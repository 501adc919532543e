//! HTML report with a summary table and color-coded statuses

use crate::output::stats::ReportSummary;
use crate::output::traits::{OutputResult, ReportWriter};
use crate::state::PageObservation;
use html_escape::encode_text;
use std::io::Write;

const TITLE: &str = "Full Broken Link Check";

/// Writes observations as a standalone HTML page
///
/// 2xx statuses are green, everything else (including navigation errors,
/// shown as "Error") is red.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReport;

impl ReportWriter for HtmlReport {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn write(&self, observations: &[PageObservation], out: &mut dyn Write) -> OutputResult<()> {
        let summary = ReportSummary::from_observations(observations);

        writeln!(
            out,
            "<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>",
            TITLE
        )?;
        writeln!(out, "<h1>{}</h1>", TITLE)?;

        writeln!(out, "<h2>Summary</h2>")?;
        writeln!(out, "<table border='1' cellpadding='5' cellspacing='0'>")?;
        writeln!(
            out,
            "<tr><th>Total Links</th><th>Broken Links</th><th>% Broken</th></tr>"
        )?;
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{:.2}%</td></tr>",
            summary.total,
            summary.broken,
            summary.percent_broken()
        )?;
        writeln!(out, "</table>")?;

        writeln!(out, "<h2>Detailed Results</h2>")?;
        writeln!(out, "<ul>")?;
        for observation in observations {
            let phase = observation.phase.map(|p| p.as_str()).unwrap_or("-");
            writeln!(
                out,
                "<li>[{}] {} → {}</li>",
                phase,
                encode_text(&observation.url),
                status_span(observation)
            )?;
        }
        writeln!(out, "</ul>")?;
        writeln!(out, "</body></html>")?;

        Ok(())
    }
}

fn status_span(observation: &PageObservation) -> String {
    let color = if observation.is_ok() { "green" } else { "red" };
    let text = match (observation.status, &observation.error) {
        (Some(code), _) => code.to_string(),
        (None, Some(error)) => format!("Error: {}", encode_text(error)),
        (None, None) => "Error".to_string(),
    };
    format!("<span style='color:{}'>{}</span>", color, text)
}
