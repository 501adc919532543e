//! Report writer trait and error types

use crate::state::PageObservation;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes a sequence of observations into one report format
///
/// Writers are stateless; the same writer can render any number of
/// observation lists.
pub trait ReportWriter {
    /// File extension of the produced report (without the dot)
    fn extension(&self) -> &'static str;

    /// Writes the report for `observations` to `out`
    fn write(&self, observations: &[PageObservation], out: &mut dyn Write) -> OutputResult<()>;

    /// Renders the report into a string
    fn render(&self, observations: &[PageObservation]) -> OutputResult<String> {
        let mut buffer = Vec::new();
        self.write(observations, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| OutputError::Format(e.to_string()))
    }
}
