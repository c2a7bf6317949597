use crate::application::read_models::GraphReport;
use crate::shared::Result;

/// ReportFormatter port for rendering analysis output
///
/// This port abstracts the formatting logic for the different report
/// formats (JSON, Markdown).
pub trait ReportFormatter {
    /// Formats the graph report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &GraphReport) -> Result<String>;
}
