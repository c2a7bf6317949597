use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory selecting the report formatter adapter for an output format
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use spm_depgraph::application::dto::OutputFormat;
    /// use spm_depgraph::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonReportFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownReportFormatter::new()),
        }
    }

    /// Progress line shown before formatting
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON graph report...",
            OutputFormat::Markdown => "📝 Generating Markdown summary report...",
        }
    }

    /// File name used when the report is written next to the archive
    pub fn default_file_name(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "dependency_graph_analysis.json",
            OutputFormat::Markdown => "graph_analysis_report.md",
        }
    }
}
