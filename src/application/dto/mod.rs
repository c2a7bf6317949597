/// Data Transfer Objects for application layer
///
/// DTOs carry requests into the use cases and results back out to the
/// report builder, keeping the domain layer isolated from the CLI.
mod analysis_response;
mod analyze_request;
mod output_format;
mod resolve_request;
mod run_summary;

pub use analysis_response::{AnalysisResponse, AnalysisSource};
pub use analyze_request::AnalyzeRequest;
pub use output_format::OutputFormat;
pub use resolve_request::ResolveRequest;
pub use run_summary::RunSummary;
