//! Read models for the analysis report
//!
//! View-oriented structs holding a denormalized, string-keyed copy of the
//! graph and its metrics, shared by every report formatter.

mod graph_report;
mod graph_report_builder;

pub use graph_report::{
    DeclarationView, EdgeView, FailureView, GraphReport, NodeView, RankingView,
    ReportMetadataView, RunSummaryView,
};
pub use graph_report_builder::{GraphReportBuilder, RANKING_LIMIT};
