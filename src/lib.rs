//! spm-depgraph - dependency graph analysis for Swift packages hosted on GitHub
//!
//! This library resolves the transitive closure of `Package.swift` manifests
//! starting from a list of seed repositories, archives every fetched
//! manifest, and analyzes the resulting directed graph (roots, leaves,
//! depth, cycles, most depended upon packages).
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_graph`): identifiers, manifests, the graph model and pure services
//! - **Application Layer** (`application`): Use cases, DTOs and report read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): GitHub client, filesystem, console and report formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use spm_depgraph::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! let tokens = GitHubManifestRepository::tokens_from_env(&["GITHUB_TOKEN".to_string()]);
//!
//! let use_case = ResolveDependenciesUseCase::new(
//!     CsvSeedReader::new(),
//!     GitHubManifestRepository::new(tokens)?,
//!     FileSystemManifestArchive::new("all_dependencies_tree"),
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case
//!     .execute(ResolveRequest::new(PathBuf::from("seeds.csv")))
//!     .await?;
//!
//! let report = GraphReportBuilder::build(&response);
//! println!("{}", MarkdownReportFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CsvSeedReader, FileSystemManifestArchive, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonReportFormatter, MarkdownReportFormatter,
    };
    pub use crate::adapters::outbound::network::GitHubManifestRepository;
    pub use crate::application::dto::{
        AnalysisResponse, AnalysisSource, AnalyzeRequest, OutputFormat, ResolveRequest, RunSummary,
    };
    pub use crate::application::read_models::{GraphReport, GraphReportBuilder};
    pub use crate::application::use_cases::{AnalyzeArchiveUseCase, ResolveDependenciesUseCase};
    pub use crate::dependency_graph::domain::{
        DependencyGraph, Edge, GraphStatistics, Identifier, ManifestRecord, ResolutionIssue,
        VersionConstraint,
    };
    pub use crate::dependency_graph::services::{
        GraphAnalyzer, ManifestParser, ResolutionContext, Resolver,
    };
    pub use crate::ports::outbound::{
        FetchedManifest, ManifestArchive, ManifestRepository, OutputPresenter, ProgressReporter,
        ReportFormatter, Seed, SeedReader, StoredManifest,
    };
    pub use crate::shared::Result;
}
