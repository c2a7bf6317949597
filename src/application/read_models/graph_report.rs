//! Graph report read model

use crate::dependency_graph::domain::GraphStatistics;
use std::collections::BTreeMap;

/// Complete report data for one run
#[derive(Debug, Clone)]
pub struct GraphReport {
    pub metadata: ReportMetadataView,
    pub statistics: GraphStatistics,
    /// Seeds in seed-list order
    pub seeds: Vec<String>,
    /// Every node, sorted by identifier
    pub nodes: Vec<NodeView>,
    /// Every edge in discovery order, numbered from 0
    pub edges: Vec<EdgeView>,
    pub adjacency: BTreeMap<String, Vec<String>>,
    pub reverse_adjacency: BTreeMap<String, Vec<String>>,
    pub most_depended_upon: Vec<RankingView>,
    pub most_dependencies: Vec<RankingView>,
    pub failed: Vec<FailureView>,
    pub unresolvable_locators: Vec<String>,
    /// Download totals of a resolve run; absent for offline analysis
    pub run: Option<RunSummaryView>,
}

impl GraphReport {
    pub fn roots(&self) -> impl Iterator<Item = &NodeView> {
        self.nodes.iter().filter(|n| n.is_root)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &NodeView> {
        self.nodes.iter().filter(|n| n.is_leaf)
    }
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadataView {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub tool_name: String,
    pub tool_version: String,
    /// Unique id of this run
    pub run_id: String,
    pub description: String,
    /// "resolve" or "analyze"
    pub mode: String,
    /// Seed table or archive directory the graph was built from
    pub base_directory: String,
}

/// Download totals and timing of a resolve run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummaryView {
    pub total_seeds: usize,
    pub successful_downloads: usize,
    pub failed_downloads: usize,
    /// Percentage, 0 to 100
    pub success_rate: f64,
    pub total_dependencies_found: usize,
    pub unique_repositories_processed: usize,
    /// RFC 3339 timestamps
    pub started_at: String,
    pub finished_at: String,
    pub processing_time_seconds: f64,
    pub processing_time_minutes: f64,
    /// Sorted identifiers whose manifest was downloaded
    pub processed_repositories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub id: String,
    pub package_name: Option<String>,
    pub has_manifest: bool,
    pub dependencies_count: usize,
    pub dependents_count: usize,
    pub is_root: bool,
    pub is_leaf: bool,
    /// Declared dependencies with their version constraints
    pub declarations: Vec<DeclarationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationView {
    pub locator: String,
    /// Normalized target, when the locator yields one
    pub target: Option<String>,
    /// Human-readable constraint, e.g. `from 1.0.0`
    pub constraint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeView {
    pub id: usize,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    pub id: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureView {
    pub id: String,
    pub reason: String,
}
