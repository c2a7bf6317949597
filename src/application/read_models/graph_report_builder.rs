//! Builds the [`GraphReport`] read model from an analysis response

use super::graph_report::{
    DeclarationView, EdgeView, FailureView, GraphReport, NodeView, RankingView,
    ReportMetadataView, RunSummaryView,
};
use crate::application::dto::{AnalysisResponse, RunSummary};
use crate::dependency_graph::domain::{DependencyGraph, Identifier, ResolutionIssue};
use crate::dependency_graph::services::GraphAnalyzer;
use std::collections::{BTreeMap, HashSet};

/// Number of entries in each ranking table
pub const RANKING_LIMIT: usize = 10;

const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = "Swift Package Manager dependency graph";

pub struct GraphReportBuilder;

impl GraphReportBuilder {
    /// Builds a report stamped with the current time and a fresh run id
    pub fn build(response: &AnalysisResponse) -> GraphReport {
        Self::build_with_metadata(response, Self::generate_metadata(response))
    }

    /// Builds a report with caller-supplied metadata
    pub fn build_with_metadata(
        response: &AnalysisResponse,
        metadata: ReportMetadataView,
    ) -> GraphReport {
        let graph = &response.graph;

        GraphReport {
            metadata,
            statistics: response.statistics.clone(),
            seeds: response.seeds.iter().map(ToString::to_string).collect(),
            nodes: Self::build_nodes(response),
            edges: Self::build_edges(graph),
            adjacency: Self::adjacency_view(graph.adjacency()),
            reverse_adjacency: Self::adjacency_view(graph.reverse_adjacency()),
            most_depended_upon: Self::ranking_view(GraphAnalyzer::most_depended_upon(
                graph,
                RANKING_LIMIT,
            )),
            most_dependencies: Self::ranking_view(GraphAnalyzer::most_dependencies(
                graph,
                RANKING_LIMIT,
            )),
            failed: Self::build_failures(&response.issues),
            unresolvable_locators: response
                .unresolvable_locators()
                .into_iter()
                .map(String::from)
                .collect(),
            run: response.run.as_ref().map(Self::run_summary_view),
        }
    }

    fn run_summary_view(run: &RunSummary) -> RunSummaryView {
        RunSummaryView {
            total_seeds: run.seed_count,
            successful_downloads: run.successful_downloads,
            failed_downloads: run.failed_downloads,
            success_rate: run.success_rate(),
            total_dependencies_found: run.dependencies_found,
            unique_repositories_processed: run.processed.len(),
            started_at: run.started_at.to_rfc3339(),
            finished_at: run.finished_at.to_rfc3339(),
            processing_time_seconds: run.elapsed.as_secs_f64(),
            processing_time_minutes: run.elapsed_minutes(),
            processed_repositories: run.processed.iter().map(ToString::to_string).collect(),
        }
    }

    fn generate_metadata(response: &AnalysisResponse) -> ReportMetadataView {
        ReportMetadataView {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_name: TOOL_NAME.to_string(),
            tool_version: TOOL_VERSION.to_string(),
            run_id: uuid::Uuid::new_v4().to_string(),
            description: DESCRIPTION.to_string(),
            mode: response.source.mode().to_string(),
            base_directory: response.source.path().display().to_string(),
        }
    }

    fn build_nodes(response: &AnalysisResponse) -> Vec<NodeView> {
        response
            .graph
            .node_infos()
            .into_iter()
            .map(|info| {
                let declarations = response
                    .manifests
                    .get(&info.id)
                    .map(|record| {
                        record
                            .declarations
                            .iter()
                            .map(|decl| DeclarationView {
                                locator: decl.locator.clone(),
                                target: Identifier::from_locator(&decl.locator)
                                    .map(|id| id.to_string()),
                                constraint: decl.constraint.to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                NodeView {
                    id: info.id.to_string(),
                    package_name: info.package_name,
                    has_manifest: info.has_manifest,
                    dependencies_count: info.dependencies_count,
                    dependents_count: info.dependents_count,
                    is_root: info.is_root,
                    is_leaf: info.is_leaf,
                    declarations,
                }
            })
            .collect()
    }

    fn build_edges(graph: &DependencyGraph) -> Vec<EdgeView> {
        graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| EdgeView {
                id: i,
                source: edge.source.to_string(),
                target: edge.target.to_string(),
            })
            .collect()
    }

    fn adjacency_view(
        adjacency: &BTreeMap<Identifier, Vec<Identifier>>,
    ) -> BTreeMap<String, Vec<String>> {
        adjacency
            .iter()
            .map(|(id, neighbors)| {
                (
                    id.to_string(),
                    neighbors.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    fn ranking_view(ranking: Vec<(Identifier, usize)>) -> Vec<RankingView> {
        ranking
            .into_iter()
            .map(|(id, count)| RankingView {
                id: id.to_string(),
                count,
            })
            .collect()
    }

    /// One entry per failed identifier, first recorded reason wins
    fn build_failures(issues: &[ResolutionIssue]) -> Vec<FailureView> {
        let mut seen = HashSet::new();
        let mut failures: Vec<FailureView> = issues
            .iter()
            .filter_map(|issue| {
                let id = issue.identifier()?;
                if !seen.insert(id) {
                    return None;
                }
                let reason = match issue {
                    ResolutionIssue::ManifestNotFound { .. } => "manifest not found".to_string(),
                    ResolutionIssue::ManifestUnreadable { .. } => {
                        "manifest is not valid UTF-8".to_string()
                    }
                    ResolutionIssue::FetchFailed { reason, .. } => reason.clone(),
                    ResolutionIssue::UnresolvableLocator { .. } => return None,
                };
                Some(FailureView {
                    id: id.to_string(),
                    reason,
                })
            })
            .collect();
        failures.sort_by(|a, b| a.id.cmp(&b.id));
        failures
    }
}
