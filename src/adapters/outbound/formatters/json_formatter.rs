use crate::application::read_models::{
    EdgeView, FailureView, GraphReport, NodeView, ReportMetadataView, RunSummaryView,
};
use crate::dependency_graph::domain::GraphStatistics;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    metadata: Metadata<'a>,
    statistics: &'a GraphStatistics,
    seeds: &'a [String],
    nodes: Vec<Node<'a>>,
    edges: Vec<Edge<'a>>,
    adjacency_list: &'a BTreeMap<String, Vec<String>>,
    reverse_adjacency_list: &'a BTreeMap<String, Vec<String>>,
    failed: Vec<Failure<'a>>,
    #[serde(skip_serializing_if = "is_empty")]
    unresolvable_locators: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    run_statistics: Option<RunStatistics<'a>>,
}

fn is_empty(items: &&[String]) -> bool {
    items.is_empty()
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    generated_at: &'a str,
    tool_name: &'a str,
    tool_version: &'a str,
    run_id: &'a str,
    description: &'a str,
    mode: &'a str,
    base_directory: &'a str,
}

#[derive(Debug, Serialize)]
struct Node<'a> {
    id: &'a str,
    package_name: Option<&'a str>,
    has_package_swift: bool,
    dependencies_count: usize,
    dependents_count: usize,
    is_root: bool,
    is_leaf: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    declarations: Vec<Declaration<'a>>,
}

#[derive(Debug, Serialize)]
struct Declaration<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct Edge<'a> {
    id: usize,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Serialize)]
struct RunStatistics<'a> {
    total_repositories_in_csv: usize,
    successful_downloads: usize,
    failed_downloads: usize,
    success_rate: f64,
    total_dependencies_found: usize,
    unique_repositories_processed: usize,
    start_time: &'a str,
    end_time: &'a str,
    processing_time_seconds: f64,
    processed_repositories: &'a [String],
}

#[derive(Debug, Serialize)]
struct Failure<'a> {
    id: &'a str,
    reason: &'a str,
}

/// JsonReportFormatter adapter writing the full graph as pretty-printed JSON
///
/// The document keeps the node/edge/adjacency shape expected by graph
/// visualization tools. Nodes and adjacency keys are sorted by identifier.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_metadata(metadata: &ReportMetadataView) -> Metadata<'_> {
        Metadata {
            generated_at: &metadata.generated_at,
            tool_name: &metadata.tool_name,
            tool_version: &metadata.tool_version,
            run_id: &metadata.run_id,
            description: &metadata.description,
            mode: &metadata.mode,
            base_directory: &metadata.base_directory,
        }
    }

    fn build_node(node: &NodeView) -> Node<'_> {
        Node {
            id: &node.id,
            package_name: node.package_name.as_deref(),
            has_package_swift: node.has_manifest,
            dependencies_count: node.dependencies_count,
            dependents_count: node.dependents_count,
            is_root: node.is_root,
            is_leaf: node.is_leaf,
            declarations: node
                .declarations
                .iter()
                .map(|d| Declaration {
                    url: &d.locator,
                    target: d.target.as_deref(),
                    version: &d.constraint,
                })
                .collect(),
        }
    }

    fn build_edge(edge: &EdgeView) -> Edge<'_> {
        Edge {
            id: edge.id,
            source: &edge.source,
            target: &edge.target,
        }
    }

    fn build_run_statistics(run: &RunSummaryView) -> RunStatistics<'_> {
        RunStatistics {
            total_repositories_in_csv: run.total_seeds,
            successful_downloads: run.successful_downloads,
            failed_downloads: run.failed_downloads,
            success_rate: run.success_rate,
            total_dependencies_found: run.total_dependencies_found,
            unique_repositories_processed: run.unique_repositories_processed,
            start_time: &run.started_at,
            end_time: &run.finished_at,
            processing_time_seconds: run.processing_time_seconds,
            processed_repositories: &run.processed_repositories,
        }
    }

    fn build_failure(failure: &FailureView) -> Failure<'_> {
        Failure {
            id: &failure.id,
            reason: &failure.reason,
        }
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, report: &GraphReport) -> Result<String> {
        let document = GraphDocument {
            metadata: Self::build_metadata(&report.metadata),
            statistics: &report.statistics,
            seeds: &report.seeds,
            nodes: report.nodes.iter().map(Self::build_node).collect(),
            edges: report.edges.iter().map(Self::build_edge).collect(),
            adjacency_list: &report.adjacency,
            reverse_adjacency_list: &report.reverse_adjacency,
            failed: report.failed.iter().map(Self::build_failure).collect(),
            unresolvable_locators: &report.unresolvable_locators,
            run_statistics: report.run.as_ref().map(Self::build_run_statistics),
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::sample_report;
    use serde_json::Value;

    fn render() -> Value {
        let output = JsonReportFormatter::new().format(&sample_report()).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_top_level_sections() {
        let json = render();
        for key in [
            "metadata",
            "statistics",
            "seeds",
            "nodes",
            "edges",
            "adjacency_list",
            "reverse_adjacency_list",
            "failed",
        ] {
            assert!(json.get(key).is_some(), "missing section {}", key);
        }
        assert_eq!(json["metadata"]["tool_name"], "spm-depgraph");
        assert_eq!(json["metadata"]["run_id"], "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_statistics_block() {
        let json = render();
        let stats = &json["statistics"];
        assert_eq!(stats["total_nodes"], 4);
        assert_eq!(stats["total_edges"], 4);
        assert_eq!(stats["max_depth"], 1);
        assert_eq!(
            stats["circular_dependencies"][0],
            serde_json::json!(["lib/core", "lib/util", "lib/core"])
        );
    }

    #[test]
    fn test_nodes_and_edges() {
        let json = render();

        let app = &json["nodes"][0];
        assert_eq!(app["id"], "app/app");
        assert_eq!(app["package_name"], "App");
        assert_eq!(app["has_package_swift"], true);
        assert_eq!(app["is_root"], true);
        assert_eq!(app["declarations"][0]["version"], "from 1.0.0");

        let gone = json["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["id"] == "lib/gone")
            .unwrap();
        assert!(gone.get("declarations").is_none());
        assert_eq!(gone["package_name"], Value::Null);

        assert_eq!(json["edges"][0]["id"], 0);
        assert_eq!(json["edges"][0]["source"], "app/app");
        assert_eq!(
            json["adjacency_list"]["app/app"],
            serde_json::json!(["lib/core", "lib/util"])
        );
    }

    #[test]
    fn test_failed_entries() {
        let json = render();
        assert_eq!(json["failed"][0]["id"], "lib/gone");
        assert_eq!(json["failed"][0]["reason"], "manifest not found");
        assert!(json.get("unresolvable_locators").is_none());
    }

    #[test]
    fn test_run_statistics() {
        let json = render();
        let run = &json["run_statistics"];
        assert_eq!(run["total_repositories_in_csv"], 2);
        assert_eq!(run["successful_downloads"], 3);
        assert_eq!(run["failed_downloads"], 1);
        assert_eq!(run["success_rate"], 75.0);
        assert_eq!(run["total_dependencies_found"], 4);
        assert_eq!(run["start_time"], "2026-01-01T00:00:00+00:00");
        assert_eq!(run["processing_time_seconds"], 90.0);
        assert_eq!(
            run["processed_repositories"],
            serde_json::json!(["app/app", "lib/core", "lib/util"])
        );
    }

    #[test]
    fn test_run_statistics_omitted_for_analysis() {
        let mut report = sample_report();
        report.run = None;
        let output = JsonReportFormatter::new().format(&report).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert!(json.get("run_statistics").is_none());
    }
}
