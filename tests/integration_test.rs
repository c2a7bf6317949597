/// Integration tests for the application layer
mod test_utilities;

use std::path::PathBuf;
use test_utilities::mocks::*;
use spm_depgraph::prelude::*;

fn id(key: &str) -> Identifier {
    Identifier::parse(key).unwrap()
}

/// App -> Vapor -> {NIO, Crypto}; NIO -> Atomics; Crypto -> Asn1 -> Crypto
fn ecosystem() -> MockManifestRepository {
    MockManifestRepository::new()
        .with_package("acme/app", "App", &["vapor/vapor"])
        .with_package("vapor/vapor", "vapor", &["apple/swift-nio", "apple/swift-crypto"])
        .with_package("apple/swift-nio", "swift-nio", &["apple/swift-atomics"])
        .with_package("apple/swift-atomics", "swift-atomics", &[])
        .with_package("apple/swift-crypto", "swift-crypto", &["apple/swift-asn1"])
        .with_package("apple/swift-asn1", "swift-asn1", &["apple/swift-crypto"])
}

fn request() -> ResolveRequest {
    ResolveRequest::new(PathBuf::from("seeds.csv"))
}

#[tokio::test]
async fn test_resolve_happy_path() {
    let reporter = MockProgressReporter::new();
    let use_case = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&["https://github.com/acme/app.git"]),
        ecosystem(),
        MockManifestArchive::new(),
        reporter.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.seeds, vec![id("acme/app")]);
    assert_eq!(response.statistics.total_nodes, 6);
    assert_eq!(response.statistics.total_edges, 6);
    assert_eq!(response.statistics.root_packages, 1);
    assert_eq!(response.statistics.leaf_packages, 1);
    assert_eq!(response.statistics.max_depth, 3);
    assert_eq!(
        response.statistics.circular_dependencies,
        vec![vec![
            id("apple/swift-crypto"),
            id("apple/swift-asn1"),
            id("apple/swift-crypto"),
        ]]
    );
    assert!(response.failed().is_empty());
    assert!(reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Completed: ✅ Resolved 6 repositories")));
}

#[tokio::test]
async fn test_run_summary_counts() {
    let use_case = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&["https://github.com/acme/app.git", "https://gitlab.com/acme/app"]),
        ecosystem().with_package("acme/app", "App", &["vapor/vapor", "acme/missing"]),
        MockManifestArchive::new(),
        MockProgressReporter::new(),
    );

    let response = use_case.execute(request()).await.unwrap();
    let run = response.run.clone().unwrap();

    assert_eq!(run.seed_count, 2);
    assert_eq!(run.successful_downloads, 6);
    assert_eq!(run.failed_downloads, 1);
    assert_eq!(run.dependencies_found, 7);
    assert_eq!(run.processed.len(), 6);
    assert_eq!(run.processed[0], id("acme/app"));
    assert!((run.success_rate() - 600.0 / 7.0).abs() < 1e-9);

    let report = GraphReportBuilder::build(&response);
    let json = JsonReportFormatter::new().format(&report).unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["run_statistics"]["total_repositories_in_csv"], 2);
    assert_eq!(document["run_statistics"]["failed_downloads"], 1);
    assert_eq!(document["run_statistics"]["total_dependencies_found"], 7);

    let markdown = MarkdownReportFormatter::new().format(&report).unwrap();
    assert!(markdown.contains("- **Success Rate**: 85.7%"));
    assert!(markdown.contains("- **Unique Repositories Processed**: 6"));
}

#[tokio::test]
async fn test_overlapping_seeds_fetch_each_repository_once() {
    let repository = ecosystem()
        .with_package("acme/tool", "Tool", &["apple/swift-nio", "apple/swift-argument-parser"])
        .with_package("apple/swift-argument-parser", "swift-argument-parser", &[]);
    let use_case = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&[
            "https://github.com/acme/app",
            "https://github.com/acme/tool",
            "https://github.com/acme/app.git",
        ]),
        repository,
        MockManifestArchive::new(),
        MockProgressReporter::new(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.seeds, vec![id("acme/app"), id("acme/tool")]);
    assert_eq!(response.statistics.total_nodes, 8);
    assert_eq!(response.graph.in_degree(&id("apple/swift-nio")), 2);
}

#[tokio::test]
async fn test_failures_are_collected_and_reported() {
    let repository = MockManifestRepository::new()
        .with_package("acme/app", "App", &["acme/private", "acme/flaky", "acme/binary"])
        .with_failure("acme/flaky")
        .with_raw("acme/binary", &[0xc3, 0x28]);
    let reporter = MockProgressReporter::new();
    let use_case = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&["https://github.com/acme/app", "git@github.com:acme/app.git"]),
        repository,
        MockManifestArchive::new(),
        reporter.clone(),
    );

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(
        response.failed(),
        vec![&id("acme/binary"), &id("acme/flaky"), &id("acme/private")]
    );
    assert_eq!(
        response.unresolvable_locators(),
        vec!["git@github.com:acme/app.git"]
    );
    // Failed identifiers stay in the graph as manifest-less nodes
    assert_eq!(response.statistics.total_nodes, 4);
    assert!(!response.graph.has_manifest(&id("acme/private")));
    assert_eq!(reporter.errors().len(), 4);

    let report = GraphReportBuilder::build(&response);
    let reasons: Vec<(&str, &str)> = report
        .failed
        .iter()
        .map(|f| (f.id.as_str(), f.reason.as_str()))
        .collect();
    assert_eq!(reasons[0].0, "acme/binary");
    assert_eq!(reasons[2], ("acme/private", "manifest not found"));
    assert!(reasons[1].1.contains("Mock repository failure"));
}

#[tokio::test]
async fn test_archive_round_trip_reproduces_the_graph() {
    let archive = MockManifestArchive::new();
    let resolve = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&["https://github.com/acme/app"]),
        ecosystem(),
        archive.clone(),
        MockProgressReporter::new(),
    );
    let resolved = resolve.execute(request()).await.unwrap();

    let stored = archive.stored();
    assert_eq!(stored.len(), 6);
    assert!(stored.iter().all(|entry| entry.seed == id("acme/app")));

    let analyze = AnalyzeArchiveUseCase::new(archive, MockProgressReporter::new());
    let analyzed = analyze
        .execute(AnalyzeRequest::new(PathBuf::from("all_dependencies_tree")))
        .unwrap();

    assert_eq!(analyzed.statistics, resolved.statistics);
    assert_eq!(analyzed.seeds, vec![id("acme/app")]);
    assert_eq!(analyzed.source.mode(), "analyze");
    assert!(analyzed.run.is_none());
}

#[tokio::test]
async fn test_reports_render_from_resolution() {
    let use_case = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&["https://github.com/acme/app"]),
        ecosystem(),
        MockManifestArchive::new(),
        MockProgressReporter::new(),
    );
    let response = use_case.execute(request()).await.unwrap();
    let report = GraphReportBuilder::build(&response);

    let json = JsonReportFormatter::new().format(&report).unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["metadata"]["mode"], "resolve");
    assert_eq!(document["statistics"]["total_nodes"], 6);
    assert_eq!(document["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(document["edges"][0]["id"], 0);
    assert_eq!(
        document["adjacency_list"]["vapor/vapor"],
        serde_json::json!(["apple/swift-nio", "apple/swift-crypto"])
    );

    let markdown = MarkdownReportFormatter::new().format(&report).unwrap();
    assert!(markdown.contains("## Circular Dependencies (1)"));
    assert!(markdown.contains("apple/swift-crypto → apple/swift-asn1 → apple/swift-crypto"));
    assert!(markdown.contains("- **acme/app**: 1 dependency"));
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let repository = ecosystem();
    let archive = MockManifestArchive::new();
    let use_case = ResolveDependenciesUseCase::new(
        MockSeedReader::new(&["https://github.com/acme/app", "https://bitbucket.org/x"]),
        repository,
        archive.clone(),
        MockProgressReporter::new(),
    );

    let response = use_case.execute(request().with_dry_run(true)).await.unwrap();

    assert!(response.dry_run);
    assert!(response.run.is_none());
    assert_eq!(response.seeds, vec![id("acme/app")]);
    assert!(archive.stored().is_empty());
}
