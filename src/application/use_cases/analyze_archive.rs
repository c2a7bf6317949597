use crate::application::dto::{AnalysisResponse, AnalysisSource, AnalyzeRequest};
use crate::dependency_graph::domain::{DependencyGraph, Identifier, ResolutionIssue};
use crate::dependency_graph::services::{GraphAnalyzer, ManifestParser};
use crate::ports::outbound::{ManifestArchive, ProgressReporter};
use crate::shared::Result;
use std::collections::BTreeMap;

/// AnalyzeArchiveUseCase - rebuilds the graph from previously archived manifests
///
/// No network access happens here. Every archived identifier becomes a node,
/// and every normalizable locator inside its manifest becomes an edge.
pub struct AnalyzeArchiveUseCase<A, P> {
    archive: A,
    progress_reporter: P,
}

impl<A, P> AnalyzeArchiveUseCase<A, P>
where
    A: ManifestArchive,
    P: ProgressReporter,
{
    pub fn new(archive: A, progress_reporter: P) -> Self {
        Self {
            archive,
            progress_reporter,
        }
    }

    pub fn execute(&self, request: AnalyzeRequest) -> Result<AnalysisResponse> {
        self.progress_reporter.report(&format!(
            "📂 Scanning manifest archive: {}",
            request.archive_dir.display()
        ));

        let stored = self.archive.load_all()?;
        let total = stored.len();
        self.progress_reporter
            .report(&format!("✅ Found {} archived manifest(s)", total));

        let mut builder = DependencyGraph::builder();
        let mut seeds: Vec<Identifier> = Vec::new();
        let mut manifests = BTreeMap::new();
        let mut issues = Vec::new();

        for (index, entry) in stored.into_iter().enumerate() {
            self.progress_reporter.report_progress(
                index,
                total,
                Some(&entry.identifier.to_string()),
            );

            if !seeds.contains(&entry.seed) {
                seeds.push(entry.seed.clone());
            }
            builder.add_node(entry.identifier.clone());

            let record = ManifestParser::parse_bytes(&entry.content);
            if !record.parsed {
                let issue = ResolutionIssue::ManifestUnreadable {
                    identifier: entry.identifier,
                };
                self.progress_reporter.report_error(&format!("⚠️  {}", issue));
                issues.push(issue);
                continue;
            }

            for locator in &record.dependency_locators {
                match Identifier::from_locator(locator) {
                    Some(target) => {
                        builder.add_edge(entry.identifier.clone(), target);
                    }
                    None => {
                        tracing::warn!(identifier = %entry.identifier, %locator, "unresolvable locator");
                        issues.push(ResolutionIssue::UnresolvableLocator {
                            locator: locator.clone(),
                        });
                    }
                }
            }

            builder.record_manifest(entry.identifier.clone(), &record);
            manifests.insert(entry.identifier, record);
        }
        self.progress_reporter.report_progress(total, total, None);

        let graph = builder.build();
        let statistics = GraphAnalyzer::analyze(&graph);

        self.progress_reporter.report_completion(&format!(
            "✅ Analyzed {} nodes, {} edges, {} cycle(s)",
            statistics.total_nodes,
            statistics.total_edges,
            statistics.cycle_count()
        ));

        Ok(AnalysisResponse {
            source: AnalysisSource::Archive {
                archive_dir: request.archive_dir,
            },
            seeds,
            graph,
            statistics,
            manifests,
            issues,
            dry_run: false,
            run: None,
        })
    }
}
