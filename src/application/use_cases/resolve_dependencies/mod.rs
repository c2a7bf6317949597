use crate::application::dto::{AnalysisResponse, AnalysisSource, ResolveRequest, RunSummary};
use crate::dependency_graph::domain::{DependencyGraph, GraphStatistics, Identifier, ResolutionIssue};
use crate::dependency_graph::services::{GraphAnalyzer, ResolutionContext, ResolutionOutcome, Resolver};
use crate::ports::outbound::{ManifestArchive, ManifestRepository, ProgressReporter, Seed, SeedReader};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Instant;

/// ResolveDependenciesUseCase - walks every seed and analyzes the closure
///
/// All seeds share one resolution context, so a repository reached from
/// several seeds is fetched once and archived under the first seed that
/// reached it.
///
/// # Type Parameters
/// * `S` - SeedReader implementation
/// * `M` - ManifestRepository implementation
/// * `A` - ManifestArchive implementation
/// * `P` - ProgressReporter implementation
pub struct ResolveDependenciesUseCase<S, M, A, P> {
    seed_reader: S,
    repository: M,
    archive: A,
    progress_reporter: P,
}

impl<S, M, A, P> ResolveDependenciesUseCase<S, M, A, P>
where
    S: SeedReader,
    M: ManifestRepository,
    A: ManifestArchive,
    P: ProgressReporter,
{
    pub fn new(seed_reader: S, repository: M, archive: A, progress_reporter: P) -> Self {
        Self {
            seed_reader,
            repository,
            archive,
            progress_reporter,
        }
    }

    /// Executes the resolution
    ///
    /// # Errors
    /// Only a seed list that cannot be read is fatal. Per-repository
    /// failures end up in `AnalysisResponse::issues`.
    pub async fn execute(&self, request: ResolveRequest) -> Result<AnalysisResponse> {
        let seeds = self.read_seeds(&request)?;

        if request.dry_run {
            return Ok(self.build_dry_run_response(&request, &seeds));
        }

        let started_at = Utc::now();
        let clock = Instant::now();

        let (seed_ids, outcome) = self.resolve_seeds(&request, &seeds).await;
        self.archive_manifests(&outcome);

        let graph = outcome.to_graph();
        let statistics = GraphAnalyzer::analyze(&graph);
        let run = Self::summarize(&outcome, seeds.len(), started_at, clock);
        self.report_summary(&run, &statistics);

        Ok(AnalysisResponse {
            source: AnalysisSource::Resolution {
                seeds_path: request.seeds_path,
            },
            seeds: seed_ids,
            graph,
            statistics,
            manifests: outcome.manifests,
            issues: outcome.issues,
            dry_run: false,
            run: Some(run),
        })
    }

    fn read_seeds(&self, request: &ResolveRequest) -> Result<Vec<Seed>> {
        self.progress_reporter.report(&format!(
            "📖 Loading seed list from: {}",
            request.seeds_path.display()
        ));

        let seeds = self.seed_reader.read_seeds(&request.seeds_path)?;

        self.progress_reporter
            .report(&format!("✅ Loaded {} seed(s)", seeds.len()));
        Ok(seeds)
    }

    /// Checks that every seed normalizes, without touching the network
    fn build_dry_run_response(&self, request: &ResolveRequest, seeds: &[Seed]) -> AnalysisResponse {
        let mut seed_ids = Vec::new();
        let mut issues = Vec::new();

        for seed in seeds {
            match Identifier::from_locator(&seed.locator) {
                Some(id) if !seed_ids.contains(&id) => seed_ids.push(id),
                Some(_) => {}
                None => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Seed '{}' does not name a GitHub repository",
                        seed.display_name()
                    ));
                    issues.push(ResolutionIssue::UnresolvableLocator {
                        locator: seed.locator.clone(),
                    });
                }
            }
        }

        self.progress_reporter.report_completion(&format!(
            "Success: {} seed(s) validated, {} rejected. Nothing was fetched.",
            seed_ids.len(),
            issues.len()
        ));

        AnalysisResponse {
            source: AnalysisSource::Resolution {
                seeds_path: request.seeds_path.clone(),
            },
            seeds: seed_ids,
            graph: DependencyGraph::default(),
            statistics: GraphStatistics::default(),
            manifests: BTreeMap::new(),
            issues,
            dry_run: true,
            run: None,
        }
    }

    async fn resolve_seeds(
        &self,
        request: &ResolveRequest,
        seeds: &[Seed],
    ) -> (Vec<Identifier>, ResolutionOutcome) {
        let resolver = Resolver::new(&self.repository).with_fetch_delay(request.fetch_delay);
        let mut context = ResolutionContext::new();
        let mut seed_ids: Vec<Identifier> = Vec::new();
        let total = seeds.len();

        self.progress_reporter
            .report(&format!("🔍 Resolving dependencies of {} seed(s)...", total));

        for (index, seed) in seeds.iter().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(seed.display_name()));
            tracing::info!(seed = %seed.locator, position = index + 1, total, "resolving seed");

            let issues_before = context.issues().len();
            let fetched_before = context.fetch_count();

            match resolver.resolve_locator(&mut context, &seed.locator).await {
                Some(id) => {
                    if !seed_ids.contains(&id) {
                        seed_ids.push(id);
                    }
                }
                None => tracing::debug!(seed = %seed.locator, "seed skipped"),
            }

            for issue in &context.issues()[issues_before..] {
                self.progress_reporter.report_error(&format!("⚠️  {}", issue));
            }
            tracing::debug!(
                seed = %seed.locator,
                fetched = context.fetch_count() - fetched_before,
                "seed finished"
            );

            if index + 1 < total && !request.seed_delay.is_zero() {
                tokio::time::sleep(request.seed_delay).await;
            }
        }

        self.progress_reporter.report_progress(total, total, None);
        (seed_ids, context.into_outcome())
    }

    /// Stores every fetched manifest; failures are reported, never fatal
    fn archive_manifests(&self, outcome: &ResolutionOutcome) {
        let mut stored = 0;

        for (id, content) in &outcome.contents {
            let seed = outcome.origins.get(id).unwrap_or(id);
            match self.archive.store(seed, id, content) {
                Ok(()) => stored += 1,
                Err(e) => self
                    .progress_reporter
                    .report_error(&format!("⚠️  Failed to archive manifest of {}: {}", id, e)),
            }
        }

        tracing::debug!(stored, "manifests archived");
    }

    fn summarize(
        outcome: &ResolutionOutcome,
        seed_count: usize,
        started_at: DateTime<Utc>,
        clock: Instant,
    ) -> RunSummary {
        RunSummary {
            seed_count,
            successful_downloads: outcome.visited.len(),
            failed_downloads: outcome.failed.len(),
            dependencies_found: outcome
                .manifests
                .values()
                .map(|record| record.dependency_locators.len())
                .sum(),
            started_at,
            finished_at: Utc::now(),
            elapsed: clock.elapsed(),
            processed: outcome.visited.iter().cloned().collect(),
        }
    }

    fn report_summary(&self, run: &RunSummary, statistics: &GraphStatistics) {
        tracing::info!(
            seeds = run.seed_count,
            downloaded = run.successful_downloads,
            failed = run.failed_downloads,
            elapsed_ms = run.elapsed.as_millis() as u64,
            "resolution finished"
        );
        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} repositories ({} failed, {:.1}% success), {} nodes, {} edges, {} cycle(s) in {:.2} minutes",
            run.successful_downloads,
            run.failed_downloads,
            run.success_rate(),
            statistics.total_nodes,
            statistics.total_edges,
            statistics.cycle_count(),
            run.elapsed_minutes()
        ));
    }
}
