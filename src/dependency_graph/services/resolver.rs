use crate::dependency_graph::domain::{
    DependencyGraph, Edge, Identifier, ManifestRecord, ResolutionIssue,
};
use crate::dependency_graph::services::ManifestParser;
use crate::ports::outbound::{FetchedManifest, ManifestRepository};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::Duration;

/// Mutable bookkeeping owned by one resolution run
///
/// Every identifier is fetched at most once per context: the membership
/// check against `visited` and `failed` runs before any fetch, and that is
/// what bounds the traversal in the presence of cycles.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    visited: HashSet<Identifier>,
    failed: HashSet<Identifier>,
    edges: Vec<Edge>,
    manifests: HashMap<Identifier, ManifestRecord>,
    contents: HashMap<Identifier, Vec<u8>>,
    origins: HashMap<Identifier, Identifier>,
    attempted: Vec<Identifier>,
    issues: Vec<ResolutionIssue>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` was already fetched, successfully or not
    pub fn is_known(&self, id: &Identifier) -> bool {
        self.visited.contains(id) || self.failed.contains(id)
    }

    pub fn visited(&self) -> &HashSet<Identifier> {
        &self.visited
    }

    pub fn failed(&self) -> &HashSet<Identifier> {
        &self.failed
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn issues(&self) -> &[ResolutionIssue] {
        &self.issues
    }

    /// Identifiers in the order they were handed to the repository
    pub fn attempted(&self) -> &[Identifier] {
        &self.attempted
    }

    pub fn fetch_count(&self) -> usize {
        self.attempted.len()
    }

    fn record_issue(&mut self, issue: ResolutionIssue) {
        tracing::warn!(%issue, "resolution issue");
        self.issues.push(issue);
    }

    fn mark_failed(&mut self, id: Identifier, issue: ResolutionIssue) {
        self.failed.insert(id);
        self.record_issue(issue);
    }

    /// Records a parsed manifest and returns its distinct targets in
    /// declaration order
    fn record_success(
        &mut self,
        id: Identifier,
        seed: &Identifier,
        record: ManifestRecord,
        content: Vec<u8>,
    ) -> Vec<Identifier> {
        let mut targets = Vec::new();
        let mut seen = HashSet::new();

        for locator in &record.dependency_locators {
            match Identifier::from_locator(locator) {
                Some(target) => {
                    self.edges.push(Edge::new(id.clone(), target.clone()));
                    if seen.insert(target.clone()) {
                        targets.push(target);
                    }
                }
                None => self.record_issue(ResolutionIssue::UnresolvableLocator {
                    locator: locator.clone(),
                }),
            }
        }

        self.visited.insert(id.clone());
        self.origins.insert(id.clone(), seed.clone());
        self.contents.insert(id.clone(), content);
        self.manifests.insert(id, record);
        targets
    }

    pub fn into_outcome(self) -> ResolutionOutcome {
        ResolutionOutcome {
            visited: self.visited.into_iter().collect(),
            failed: self.failed.into_iter().collect(),
            edges: self.edges,
            manifests: self.manifests.into_iter().collect(),
            contents: self.contents.into_iter().collect(),
            origins: self.origins.into_iter().collect(),
            fetch_order: self.attempted,
            issues: self.issues,
        }
    }
}

/// Final state of a resolution run
#[derive(Debug, Clone, Default)]
pub struct ResolutionOutcome {
    pub visited: BTreeSet<Identifier>,
    pub failed: BTreeSet<Identifier>,
    pub edges: Vec<Edge>,
    pub manifests: BTreeMap<Identifier, ManifestRecord>,
    /// Raw manifest bytes, kept for archiving
    pub contents: BTreeMap<Identifier, Vec<u8>>,
    /// Seed whose traversal first reached each visited identifier
    pub origins: BTreeMap<Identifier, Identifier>,
    pub fetch_order: Vec<Identifier>,
    pub issues: Vec<ResolutionIssue>,
}

impl ResolutionOutcome {
    /// Builds the graph model: every attempted identifier plus every edge
    /// endpoint becomes a node
    pub fn to_graph(&self) -> DependencyGraph {
        let mut builder = DependencyGraph::builder();
        for id in self.visited.iter().chain(self.failed.iter()) {
            builder.add_node(id.clone());
        }
        for (id, record) in &self.manifests {
            builder.record_manifest(id.clone(), record);
        }
        for edge in &self.edges {
            builder.add_edge(edge.source.clone(), edge.target.clone());
        }
        builder.build()
    }
}

/// Resolver walks the dependency relation from seed identifiers
///
/// The walk is a depth-first pre-order traversal driven by an explicit
/// stack, so deep chains cannot overflow the call stack. There is no depth
/// limit.
pub struct Resolver<'a, R: ManifestRepository> {
    repository: &'a R,
    fetch_delay: Duration,
}

impl<'a, R: ManifestRepository> Resolver<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self {
            repository,
            fetch_delay: Duration::ZERO,
        }
    }

    /// Pause inserted before every fetch except the first of a context
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Normalizes a seed locator and resolves it
    ///
    /// # Returns
    /// The seed identifier, or `None` when the locator cannot be normalized
    pub async fn resolve_locator(
        &self,
        context: &mut ResolutionContext,
        locator: &str,
    ) -> Option<Identifier> {
        let Some(seed) = Identifier::from_locator(locator) else {
            context.record_issue(ResolutionIssue::UnresolvableLocator {
                locator: locator.to_string(),
            });
            return None;
        };

        self.resolve(context, &seed).await;
        Some(seed)
    }

    /// Resolves the transitive closure of `seed` into `context`
    pub async fn resolve(&self, context: &mut ResolutionContext, seed: &Identifier) {
        let mut stack: Vec<(Identifier, usize)> = vec![(seed.clone(), 0)];

        while let Some((id, depth)) = stack.pop() {
            if context.is_known(&id) {
                tracing::debug!(identifier = %id, depth, "already processed");
                continue;
            }

            if !self.fetch_delay.is_zero() && context.fetch_count() > 0 {
                tokio::time::sleep(self.fetch_delay).await;
            }

            tracing::debug!(identifier = %id, depth, seed = %seed, "fetching manifest");
            context.attempted.push(id.clone());

            match self.repository.fetch_manifest(&id).await {
                Ok(FetchedManifest::Found { content, branch }) => {
                    let record = ManifestParser::parse_bytes(&content);
                    if !record.parsed {
                        context.mark_failed(
                            id.clone(),
                            ResolutionIssue::ManifestUnreadable { identifier: id },
                        );
                        continue;
                    }

                    tracing::debug!(
                        identifier = %id,
                        branch = branch.as_deref().unwrap_or("-"),
                        dependencies = record.dependency_locators.len(),
                        "manifest parsed"
                    );

                    let targets = context.record_success(id, seed, record, content);
                    for target in targets.into_iter().rev() {
                        stack.push((target, depth + 1));
                    }
                }
                Ok(FetchedManifest::NotFound) => {
                    context.mark_failed(
                        id.clone(),
                        ResolutionIssue::ManifestNotFound { identifier: id },
                    );
                }
                Err(e) => {
                    context.mark_failed(
                        id.clone(),
                        ResolutionIssue::FetchFailed {
                            identifier: id,
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }
    }
}
