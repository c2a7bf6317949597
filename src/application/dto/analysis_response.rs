use crate::dependency_graph::domain::{
    DependencyGraph, GraphStatistics, Identifier, ManifestRecord, ResolutionIssue,
};
use super::RunSummary;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where the analyzed graph came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Live resolution from a seed table
    Resolution { seeds_path: PathBuf },
    /// Offline re-scan of a manifest archive
    Archive { archive_dir: PathBuf },
}

impl AnalysisSource {
    pub fn mode(&self) -> &'static str {
        match self {
            AnalysisSource::Resolution { .. } => "resolve",
            AnalysisSource::Archive { .. } => "analyze",
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            AnalysisSource::Resolution { seeds_path } => seeds_path,
            AnalysisSource::Archive { archive_dir } => archive_dir,
        }
    }
}

/// Response DTO shared by the resolve and analyze use cases
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub source: AnalysisSource,
    /// Seeds in seed-list order, after normalization
    pub seeds: Vec<Identifier>,
    pub graph: DependencyGraph,
    pub statistics: GraphStatistics,
    /// Parsed manifests keyed by identifier
    pub manifests: BTreeMap<Identifier, ManifestRecord>,
    pub issues: Vec<ResolutionIssue>,
    /// True when the run only validated the seed list
    pub dry_run: bool,
    /// Download totals, present only for a resolve run that fetched
    pub run: Option<RunSummary>,
}

impl AnalysisResponse {
    /// Identifiers that were attempted but produced no usable manifest, sorted
    pub fn failed(&self) -> Vec<&Identifier> {
        let mut failed: Vec<&Identifier> = self
            .issues
            .iter()
            .filter_map(ResolutionIssue::identifier)
            .collect();
        failed.sort();
        failed.dedup();
        failed
    }

    /// Locators that could not be turned into an identifier
    pub fn unresolvable_locators(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter_map(|issue| match issue {
                ResolutionIssue::UnresolvableLocator { locator } => Some(locator.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(key: &str) -> Identifier {
        Identifier::parse(key).unwrap()
    }

    fn response_with(issues: Vec<ResolutionIssue>) -> AnalysisResponse {
        AnalysisResponse {
            source: AnalysisSource::Archive {
                archive_dir: PathBuf::from("all_dependencies_tree"),
            },
            seeds: vec![],
            graph: DependencyGraph::default(),
            statistics: GraphStatistics::default(),
            manifests: BTreeMap::new(),
            issues,
            dry_run: false,
            run: None,
        }
    }

    #[test]
    fn test_failed_is_sorted_and_distinct() {
        let response = response_with(vec![
            ResolutionIssue::ManifestNotFound {
                identifier: id("z/z"),
            },
            ResolutionIssue::UnresolvableLocator {
                locator: "https://github.com/".to_string(),
            },
            ResolutionIssue::FetchFailed {
                identifier: id("a/a"),
                reason: "timeout".to_string(),
            },
            ResolutionIssue::ManifestUnreadable {
                identifier: id("z/z"),
            },
        ]);

        assert_eq!(response.failed(), vec![&id("a/a"), &id("z/z")]);
        assert_eq!(response.unresolvable_locators(), vec!["https://github.com/"]);
    }

    #[test]
    fn test_source_mode() {
        let response = response_with(vec![]);
        assert_eq!(response.source.mode(), "analyze");
        assert_eq!(
            AnalysisSource::Resolution {
                seeds_path: PathBuf::from("seeds.csv")
            }
            .mode(),
            "resolve"
        );
    }
}
