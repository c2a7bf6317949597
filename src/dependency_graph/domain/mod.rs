pub mod graph;
pub mod identifier;
pub mod manifest;
pub mod resolution_issue;
pub mod statistics;

pub use graph::{DependencyGraph, DependencyGraphBuilder, Edge, NodeInfo};
pub use identifier::{Identifier, HOSTING_DOMAIN};
pub use manifest::{DependencyDeclaration, ManifestRecord, VersionConstraint};
pub use resolution_issue::ResolutionIssue;
pub use statistics::GraphStatistics;
