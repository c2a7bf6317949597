use super::Identifier;
use serde::Serialize;

/// Summary metrics computed over a [`super::DependencyGraph`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub root_packages: usize,
    pub leaf_packages: usize,
    pub max_depth: usize,
    pub circular_dependencies: Vec<Vec<Identifier>>,
}

impl GraphStatistics {
    pub fn cycle_count(&self) -> usize {
        self.circular_dependencies.len()
    }

    pub fn has_cycles(&self) -> bool {
        !self.circular_dependencies.is_empty()
    }
}
