use super::{Identifier, ManifestRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A single declared dependency relation
///
/// Edges are not deduplicated: a manifest that declares the same target
/// twice (through textually different locators) yields two edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: Identifier,
    pub target: Identifier,
}

impl Edge {
    pub fn new(source: Identifier, target: Identifier) -> Self {
        Self { source, target }
    }
}

/// Derived per-node attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    pub id: Identifier,
    pub package_name: Option<String>,
    pub has_manifest: bool,
    pub dependencies_count: usize,
    pub dependents_count: usize,
    pub is_root: bool,
    pub is_leaf: bool,
}

/// Immutable directed multigraph over package identifiers
///
/// Built once through [`DependencyGraphBuilder`]; every edge endpoint is
/// guaranteed to be a member of the node set.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: BTreeSet<Identifier>,
    edges: Vec<Edge>,
    forward: BTreeMap<Identifier, Vec<Identifier>>,
    reverse: BTreeMap<Identifier, Vec<Identifier>>,
    manifests: BTreeMap<Identifier, Option<String>>,
}

impl DependencyGraph {
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::default()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Identifier> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.nodes.contains(id)
    }

    /// Targets declared by `id`, in declaration order, duplicates included
    pub fn out_edges(&self, id: &Identifier) -> &[Identifier] {
        self.forward.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources declaring `id`, in discovery order, duplicates included
    pub fn in_edges(&self, id: &Identifier) -> &[Identifier] {
        self.reverse.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn out_degree(&self, id: &Identifier) -> usize {
        self.out_edges(id).len()
    }

    pub fn in_degree(&self, id: &Identifier) -> usize {
        self.in_edges(id).len()
    }

    pub fn adjacency(&self) -> &BTreeMap<Identifier, Vec<Identifier>> {
        &self.forward
    }

    pub fn reverse_adjacency(&self) -> &BTreeMap<Identifier, Vec<Identifier>> {
        &self.reverse
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_manifest(&self, id: &Identifier) -> bool {
        self.manifests.contains_key(id)
    }

    pub fn declared_name(&self, id: &Identifier) -> Option<&str> {
        self.manifests.get(id).and_then(|name| name.as_deref())
    }

    pub fn manifest_count(&self) -> usize {
        self.manifests.len()
    }

    pub fn node_info(&self, id: &Identifier) -> Option<NodeInfo> {
        if !self.contains(id) {
            return None;
        }
        let dependencies_count = self.out_degree(id);
        let dependents_count = self.in_degree(id);
        Some(NodeInfo {
            id: id.clone(),
            package_name: self.declared_name(id).map(String::from),
            has_manifest: self.has_manifest(id),
            dependencies_count,
            dependents_count,
            is_root: dependents_count == 0,
            is_leaf: dependencies_count == 0,
        })
    }

    /// Attributes for every node, sorted by identifier
    pub fn node_infos(&self) -> Vec<NodeInfo> {
        self.nodes.iter().filter_map(|id| self.node_info(id)).collect()
    }
}

/// Accumulates nodes, edges and parsed manifests before freezing them
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    nodes: BTreeSet<Identifier>,
    edges: Vec<Edge>,
    manifests: BTreeMap<Identifier, Option<String>>,
}

impl DependencyGraphBuilder {
    pub fn add_node(&mut self, id: Identifier) -> &mut Self {
        self.nodes.insert(id);
        self
    }

    pub fn add_edge(&mut self, source: Identifier, target: Identifier) -> &mut Self {
        self.nodes.insert(source.clone());
        self.nodes.insert(target.clone());
        self.edges.push(Edge::new(source, target));
        self
    }

    /// Registers the manifest of `id`; unreadable manifests only add the node
    pub fn record_manifest(&mut self, id: Identifier, record: &ManifestRecord) -> &mut Self {
        if record.parsed {
            self.manifests
                .insert(id.clone(), record.declared_name.clone());
        }
        self.nodes.insert(id);
        self
    }

    pub fn build(&mut self) -> DependencyGraph {
        let nodes = std::mem::take(&mut self.nodes);
        let edges = std::mem::take(&mut self.edges);
        let manifests = std::mem::take(&mut self.manifests);

        let mut forward: BTreeMap<Identifier, Vec<Identifier>> = BTreeMap::new();
        let mut reverse: BTreeMap<Identifier, Vec<Identifier>> = BTreeMap::new();
        for edge in &edges {
            forward
                .entry(edge.source.clone())
                .or_default()
                .push(edge.target.clone());
            reverse
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
        }

        DependencyGraph {
            nodes,
            edges,
            forward,
            reverse,
            manifests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(key: &str) -> Identifier {
        Identifier::parse(key).unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::builder().build();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.out_edges(&id("a/a")).is_empty());
    }

    #[test]
    fn test_edges_add_both_endpoints() {
        let mut builder = DependencyGraph::builder();
        builder.add_edge(id("a/a"), id("b/b"));
        let graph = builder.build();

        assert!(graph.contains(&id("a/a")));
        assert!(graph.contains(&id("b/b")));
        for edge in graph.edges() {
            assert!(graph.contains(&edge.source));
            assert!(graph.contains(&edge.target));
        }
    }

    #[test]
    fn test_duplicate_edges_are_preserved() {
        let mut builder = DependencyGraph::builder();
        builder
            .add_edge(id("a/a"), id("b/b"))
            .add_edge(id("a/a"), id("b/b"));
        let graph = builder.build();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.out_degree(&id("a/a")), 2);
        assert_eq!(graph.in_degree(&id("b/b")), 2);
        assert_eq!(graph.in_edges(&id("b/b")), &[id("a/a"), id("a/a")]);
    }

    #[test]
    fn test_out_edges_keep_declaration_order() {
        let mut builder = DependencyGraph::builder();
        builder
            .add_edge(id("a/a"), id("z/z"))
            .add_edge(id("a/a"), id("b/b"))
            .add_edge(id("a/a"), id("m/m"));
        let graph = builder.build();

        assert_eq!(graph.out_edges(&id("a/a")), &[id("z/z"), id("b/b"), id("m/m")]);
    }

    #[test]
    fn test_isolated_node_is_root_and_leaf() {
        let mut builder = DependencyGraph::builder();
        builder.add_node(id("lonely/pkg"));
        let graph = builder.build();

        let info = graph.node_info(&id("lonely/pkg")).unwrap();
        assert!(info.is_root);
        assert!(info.is_leaf);
        assert!(!info.has_manifest);
    }

    #[test]
    fn test_node_info_attributes() {
        let record = ManifestRecord {
            declared_name: Some("App".to_string()),
            parsed: true,
            ..Default::default()
        };
        let mut builder = DependencyGraph::builder();
        builder
            .record_manifest(id("a/app"), &record)
            .add_edge(id("a/app"), id("b/lib"));
        let graph = builder.build();

        let app = graph.node_info(&id("a/app")).unwrap();
        assert_eq!(app.package_name.as_deref(), Some("App"));
        assert!(app.has_manifest);
        assert_eq!(app.dependencies_count, 1);
        assert_eq!(app.dependents_count, 0);
        assert!(app.is_root);
        assert!(!app.is_leaf);

        let lib = graph.node_info(&id("b/lib")).unwrap();
        assert!(!lib.has_manifest);
        assert!(lib.is_leaf);
        assert!(!lib.is_root);
    }

    #[test]
    fn test_unreadable_manifest_adds_node_without_manifest() {
        let mut builder = DependencyGraph::builder();
        builder.record_manifest(id("bad/pkg"), &ManifestRecord::unreadable());
        let graph = builder.build();

        assert!(graph.contains(&id("bad/pkg")));
        assert!(!graph.has_manifest(&id("bad/pkg")));
        assert_eq!(graph.manifest_count(), 0);
    }

    #[test]
    fn test_root_and_leaf_match_degrees() {
        let mut builder = DependencyGraph::builder();
        builder
            .add_edge(id("a/a"), id("b/b"))
            .add_edge(id("b/b"), id("c/c"))
            .add_node(id("d/d"));
        let graph = builder.build();

        for info in graph.node_infos() {
            assert_eq!(info.is_root, graph.in_degree(&info.id) == 0);
            assert_eq!(info.is_leaf, graph.out_degree(&info.id) == 0);
        }
    }

    #[test]
    fn test_node_infos_sorted() {
        let mut builder = DependencyGraph::builder();
        builder.add_edge(id("z/z"), id("a/a"));
        let graph = builder.build();

        let ids: Vec<String> = graph.node_infos().iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, vec!["a/a", "z/z"]);
    }
}
