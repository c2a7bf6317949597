use crate::dependency_graph::domain::{DependencyGraph, GraphStatistics, Identifier};
use std::collections::{HashSet, VecDeque};

/// One pending node of the cycle search
struct Frame {
    node: Identifier,
    path: Vec<Identifier>,
    next: usize,
}

/// GraphAnalyzer service computing structural metrics
///
/// This service contains pure graph algorithms with no I/O. All iteration
/// happens in identifier order so results are reproducible.
pub struct GraphAnalyzer;

impl GraphAnalyzer {
    pub fn analyze(graph: &DependencyGraph) -> GraphStatistics {
        let roots = Self::roots(graph);
        let leaves = Self::leaves(graph);

        GraphStatistics {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
            root_packages: roots.len(),
            leaf_packages: leaves.len(),
            max_depth: Self::max_depth(graph),
            circular_dependencies: Self::detect_cycles(graph),
        }
    }

    /// Nodes nothing depends on
    pub fn roots(graph: &DependencyGraph) -> Vec<&Identifier> {
        graph.nodes().filter(|id| graph.in_degree(id) == 0).collect()
    }

    /// Nodes that declare no dependencies
    pub fn leaves(graph: &DependencyGraph) -> Vec<&Identifier> {
        graph.nodes().filter(|id| graph.out_degree(id) == 0).collect()
    }

    /// Largest shortest-path hop count reachable from any root
    pub fn max_depth(graph: &DependencyGraph) -> usize {
        Self::roots(graph)
            .into_iter()
            .map(|root| Self::depth_from(graph, root))
            .max()
            .unwrap_or(0)
    }

    /// Breadth-first hop count to the farthest node reachable from `start`
    ///
    /// Nodes are marked on dequeue, so each node contributes the length of
    /// its shortest path from `start`.
    pub fn depth_from(graph: &DependencyGraph, start: &Identifier) -> usize {
        if graph.out_degree(start) == 0 {
            return 0;
        }

        let mut visited: HashSet<&Identifier> = HashSet::new();
        let mut queue: VecDeque<(&Identifier, usize)> = VecDeque::from([(start, 0)]);
        let mut max_depth = 0;

        while let Some((node, depth)) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            max_depth = max_depth.max(depth);

            for dependency in graph.out_edges(node) {
                if !visited.contains(dependency) {
                    queue.push_back((dependency, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Depth-first cycle search over every node
    ///
    /// A neighbor already on the active path closes a cycle, reported as the
    /// path suffix starting at that neighbor with the neighbor appended
    /// again. Nodes join the global visited set on entry, and the same
    /// structural cycle can be reported more than once when it is reachable
    /// through parallel edges; those repeats are kept.
    pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<Identifier>> {
        let mut visited: HashSet<Identifier> = HashSet::new();
        let mut on_path: HashSet<Identifier> = HashSet::new();
        let mut cycles = Vec::new();

        for start in graph.nodes() {
            if visited.contains(start) {
                continue;
            }

            visited.insert(start.clone());
            on_path.insert(start.clone());
            let mut stack = vec![Frame {
                node: start.clone(),
                path: vec![start.clone()],
                next: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                let neighbors = graph.out_edges(&frame.node);
                if frame.next >= neighbors.len() {
                    on_path.remove(&frame.node);
                    stack.pop();
                    continue;
                }

                let neighbor = &neighbors[frame.next];
                frame.next += 1;

                if on_path.contains(neighbor) {
                    if let Some(idx) = frame.path.iter().position(|n| n == neighbor) {
                        let mut cycle = frame.path[idx..].to_vec();
                        cycle.push(neighbor.clone());
                        tracing::debug!(length = cycle.len() - 1, "cycle detected");
                        cycles.push(cycle);
                    }
                    continue;
                }
                if visited.contains(neighbor) {
                    continue;
                }

                let mut path = frame.path.clone();
                path.push(neighbor.clone());
                visited.insert(neighbor.clone());
                on_path.insert(neighbor.clone());
                stack.push(Frame {
                    node: neighbor.clone(),
                    path,
                    next: 0,
                });
            }
        }

        cycles
    }

    /// Nodes with the most dependents, highest first
    pub fn most_depended_upon(graph: &DependencyGraph, limit: usize) -> Vec<(Identifier, usize)> {
        Self::ranked(graph, limit, |id| graph.in_degree(id))
    }

    /// Nodes declaring the most dependencies, highest first
    pub fn most_dependencies(graph: &DependencyGraph, limit: usize) -> Vec<(Identifier, usize)> {
        Self::ranked(graph, limit, |id| graph.out_degree(id))
    }

    fn ranked<F>(graph: &DependencyGraph, limit: usize, degree: F) -> Vec<(Identifier, usize)>
    where
        F: Fn(&Identifier) -> usize,
    {
        let mut ranked: Vec<(Identifier, usize)> = graph
            .nodes()
            .map(|id| (id.clone(), degree(id)))
            .filter(|(_, count)| *count > 0)
            .collect();
        // Stable sort keeps identifier order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}
