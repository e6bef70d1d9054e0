//! Co-usage graph implementation using petgraph.
//!
//! Nodes are declared packages; an undirected edge joins two packages that
//! both carry usage evidence in at least one common file.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, HashMap};

/// An undirected graph of packages used side by side.
///
/// Edge weights count the files the two packages share.
///
/// # Example
///
/// ```rust
/// use usagescope::graph::UsageGraph;
///
/// let mut graph = UsageGraph::new();
/// graph.add_package("react");
/// graph.add_package("react-dom");
/// graph.add_package("lodash");
///
/// graph.record_file(&["react", "react-dom"]);
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.neighbors("react"), vec!["react-dom".to_string()]);
/// assert!(graph.neighbors("lodash").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct UsageGraph {
    /// The underlying undirected graph
    graph: UnGraph<String, usize>,
    /// Maps package names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl Default for UsageGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_indices: HashMap::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a package node, returning the existing index if already present.
    pub fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Records that the given packages were all used in one file.
    ///
    /// Every pair gets an edge, or has its shared-file count bumped.
    /// Names that were never added as packages are ignored.
    ///
    /// # Arguments
    ///
    /// * `packages` - Packages with evidence in the file, duplicates allowed
    pub fn record_file<S: AsRef<str>>(&mut self, packages: &[S]) {
        let mut indices: Vec<NodeIndex> = packages
            .iter()
            .filter_map(|name| self.node_indices.get(name.as_ref()).copied())
            .collect();
        indices.sort();
        indices.dedup();

        for (i, &a) in indices.iter().enumerate() {
            for &b in &indices[i + 1..] {
                match self.graph.find_edge(a, b) {
                    Some(edge) => {
                        if let Some(weight) = self.graph.edge_weight_mut(edge) {
                            *weight += 1;
                        }
                    }
                    None => {
                        self.graph.add_edge(a, b, 1);
                    }
                }
            }
        }
    }

    /// Packages sharing at least one file with `name`, sorted by name.
    pub fn neighbors(&self, name: &str) -> Vec<String> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        let mut names: Vec<String> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Number of files in which both packages have evidence.
    pub fn shared_file_count(&self, a: &str, b: &str) -> usize {
        let (Some(&ia), Some(&ib)) = (self.node_indices.get(a), self.node_indices.get(b)) else {
            return 0;
        };
        self.graph
            .find_edge(ia, ib)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of packages in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of co-usage edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Adjacency lists keyed by package name, one entry per package.
    pub fn to_adjacency(&self) -> BTreeMap<String, Vec<String>> {
        self.node_indices
            .keys()
            .map(|name| (name.clone(), self.neighbors(name)))
            .collect()
    }
}
