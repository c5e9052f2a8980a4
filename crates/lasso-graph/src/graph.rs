//! Weighted directed graphs over dense vertex ids.

/// A directed graph with non-negative integer edge weights.
///
/// Vertices are identified by `0..vertex_count()`.
pub trait Graph {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Append every `(neighbor, weight)` edge leaving `vertex` to `out`.
    fn neighbors(&self, vertex: usize, out: &mut Vec<(usize, i64)>);
}

/// A graph stored as adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    edges: Vec<Vec<(usize, i64)>>,
}

impl AdjacencyList {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); vertex_count],
        }
    }

    /// Add a directed edge.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of range or `weight` is negative.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: i64) {
        assert!(weight >= 0, "edge weights must be non-negative");
        assert!(to < self.edges.len(), "edge target out of range");
        self.edges[from].push((to, weight));
    }

    /// Add edges in both directions.
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, weight: i64) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }
}

impl Graph for AdjacencyList {
    fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    fn neighbors(&self, vertex: usize, out: &mut Vec<(usize, i64)>) {
        out.extend_from_slice(&self.edges[vertex]);
    }
}
