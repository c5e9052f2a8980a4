//! Single-source shortest paths (Dijkstra) with an indexed frontier.
//!
//! The frontier is a [`HeapMinQueue`] keyed by vertex id, so relaxing an edge
//! lowers the tentative distance of a queued vertex in place rather than
//! pushing a duplicate entry.
//!
//! Search state is kept only for vertices the search has reached, so a search
//! that stops early costs in proportion to what it explored, not to the size
//! of the graph.
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//! use lasso_graph::{AdjacencyList, ShortestPaths};
//!
//! let mut graph = AdjacencyList::new(4);
//! graph.add_edge(0, 1, 5);
//! graph.add_edge(0, 2, 1);
//! graph.add_edge(2, 1, 1);
//! graph.add_edge(1, 3, 1);
//!
//! let mut paths = ShortestPaths::new(&graph);
//! paths.search(0, Some(3), |_, _| ControlFlow::Continue(())).unwrap();
//! assert_eq!(paths.distance(3), Some(3));
//! assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
//! ```

use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use crate::SEARCH_TARGET;
use crate::error::SearchError;
use crate::graph::Graph;
use crate::min_queue::{HeapMinQueue, MinQueue};

/// Best distance found so far and the vertex it was reached from.
#[derive(Debug, Clone, Copy)]
struct Label {
    distance: i64,
    predecessor: Option<usize>,
}

/// Shortest-path tree grown from one source vertex.
pub struct ShortestPaths<'g, G: Graph + ?Sized> {
    graph: &'g G,
    vertex_count: usize,
    source: Option<usize>,
    /// Reached vertices only.
    labels: HashMap<usize, Label>,
    settled: HashSet<usize>,
}

impl<'g, G: Graph + ?Sized> ShortestPaths<'g, G> {
    /// Prepare a search over `graph`. Allocates nothing per vertex.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            vertex_count: graph.vertex_count(),
            source: None,
            labels: HashMap::new(),
            settled: HashSet::new(),
        }
    }

    /// The source of the last search.
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    /// Number of vertices whose distance is final.
    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// Number of vertices the last search assigned a distance to, settled or
    /// still on the frontier.
    pub fn reached_count(&self) -> usize {
        self.labels.len()
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), SearchError> {
        let vertex_count = self.vertex_count;
        if vertex < vertex_count {
            Ok(())
        } else {
            Err(SearchError::VertexOutOfRange {
                vertex,
                vertex_count,
            })
        }
    }

    /// Run Dijkstra from `source`.
    ///
    /// With a `target`, the search stops as soon as the target is settled;
    /// otherwise it settles every reachable vertex. After each vertex is
    /// settled, `observer(settled, vertex_count)` is called; returning
    /// `ControlFlow::Break` stops the search with [`SearchError::Aborted`]
    /// and leaves the vertices settled so far queryable.
    ///
    /// Any previous search result is discarded.
    pub fn search<F>(
        &mut self,
        source: usize,
        target: Option<usize>,
        mut observer: F,
    ) -> Result<(), SearchError>
    where
        F: FnMut(usize, usize) -> ControlFlow<()>,
    {
        self.check_vertex(source)?;
        if let Some(target) = target {
            self.check_vertex(target)?;
        }
        self.reset(source);

        let total = self.vertex_count;
        let mut frontier = HeapMinQueue::new();
        let mut edges = Vec::new();
        self.labels.insert(
            source,
            Label {
                distance: 0,
                predecessor: None,
            },
        );
        frontier.add_or_update(source, 0);

        while let Ok(vertex) = frontier.remove() {
            self.settled.insert(vertex);

            if target == Some(vertex) {
                tracing::trace!(
                    target: SEARCH_TARGET,
                    source,
                    vertex,
                    settled = self.settled.len(),
                    "target settled"
                );
                return Ok(());
            }

            edges.clear();
            self.graph.neighbors(vertex, &mut edges);
            let base = self.labels.get(&vertex).map_or(i64::MAX, |l| l.distance);
            for &(next, weight) in &edges {
                debug_assert!(weight >= 0, "negative edge weight");
                if self.settled.contains(&next) {
                    continue;
                }
                let candidate = base.saturating_add(weight);
                let known = self.labels.get(&next).map_or(i64::MAX, |l| l.distance);
                if candidate < known {
                    self.labels.insert(
                        next,
                        Label {
                            distance: candidate,
                            predecessor: Some(vertex),
                        },
                    );
                    frontier.add_or_update(next, candidate);
                }
            }

            if observer(self.settled.len(), total).is_break() {
                tracing::debug!(
                    target: SEARCH_TARGET,
                    source,
                    settled = self.settled.len(),
                    "search aborted by observer"
                );
                return Err(SearchError::Aborted);
            }
        }

        match target {
            Some(target) => Err(SearchError::Unreachable { target }),
            None => Ok(()),
        }
    }

    fn reset(&mut self, source: usize) {
        self.source = Some(source);
        self.labels.clear();
        self.settled.clear();
    }

    /// Whether the distance to `vertex` is final.
    pub fn is_settled(&self, vertex: usize) -> bool {
        self.settled.contains(&vertex)
    }

    /// Final distance from the source to `vertex`, if settled.
    pub fn distance(&self, vertex: usize) -> Option<i64> {
        if !self.is_settled(vertex) {
            return None;
        }
        self.labels.get(&vertex).map(|l| l.distance)
    }

    /// Vertices from the source to `vertex` inclusive, if settled.
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        if !self.is_settled(vertex) {
            return None;
        }
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(previous) = self.labels.get(&current).and_then(|l| l.predecessor) {
            current = previous;
            path.push(current);
        }
        path.reverse();
        debug_assert_eq!(path.first().copied(), self.source);
        Some(path)
    }
}
