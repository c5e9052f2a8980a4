//! Priority queues and shortest paths for Lasso.
//!
//! - [`HeapMinQueue`]: an indexed binary min-heap with O(log n) priority
//!   updates for arbitrary keys
//! - [`ShortestPaths`]: Dijkstra over any [`Graph`], cancellable through an
//!   observer callback
//! - [`ImageGraph`]: the pixel cost graph that makes shortest paths follow
//!   image edges
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//! use image::{Rgba, RgbaImage};
//! use lasso_graph::{CostModel, ImageGraph, ShortestPaths};
//!
//! let image = RgbaImage::from_pixel(16, 16, Rgba([128, 128, 128, 255]));
//! let graph = ImageGraph::new(&image, CostModel::CrossGradMono);
//!
//! let source = graph.vertex(0, 0).unwrap();
//! let target = graph.vertex(15, 15).unwrap();
//! let mut paths = ShortestPaths::new(&graph);
//! paths.search(source, Some(target), |_, _| ControlFlow::Continue(())).unwrap();
//! assert_eq!(paths.path_to(target).unwrap().len(), 16);
//! ```

/// `tracing` target for graph construction and shortest-path searches.
pub const SEARCH_TARGET: &str = "lasso_graph::search";

mod error;
pub mod graph;
pub mod image_graph;
pub mod min_queue;
pub mod shortest_paths;

pub use error::{QueueError, SearchError};
pub use graph::{AdjacencyList, Graph};
pub use image_graph::{CostModel, ImageGraph};
pub use min_queue::{HeapMinQueue, MinQueue};
pub use shortest_paths::ShortestPaths;

#[cfg(test)]
mod tests {
    #[test]
    fn test_search_target_is_under_crate_name() {
        let (krate, _) = super::SEARCH_TARGET.split_once("::").unwrap();
        assert_eq!(krate, env!("CARGO_CRATE_NAME"));
    }
}
