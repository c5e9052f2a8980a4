//! How boundary segments are produced.
//!
//! A [`SelectionStrategy`] turns two points into the segment connecting them.
//! Cheap strategies answer immediately with [`Extension::Ready`]; expensive
//! ones start a background [`SearchTask`] and answer with
//! [`Extension::Deferred`], which moves the model into `Processing` until the
//! task finishes.

use std::sync::Arc;

use image::RgbaImage;
use lasso_core::BackgroundTask;
use lasso_graph::SearchError;

use crate::error::Result;
use crate::geometry::{self, Point, PolyLine};
use crate::options::SearchOptions;

/// A background search producing one segment.
pub type SearchTask = BackgroundTask<std::result::Result<PolyLine, SearchError>>;

/// The answer to a request for a new segment.
#[derive(Debug)]
pub enum Extension {
    /// The segment is available now.
    Ready(PolyLine),
    /// The segment is being computed.
    Deferred(SearchTask),
}

/// Produces the segments of a selection boundary.
pub trait SelectionStrategy: Send {
    /// Human readable name.
    fn name(&self) -> &str;

    /// Preview segment from `from` to `to`. Never fails and never blocks for
    /// longer than the configured budget.
    fn live_wire(&self, from: Point, to: Point, options: &SearchOptions) -> PolyLine;

    /// The segment to append when the user commits `to`.
    fn append_to_selection(
        &mut self,
        from: Point,
        to: Point,
        options: &SearchOptions,
    ) -> Result<Extension>;

    /// Move vertex `index` of a closed selection to `new_pos`.
    fn relocate(&self, selection: &mut [PolyLine], index: usize, new_pos: Point) {
        geometry::relocate_vertex(selection, index, new_pos);
    }

    /// Polygon enclosed by a closed selection.
    fn boundary(&self, selection: &[PolyLine]) -> Vec<Point> {
        geometry::boundary(selection)
    }

    /// The image being selected from changed.
    fn set_image(&mut self, _image: Option<&Arc<RgbaImage>>) {}
}

static_assertions::assert_obj_safe!(SelectionStrategy);
