//! The straight-line strategy.
//!
//! Segments join consecutive points directly and are committed at once, so a
//! model using [`PointToPoint`] never enters `Processing`.

use crate::error::Result;
use crate::geometry::{Point, PolyLine};
use crate::options::SearchOptions;
use crate::strategy::{Extension, SelectionStrategy};

/// Connects points with straight lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointToPoint;

impl PointToPoint {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for PointToPoint {
    fn name(&self) -> &str {
        "Point-to-point"
    }

    fn live_wire(&self, from: Point, to: Point, _options: &SearchOptions) -> PolyLine {
        PolyLine::line(from, to)
    }

    fn append_to_selection(
        &mut self,
        from: Point,
        to: Point,
        _options: &SearchOptions,
    ) -> Result<Extension> {
        Ok(Extension::Ready(PolyLine::line(from, to)))
    }
}
