//! Intelligent scissors: segments that follow image edges.
//!
//! The image is turned into an [`ImageGraph`] whose edges are cheap along
//! strong intensity changes. Committed segments are found by a background
//! Dijkstra search; live-wire previews run the same search synchronously but
//! give up after a bounded number of settled pixels. Search state grows with
//! the pixels explored, so a preview's cost does not depend on image size.

use std::ops::ControlFlow;
use std::sync::Arc;

use image::RgbaImage;
use lasso_core::BackgroundTask;
use lasso_core::logging::targets;
use lasso_graph::{CostModel, ImageGraph, SearchError, ShortestPaths};

use crate::error::{Result, SelectionError};
use crate::geometry::{Point, PolyLine};
use crate::options::SearchOptions;
use crate::strategy::{Extension, SelectionStrategy};

/// Path-search strategy over an image cost graph.
#[derive(Debug, Clone)]
pub struct Scissors {
    cost_model: CostModel,
    graph: Option<Arc<ImageGraph>>,
}

impl Scissors {
    /// A strategy without an image. Segments stay straight until
    /// [`set_image`](SelectionStrategy::set_image) is called.
    pub fn new(cost_model: CostModel) -> Self {
        Self {
            cost_model,
            graph: None,
        }
    }

    /// A strategy for `image`.
    pub fn with_image(cost_model: CostModel, image: &RgbaImage) -> Self {
        Self {
            cost_model,
            graph: Some(Arc::new(ImageGraph::new(image, cost_model))),
        }
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// The cost graph of the current image.
    pub fn graph(&self) -> Option<&Arc<ImageGraph>> {
        self.graph.as_ref()
    }
}

fn vertex_of(graph: &ImageGraph, point: Point) -> Option<usize> {
    graph.clamp_vertex(point.x as i64, point.y as i64)
}

/// Approximate number of pixels settled before `target` is: the square of
/// 8-connected steps around `source` that reaches `target`, clipped to the
/// image.
fn expected_settled(graph: &ImageGraph, source: usize, target: usize) -> usize {
    let (sx, sy) = graph.pixel(source);
    let (tx, ty) = graph.pixel(target);
    let reach = sx.abs_diff(tx).max(sy.abs_diff(ty));
    let span = |centre: u32, size: u32| {
        let low = centre.saturating_sub(reach);
        let high = centre.saturating_add(reach).min(size.saturating_sub(1));
        (high - low) as usize + 1
    };
    span(sx, graph.width()) * span(sy, graph.height())
}

/// Turn a vertex path into a segment that starts at `from` and ends at `to`
/// exactly, even when either lies outside the image.
fn path_segment(graph: &ImageGraph, path: &[usize], from: Point, to: Point) -> PolyLine {
    if path.len() < 2 {
        return PolyLine::line(from, to);
    }
    let mut points: Vec<Point> = path
        .iter()
        .map(|&v| {
            let (x, y) = graph.pixel(v);
            Point::new(x as i32, y as i32)
        })
        .collect();
    let last = points.len() - 1;
    points[0] = from;
    points[last] = to;
    PolyLine::from_points(points)
}

impl SelectionStrategy for Scissors {
    fn name(&self) -> &str {
        match self.cost_model {
            CostModel::CrossGradMono => "Intelligent scissors (gray)",
            CostModel::Color => "Intelligent scissors (color)",
        }
    }

    fn live_wire(&self, from: Point, to: Point, options: &SearchOptions) -> PolyLine {
        let Some(graph) = self.graph.as_deref() else {
            return PolyLine::line(from, to);
        };
        let (Some(source), Some(target)) = (vertex_of(graph, from), vertex_of(graph, to)) else {
            return PolyLine::line(from, to);
        };

        let budget = options.live_wire_budget;
        let mut paths = ShortestPaths::new(graph);
        let result = paths.search(source, Some(target), |settled, _| {
            if settled >= budget {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        match result.ok().and_then(|()| paths.path_to(target)) {
            Some(path) => path_segment(graph, &path, from, to),
            None => {
                tracing::trace!(
                    target: targets::SCISSORS,
                    %from,
                    %to,
                    budget,
                    "live wire over budget, drawing straight line"
                );
                PolyLine::line(from, to)
            }
        }
    }

    fn append_to_selection(
        &mut self,
        from: Point,
        to: Point,
        options: &SearchOptions,
    ) -> Result<Extension> {
        let graph = self.graph.clone().ok_or(SelectionError::NoImage)?;
        let (Some(source), Some(target)) = (vertex_of(&graph, from), vertex_of(&graph, to)) else {
            return Err(SelectionError::NoImage);
        };

        let interval = options.cancel_check_interval.max(1);
        let expected = expected_settled(&graph, source, target);
        tracing::debug!(
            target: targets::SCISSORS,
            %from,
            %to,
            expected,
            cost_model = self.cost_model.name(),
            "starting path search"
        );

        let task = BackgroundTask::spawn(&options.task, move |ctx| {
            let mut paths = ShortestPaths::new(&*graph);
            let result = paths.search(source, Some(target), |settled, _| {
                if settled % interval != 0 {
                    return ControlFlow::Continue(());
                }
                if ctx.is_cancelled() {
                    return ControlFlow::Break(());
                }
                // Stays below 100 until the path is known.
                ctx.report(settled.min(expected - 1), expected);
                ControlFlow::Continue(())
            });

            match result {
                Ok(()) => {
                    ctx.report(1, 1);
                    let path = paths.path_to(target).unwrap_or_default();
                    Some(Ok(path_segment(&graph, &path, from, to)))
                }
                Err(SearchError::Aborted) => None,
                Err(err) => Some(Err(err)),
            }
        })?;

        Ok(Extension::Deferred(task))
    }

    fn set_image(&mut self, image: Option<&Arc<RgbaImage>>) {
        self.graph = image.map(|image| Arc::new(ImageGraph::new(image, self.cost_model)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use lasso_core::TaskEvent;

    /// Dark left half, bright right half, boundary between columns 4 and 5.
    fn split_image() -> RgbaImage {
        RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgba([10, 10, 10, 255])
            } else {
                Rgba([240, 240, 240, 255])
            }
        })
    }

    fn finish(task: &mut crate::strategy::SearchTask) -> Option<PolyLine> {
        while let Some(event) = task.next_event() {
            match event {
                TaskEvent::Progress(_) => continue,
                TaskEvent::Finished(result) => return result.ok(),
                TaskEvent::Aborted => return None,
            }
        }
        None
    }

    #[test]
    fn test_without_image() {
        let mut scissors = Scissors::new(CostModel::CrossGradMono);
        let options = SearchOptions::default();
        let (a, b) = (Point::new(0, 0), Point::new(5, 5));

        assert_eq!(scissors.live_wire(a, b, &options), PolyLine::line(a, b));
        assert!(matches!(
            scissors.append_to_selection(a, b, &options),
            Err(SelectionError::NoImage)
        ));
    }

    #[test]
    fn test_search_follows_boundary() {
        let mut scissors = Scissors::with_image(CostModel::CrossGradMono, &split_image());
        let options = SearchOptions::default().with_cancel_check_interval(4);
        let (a, b) = (Point::new(4, 0), Point::new(4, 9));

        let Extension::Deferred(mut task) = scissors.append_to_selection(a, b, &options).unwrap()
        else {
            panic!("scissors with an image always defers");
        };
        let segment = finish(&mut task).unwrap();

        assert_eq!(segment.start(), a);
        assert_eq!(segment.end(), b);
        assert!(segment.points().iter().all(|p| p.x == 4 || p.x == 5));
        assert_eq!(segment, scissors.live_wire(a, b, &options));
    }

    #[test]
    fn test_endpoints_outside_image_are_kept() {
        let scissors = Scissors::with_image(CostModel::Color, &split_image());
        let options = SearchOptions::default();
        let (a, b) = (Point::new(-3, 2), Point::new(20, 2));

        let segment = scissors.live_wire(a, b, &options);
        assert_eq!(segment.start(), a);
        assert_eq!(segment.end(), b);
    }

    #[test]
    fn test_live_wire_budget_falls_back_to_line() {
        let scissors = Scissors::with_image(CostModel::CrossGradMono, &split_image());
        let options = SearchOptions::default().with_live_wire_budget(3);
        let (a, b) = (Point::new(0, 0), Point::new(9, 9));

        assert_eq!(scissors.live_wire(a, b, &options), PolyLine::line(a, b));
    }

    #[test]
    fn test_expected_settled_is_clipped_square() {
        let graph = ImageGraph::new(&split_image(), CostModel::CrossGradMono);
        let at = |x, y| graph.vertex(x, y).unwrap();

        assert_eq!(expected_settled(&graph, at(5, 5), at(5, 5)), 1);
        assert_eq!(expected_settled(&graph, at(5, 5), at(7, 4)), 25);
        assert_eq!(expected_settled(&graph, at(0, 0), at(2, 1)), 9);
        assert_eq!(expected_settled(&graph, at(0, 0), at(9, 9)), 100);
    }

    #[test]
    fn test_progress_climbs_before_finishing() {
        let image = RgbaImage::from_pixel(64, 64, Rgba([90, 90, 90, 255]));
        let mut scissors = Scissors::with_image(CostModel::CrossGradMono, &image);
        let options = SearchOptions::default().with_cancel_check_interval(16);
        let (a, b) = (Point::new(0, 0), Point::new(20, 20));

        let Extension::Deferred(mut task) = scissors.append_to_selection(a, b, &options).unwrap()
        else {
            panic!("scissors with an image always defers");
        };
        let mut reported = Vec::new();
        while let Some(event) = task.next_event() {
            match event {
                TaskEvent::Progress(percent) => reported.push(percent),
                TaskEvent::Finished(_) | TaskEvent::Aborted => break,
            }
        }

        assert_eq!(reported.last(), Some(&100));
        assert!(reported.iter().any(|&p| p >= 50 && p < 100));
    }

    #[test]
    fn test_set_image() {
        let mut scissors = Scissors::new(CostModel::Color);
        assert!(scissors.graph().is_none());
        scissors.set_image(Some(&Arc::new(split_image())));
        assert_eq!(scissors.graph().map(|g| g.width()), Some(10));
        scissors.set_image(None);
        assert!(scissors.graph().is_none());
        assert_eq!(scissors.name(), "Intelligent scissors (color)");
    }
}
