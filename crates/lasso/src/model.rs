//! The selection state machine.
//!
//! A [`SelectionModel`] owns the boundary being drawn, its undo history and
//! the strategy that produces new segments. It is driven from a single thread
//! (usually the UI thread). Path searches run on a background thread; their
//! progress and results reach the model only when the owner calls
//! [`poll`](SelectionModel::poll) or
//! [`wait_for_processing`](SelectionModel::wait_for_processing).
//!
//! # Example
//!
//! ```
//! use lasso::{ModelOptions, Point, SelectionModel, SelectionState};
//!
//! let mut model = SelectionModel::point_to_point(ModelOptions::default());
//! model.add_point(Point::new(0, 0)).unwrap();
//! model.add_point(Point::new(10, 0)).unwrap();
//! model.add_point(Point::new(10, 10)).unwrap();
//! model.finish_selection().unwrap();
//!
//! assert_eq!(model.state(), SelectionState::Selected);
//! assert_eq!(model.selection().len(), 3);
//!
//! model.undo().unwrap();
//! assert_eq!(model.state(), SelectionState::Selecting);
//! assert_eq!(model.selection().len(), 2);
//! ```

use std::io::Write;
use std::sync::Arc;

use image::RgbaImage;
use lasso_core::logging::targets;
use lasso_core::{TaskEvent, ThreadAffinity};
use lasso_graph::{CostModel, SearchError};

use crate::error::{Result, SelectionError};
use crate::events::{PropertyChange, PropertyChangeSupport, PropertyConnection, PropertyName};
use crate::export;
use crate::geometry::{Point, PolyLine};
use crate::history::{History, Snapshot};
use crate::options::ModelOptions;
use crate::point_to_point::PointToPoint;
use crate::scissors::Scissors;
use crate::state::SelectionState;
use crate::strategy::{Extension, SearchTask, SelectionStrategy};

/// An in-flight search and what to do with its result.
#[derive(Debug)]
struct Processing {
    search: SearchTask,
    /// The segment closes the loop.
    closing: bool,
    /// Committed state to return to if the search does not complete.
    resume: SelectionState,
}

/// Result of draining search events.
enum Outcome {
    Pending,
    Done(std::result::Result<PolyLine, SearchError>),
    Aborted,
}

/// Interactive boundary selection.
pub struct SelectionModel {
    selection: Vec<PolyLine>,
    start: Option<Point>,
    state: SelectionState,
    history: History,
    image: Option<Arc<RgbaImage>>,
    strategy: Box<dyn SelectionStrategy>,
    pending: Option<Processing>,
    options: ModelOptions,
    events: PropertyChangeSupport,
    affinity: ThreadAffinity,
}

impl SelectionModel {
    /// An empty model using `strategy`.
    pub fn new(strategy: impl SelectionStrategy + 'static, options: ModelOptions) -> Self {
        Self::with_strategy(Box::new(strategy), options)
    }

    /// An empty model using a boxed strategy.
    pub fn with_strategy(strategy: Box<dyn SelectionStrategy>, options: ModelOptions) -> Self {
        Self {
            selection: Vec::new(),
            start: None,
            state: SelectionState::NoSelection,
            history: History::new(options.history_limit),
            image: None,
            strategy,
            pending: None,
            events: PropertyChangeSupport::new(options.notify_on_ui_thread),
            options,
            affinity: ThreadAffinity::current(),
        }
    }

    /// An empty model drawing straight segments.
    pub fn point_to_point(options: ModelOptions) -> Self {
        Self::new(PointToPoint::new(), options)
    }

    /// An empty model whose segments follow image edges.
    pub fn scissors(cost_model: CostModel, options: ModelOptions) -> Self {
        Self::new(Scissors::new(cost_model), options)
    }

    /// A model continuing `previous` with a different strategy.
    ///
    /// The committed selection, history, image and options are copied.
    /// A search running in `previous` is not carried over, and neither are
    /// its listeners.
    pub fn from_model(previous: &SelectionModel, strategy: impl SelectionStrategy + 'static) -> Self {
        let mut strategy: Box<dyn SelectionStrategy> = Box::new(strategy);
        strategy.set_image(previous.image.as_ref());

        let mut model = Self::with_strategy(strategy, previous.options.clone());
        model.selection = previous.selection.clone();
        model.start = previous.start;
        model.state = previous.committed_state();
        model.history = previous.history.clone();
        model.image = previous.image.clone();

        tracing::debug!(
            target: targets::MODEL,
            strategy = model.strategy.name(),
            state = %model.state,
            segments = model.selection.len(),
            "model created from previous model"
        );
        model
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// A copy of the committed segments.
    pub fn selection(&self) -> Vec<PolyLine> {
        self.selection.clone()
    }

    /// The committed segments.
    pub fn segments(&self) -> &[PolyLine] {
        &self.selection
    }

    /// Anchor of the loop.
    pub fn start_point(&self) -> Option<Point> {
        self.start
    }

    /// End of the last segment, or the anchor if there is none.
    pub fn last_point(&self) -> Option<Point> {
        self.selection.last().map(PolyLine::end).or(self.start)
    }

    /// Index of the segment whose start is nearest to `point`, if it lies
    /// within `sqrt(max_distance_sq)`.
    pub fn closest_point(&self, point: Point, max_distance_sq: i64) -> Option<usize> {
        self.selection
            .iter()
            .enumerate()
            .map(|(index, segment)| (index, segment.start().distance_sq(point)))
            .filter(|&(_, d)| d <= max_distance_sq)
            .min_by_key(|&(_, d)| d)
            .map(|(index, _)| index)
    }

    /// Polygon enclosed by the selection, as the strategy sees it.
    pub fn boundary(&self) -> Vec<Point> {
        self.strategy.boundary(&self.selection)
    }

    /// The image being selected from, if any.
    pub fn image(&self) -> Option<&Arc<RgbaImage>> {
        self.image.as_ref()
    }

    /// Display name of the active strategy.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Options the model was built with.
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Whether [`undo`](Self::undo) would change anything.
    pub fn can_undo(&self) -> bool {
        self.state == SelectionState::Processing || !self.history.is_empty()
    }

    /// Number of undo snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether a path search is running.
    pub fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Attach a listener to `property`.
    pub fn connect<F>(&self, property: PropertyName, listener: F) -> PropertyConnection
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.events.connect(property, listener)
    }

    /// Detach a listener.
    pub fn disconnect(&self, connection: PropertyConnection) -> bool {
        self.events.disconnect(connection)
    }

    /// The property-change bus.
    pub fn events(&self) -> &PropertyChangeSupport {
        &self.events
    }

    /// Re-bind the model to the calling thread after moving it.
    pub fn rebind_thread(&mut self) {
        self.affinity.rebind();
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Begin a new boundary at `point`.
    pub fn start(&mut self, point: Point) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        self.require(SelectionState::NoSelection, "start a selection")?;

        self.record();
        self.start = Some(point);
        self.selection.clear();
        tracing::debug!(target: targets::MODEL, %point, "selection started");
        self.set_state(SelectionState::Selecting);
        Ok(())
    }

    /// Extend the boundary to `point`, starting it if there is none.
    pub fn add_point(&mut self, point: Point) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        match self.state {
            SelectionState::NoSelection => self.start(point),
            SelectionState::Selecting => self.extend(point, false),
            state => Err(self.rejected("add a point", state)),
        }
    }

    /// Close the boundary back to its start.
    ///
    /// With no segment drawn yet there is nothing to close and the model is
    /// reset instead.
    pub fn finish_selection(&mut self) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        self.require(SelectionState::Selecting, "finish the selection")?;

        match self.start {
            Some(start) if !self.selection.is_empty() => self.extend(start, true),
            _ => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Preview the segment from the last point to `point`.
    pub fn live_wire(&self, point: Point) -> Result<PolyLine> {
        self.affinity.debug_assert_same_thread();
        self.require(SelectionState::Selecting, "preview a segment")?;

        let from = self.last_point().unwrap_or(point);
        Ok(self.strategy.live_wire(from, point, &self.options.search))
    }

    /// Restore the previous committed selection.
    ///
    /// While a search runs, undo cancels it instead. Without history this
    /// does nothing.
    pub fn undo(&mut self) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        if self.state == SelectionState::Processing {
            self.cancel_processing();
            return Ok(());
        }

        let Some(snapshot) = self.history.pop() else {
            tracing::trace!(target: targets::MODEL, "nothing to undo");
            return Ok(());
        };
        tracing::debug!(
            target: targets::MODEL,
            from = %self.state,
            to = %snapshot.state,
            "undo"
        );
        self.selection = snapshot.selection;
        self.start = snapshot.start;
        self.fire_selection();
        self.set_state(snapshot.state);
        Ok(())
    }

    /// Discard the selection and its history, cancelling any running search.
    pub fn reset(&mut self) {
        self.affinity.debug_assert_same_thread();
        if let Some(processing) = self.pending.take() {
            processing.search.cancel();
        }
        self.history.clear();
        self.start = None;
        if !self.selection.is_empty() {
            self.selection.clear();
            self.fire_selection();
        }
        self.set_state(SelectionState::NoSelection);
    }

    /// Stop the running search and return to the last committed state.
    ///
    /// Does nothing unless a search is running.
    pub fn cancel_processing(&mut self) {
        self.affinity.debug_assert_same_thread();
        let Some(processing) = self.pending.take() else {
            return;
        };
        processing.search.cancel();
        tracing::debug!(target: targets::MODEL, "path search cancelled");
        self.set_state(processing.resume);
    }

    /// Move the start of segment `index` of a closed selection to `point`.
    pub fn move_point(&mut self, index: usize, point: Point) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        self.require(SelectionState::Selected, "move a point")?;
        let len = self.selection.len();
        if index >= len {
            tracing::warn!(target: targets::MODEL, index, len, "point index out of range");
            return Err(SelectionError::InvalidIndex { index, len });
        }

        self.record();
        self.strategy.relocate(&mut self.selection, index, point);
        if index == 0 {
            self.start = Some(point);
        }
        tracing::debug!(target: targets::MODEL, index, %point, "point moved");
        self.fire_selection();
        Ok(())
    }

    /// Replace the image being selected from.
    ///
    /// The selection refers to the old image and is reset.
    pub fn set_image(&mut self, image: Option<Arc<RgbaImage>>) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        if self.state == SelectionState::Processing {
            return Err(self.rejected("change the image", self.state));
        }

        self.reset();
        self.strategy.set_image(image.as_ref());
        tracing::debug!(
            target: targets::MODEL,
            dimensions = ?image.as_ref().map(|i| i.dimensions()),
            "image changed"
        );
        self.image = image;
        Ok(())
    }

    /// Apply whatever the running search has produced so far.
    ///
    /// Progress is forwarded as `progress` changes. A finished search commits
    /// its segment; a cancelled one reverts to the committed state. Returns
    /// the search error if the search failed.
    pub fn poll(&mut self) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        let outcome = self.drain(false);
        self.settle(outcome)
    }

    /// Block until the running search ends, then apply its outcome.
    pub fn wait_for_processing(&mut self) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        let outcome = self.drain(true);
        self.settle(outcome)
    }

    /// Write the selected region of the image to `sink` as PNG.
    pub fn save_selection<W: Write>(&self, sink: W) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        self.require(SelectionState::Selected, "save the selection")?;
        let image = self.image.as_deref().ok_or(SelectionError::NoImage)?;
        export::write_png(image, &self.boundary(), sink)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn committed_state(&self) -> SelectionState {
        self.pending.as_ref().map_or(self.state, |p| p.resume)
    }

    fn require(&self, expected: SelectionState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.rejected(operation, self.state))
        }
    }

    fn rejected(&self, operation: &'static str, state: SelectionState) -> SelectionError {
        tracing::warn!(target: targets::MODEL, operation, %state, "operation rejected");
        SelectionError::invalid_state(operation, state)
    }

    fn record(&mut self) {
        self.history.record(Snapshot {
            selection: self.selection.clone(),
            start: self.start,
            state: self.committed_state(),
        });
    }

    fn set_state(&mut self, state: SelectionState) {
        if self.state == state {
            return;
        }
        tracing::debug!(target: targets::MODEL, from = %self.state, to = %state, "state changed");
        self.state = state;
        self.events.fire(PropertyChange::State(state));
    }

    fn fire_selection(&self) {
        self.events
            .fire(PropertyChange::Selection(self.selection.clone()));
    }

    fn extend(&mut self, target: Point, closing: bool) -> Result<()> {
        let from = self.last_point().unwrap_or(target);
        match self
            .strategy
            .append_to_selection(from, target, &self.options.search)?
        {
            Extension::Ready(segment) => {
                self.commit(segment, closing);
            }
            Extension::Deferred(search) => {
                tracing::debug!(target: targets::MODEL, %from, %target, closing, "waiting for path search");
                self.pending = Some(Processing {
                    search,
                    closing,
                    resume: self.state,
                });
                self.set_state(SelectionState::Processing);
                self.events.fire(PropertyChange::Progress(0));
            }
        }
        Ok(())
    }

    fn commit(&mut self, segment: PolyLine, closing: bool) {
        debug_assert_eq!(Some(segment.start()), self.last_point());
        self.record();
        self.selection.push(segment);
        self.fire_selection();
        self.set_state(if closing {
            SelectionState::Selected
        } else {
            SelectionState::Selecting
        });
    }

    fn drain(&mut self, block: bool) -> Outcome {
        let Some(processing) = self.pending.as_mut() else {
            return Outcome::Pending;
        };

        let mut progress = Vec::new();
        let outcome = loop {
            let event = if block {
                processing.search.next_event()
            } else {
                processing.search.try_event()
            };
            match event {
                Some(TaskEvent::Progress(percent)) => progress.push(percent),
                Some(TaskEvent::Finished(result)) => break Outcome::Done(result),
                Some(TaskEvent::Aborted) => break Outcome::Aborted,
                None if block => break Outcome::Aborted,
                None => break Outcome::Pending,
            }
        };

        for percent in progress {
            self.events.fire(PropertyChange::Progress(percent));
        }
        outcome
    }

    fn settle(&mut self, outcome: Outcome) -> Result<()> {
        let result = match outcome {
            Outcome::Pending => return Ok(()),
            Outcome::Done(result) => Some(result),
            Outcome::Aborted => None,
        };
        let Some(processing) = self.pending.take() else {
            return Ok(());
        };

        match result {
            Some(Ok(segment)) => {
                tracing::debug!(
                    target: targets::MODEL,
                    points = segment.len(),
                    "path search finished"
                );
                // Leave Processing silently; commit announces the new state.
                self.state = processing.resume;
                self.commit(segment, processing.closing);
                if !processing.closing {
                    self.events.fire(PropertyChange::State(self.state));
                }
                Ok(())
            }
            Some(Err(err)) => {
                tracing::warn!(target: targets::MODEL, error = %err, "path search failed");
                self.set_state(processing.resume);
                Err(SelectionError::Search(err))
            }
            None => {
                tracing::debug!(target: targets::MODEL, "path search aborted");
                self.set_state(processing.resume);
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("state", &self.state)
            .field("start", &self.start)
            .field("segments", &self.selection.len())
            .field("history", &self.history.len())
            .field("strategy", &self.strategy.name())
            .field("processing", &self.pending)
            .finish()
    }
}

static_assertions::assert_impl_all!(SelectionModel: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn square(model: &mut SelectionModel) {
        for point in [p(0, 0), p(10, 0), p(10, 10), p(0, 10)] {
            model.add_point(point).unwrap();
        }
        model.finish_selection().unwrap();
    }

    fn recorder(model: &SelectionModel, property: PropertyName) -> Arc<Mutex<Vec<PropertyChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        model.connect(property, move |change| sink.lock().push(change.clone()));
        seen
    }

    #[test]
    fn test_three_point_loop() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        let (p0, p1, p2) = (p(0, 0), p(5, 0), p(5, 5));

        model.start(p0).unwrap();
        model.add_point(p1).unwrap();
        model.add_point(p2).unwrap();
        model.finish_selection().unwrap();

        assert_eq!(model.state(), SelectionState::Selected);
        assert_eq!(
            model.selection(),
            vec![
                PolyLine::line(p0, p1),
                PolyLine::line(p1, p2),
                PolyLine::line(p2, p0),
            ]
        );
    }

    #[test]
    fn test_undo_walks_back_to_empty() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut model);
        assert_eq!(model.history_len(), 5);

        for expected in (0..4).rev() {
            model.undo().unwrap();
            assert_eq!(model.selection().len(), expected);
            assert_eq!(model.state(), SelectionState::Selecting);
        }
        model.undo().unwrap();
        assert_eq!(model.state(), SelectionState::NoSelection);
        assert_eq!(model.start_point(), None);
        assert!(!model.can_undo());

        model.undo().unwrap();
        assert_eq!(model.state(), SelectionState::NoSelection);
    }

    #[test]
    fn test_finish_without_segments_resets() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        model.start(p(3, 3)).unwrap();
        model.finish_selection().unwrap();
        assert_eq!(model.state(), SelectionState::NoSelection);
        assert_eq!(model.history_len(), 0);
    }

    #[test]
    fn test_invalid_states() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        assert!(model.finish_selection().unwrap_err().is_invalid_state());
        assert!(model.live_wire(p(1, 1)).unwrap_err().is_invalid_state());
        assert!(model.move_point(0, p(1, 1)).unwrap_err().is_invalid_state());

        square(&mut model);
        assert!(model.add_point(p(1, 1)).unwrap_err().is_invalid_state());
        assert!(model.start(p(1, 1)).unwrap_err().is_invalid_state());
        assert!(model.finish_selection().unwrap_err().is_invalid_state());
        assert_eq!(model.selection().len(), 4);
    }

    #[test]
    fn test_move_point_and_index_errors() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut model);

        let err = model.move_point(4, p(1, 1)).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidIndex { index: 4, len: 4 }));

        model.move_point(0, p(-1, -1)).unwrap();
        assert_eq!(model.start_point(), Some(p(-1, -1)));
        assert_eq!(model.segments()[0].start(), p(-1, -1));
        assert_eq!(model.segments()[3].end(), p(-1, -1));

        model.undo().unwrap();
        assert_eq!(model.start_point(), Some(p(0, 0)));
        assert_eq!(model.state(), SelectionState::Selected);
    }

    #[test]
    fn test_live_wire_preview() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        model.start(p(1, 1)).unwrap();
        assert_eq!(model.live_wire(p(4, 4)).unwrap(), PolyLine::line(p(1, 1), p(4, 4)));
        model.add_point(p(2, 8)).unwrap();
        assert_eq!(model.live_wire(p(4, 4)).unwrap(), PolyLine::line(p(2, 8), p(4, 4)));
        assert_eq!(model.selection().len(), 1);
    }

    #[test]
    fn test_closest_point() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut model);
        assert_eq!(model.closest_point(p(9, 1), 4), Some(1));
        assert_eq!(model.closest_point(p(5, 5), 4), None);
        assert_eq!(model.closest_point(p(1, 9), 2), Some(3));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut model);
        let selections = recorder(&model, PropertyName::Selection);

        model.reset();
        assert_eq!(model.state(), SelectionState::NoSelection);
        assert!(model.selection().is_empty());
        assert_eq!(model.last_point(), None);
        assert!(!model.can_undo());
        assert_eq!(*selections.lock(), vec![PropertyChange::Selection(Vec::new())]);
    }

    #[test]
    fn test_state_notifications() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        let states = recorder(&model, PropertyName::State);

        model.add_point(p(0, 0)).unwrap();
        model.add_point(p(4, 0)).unwrap();
        model.add_point(p(4, 4)).unwrap();
        model.finish_selection().unwrap();
        model.undo().unwrap();

        assert_eq!(
            *states.lock(),
            vec![
                PropertyChange::State(SelectionState::Selecting),
                PropertyChange::State(SelectionState::Selected),
                PropertyChange::State(SelectionState::Selecting),
            ]
        );
    }

    #[test]
    fn test_history_limit() {
        let options = ModelOptions::default().with_history_limit(2);
        let mut model = SelectionModel::point_to_point(options);
        square(&mut model);
        assert_eq!(model.history_len(), 2);

        model.undo().unwrap();
        model.undo().unwrap();
        model.undo().unwrap();
        assert_eq!(model.selection().len(), 2);
        assert_eq!(model.state(), SelectionState::Selecting);
    }

    #[test]
    fn test_cancel_outside_processing_is_noop() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut model);
        model.cancel_processing();
        assert_eq!(model.state(), SelectionState::Selected);
        assert_eq!(model.selection().len(), 4);
        model.poll().unwrap();
        model.wait_for_processing().unwrap();
    }

    #[test]
    fn test_save_requires_image() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        assert!(
            model
                .save_selection(Vec::new())
                .unwrap_err()
                .is_invalid_state()
        );
        square(&mut model);
        assert!(matches!(
            model.save_selection(Vec::new()),
            Err(SelectionError::NoImage)
        ));
    }

    #[test]
    fn test_set_image_resets() {
        let mut model = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut model);
        model
            .set_image(Some(Arc::new(RgbaImage::new(4, 4))))
            .unwrap();
        assert_eq!(model.state(), SelectionState::NoSelection);
        assert_eq!(model.image().map(|i| i.width()), Some(4));
    }

    #[test]
    fn test_accessors_describe_configuration() {
        let options = ModelOptions::default().with_history_limit(3);
        let model = SelectionModel::point_to_point(options);
        assert!(model.image().is_none());
        assert_eq!(model.strategy_name(), "Point-to-point");
        assert_eq!(model.options().history_limit, Some(3));
    }

    #[test]
    fn test_from_model_copies_committed_state() {
        let mut previous = SelectionModel::point_to_point(ModelOptions::default());
        square(&mut previous);
        previous.connect(PropertyName::State, |_| {});

        let mut model = SelectionModel::from_model(&previous, PointToPoint::new());
        assert_eq!(model.state(), SelectionState::Selected);
        assert_eq!(model.selection(), previous.selection());
        assert_eq!(model.history_len(), previous.history_len());
        assert_eq!(model.events().listener_count(PropertyName::State), 0);

        model.undo().unwrap();
        assert_eq!(model.state(), SelectionState::Selecting);
        assert_eq!(previous.state(), SelectionState::Selected);
    }
}
