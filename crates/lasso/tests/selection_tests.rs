//! End-to-end behaviour of point-to-point selections.

use std::sync::Arc;

use lasso::{
    ModelOptions, Point, PolyLine, PropertyChange, PropertyName, SelectionError, SelectionModel,
    SelectionState,
};
use parking_lot::Mutex;

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

fn model() -> SelectionModel {
    SelectionModel::point_to_point(ModelOptions::default())
}

fn closed_triangle(model: &mut SelectionModel) -> (Point, Point, Point) {
    let (p0, p1, p2) = (p(0, 0), p(40, 0), p(20, 30));
    model.start(p0).unwrap();
    model.add_point(p1).unwrap();
    model.add_point(p2).unwrap();
    model.finish_selection().unwrap();
    (p0, p1, p2)
}

#[test]
fn test_closed_loop_is_chained() {
    let mut model = model();
    let (p0, p1, p2) = closed_triangle(&mut model);

    let selection = model.selection();
    assert_eq!(
        selection,
        vec![
            PolyLine::line(p0, p1),
            PolyLine::line(p1, p2),
            PolyLine::line(p2, p0),
        ]
    );
    for pair in selection.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    assert_eq!(selection.last().unwrap().end(), model.start_point().unwrap());
}

#[test]
fn test_undo_after_add_restores_previous_selection() {
    let mut model = model();
    model.start(p(1, 1)).unwrap();
    model.add_point(p(5, 1)).unwrap();
    let before = model.selection();

    model.add_point(p(5, 5)).unwrap();
    model.undo().unwrap();

    assert_eq!(model.selection(), before);
    assert_eq!(model.state(), SelectionState::Selecting);
    assert_eq!(model.last_point(), Some(p(5, 1)));
}

#[test]
fn test_undo_after_finish_reopens_loop() {
    let mut model = model();
    closed_triangle(&mut model);

    model.undo().unwrap();
    assert_eq!(model.state(), SelectionState::Selecting);
    assert_eq!(model.selection().len(), 2);
    assert_eq!(model.last_point(), Some(p(20, 30)));
}

#[test]
fn test_move_first_point_wraps() {
    let mut model = model();
    let (_, p1, p2) = closed_triangle(&mut model);
    let moved = p(-4, 3);

    model.move_point(0, moved).unwrap();

    let selection = model.selection();
    assert_eq!(selection[0], PolyLine::line(moved, p1));
    assert_eq!(selection[1], PolyLine::line(p1, p2));
    assert_eq!(selection[2], PolyLine::line(p2, moved));
    assert_eq!(model.start_point(), Some(moved));
    assert_eq!(model.state(), SelectionState::Selected);
}

#[test]
fn test_move_point_rejections() {
    let mut model = model();
    model.start(p(0, 0)).unwrap();
    model.add_point(p(3, 0)).unwrap();
    let err = model.move_point(0, p(1, 1)).unwrap_err();
    assert!(matches!(
        err,
        SelectionError::InvalidState {
            state: SelectionState::Selecting,
            ..
        }
    ));

    model.add_point(p(3, 3)).unwrap();
    model.finish_selection().unwrap();
    let before = model.selection();
    let err = model.move_point(3, p(1, 1)).unwrap_err();
    assert!(matches!(err, SelectionError::InvalidIndex { index: 3, len: 3 }));
    assert_eq!(model.selection(), before);
}

#[test]
fn test_add_point_after_close_is_rejected() {
    let mut model = model();
    closed_triangle(&mut model);
    let before = model.selection();

    assert!(model.add_point(p(9, 9)).unwrap_err().is_invalid_state());
    assert_eq!(model.selection(), before);
    assert_eq!(model.state(), SelectionState::Selected);
}

#[test]
fn test_cancel_without_search_changes_nothing() {
    let mut model = model();
    model.start(p(2, 2)).unwrap();
    model.add_point(p(7, 2)).unwrap();
    let before = model.selection();

    model.cancel_processing();

    assert_eq!(model.state(), SelectionState::Selecting);
    assert_eq!(model.selection(), before);
}

#[test]
fn test_selection_listeners_get_copies() {
    let mut model = model();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    model.connect(PropertyName::Selection, move |change| {
        if let PropertyChange::Selection(segments) = change {
            sink.lock().push(segments.len());
        }
    });

    closed_triangle(&mut model);
    model.move_point(1, p(41, 1)).unwrap();
    model.reset();

    assert_eq!(*seen.lock(), vec![1, 2, 3, 3, 0]);
}

#[test]
fn test_switching_strategy_keeps_selection() {
    let mut previous = model();
    closed_triangle(&mut previous);

    let model = SelectionModel::from_model(&previous, lasso::Scissors::new(lasso::CostModel::Color));
    assert_eq!(model.selection(), previous.selection());
    assert_eq!(model.state(), SelectionState::Selected);
    assert_eq!(model.strategy_name(), "Intelligent scissors (color)");
}
