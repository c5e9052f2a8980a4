//! Image-space points and boundary segments.

use std::fmt;

/// A pixel position in image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`, saturating at `i64::MAX`.
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One piece of a selection boundary: a non-empty chain of points.
///
/// Straight segments hold exactly their two endpoints; segments produced by
/// a path search hold every pixel along the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolyLine {
    points: Vec<Point>,
}

impl PolyLine {
    /// A straight segment from `start` to `end`.
    pub fn line(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    /// A segment through `points`.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_points(points: Vec<Point>) -> Self {
        assert!(!points.is_empty(), "a polyline needs at least one point");
        Self { points }
    }

    /// First point.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Last point.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Every point in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Whether consecutive segments share endpoints and the last ends at the
/// first one's start.
pub fn is_closed_loop(selection: &[PolyLine]) -> bool {
    let (Some(first), Some(last)) = (selection.first(), selection.last()) else {
        return false;
    };
    let chained = selection.windows(2).all(|w| w[0].end() == w[1].start());
    chained && last.end() == first.start()
}

/// Move the vertex shared by segments `index - 1` and `index` to `new_pos`,
/// treating `selection` as a cycle.
///
/// Both touching segments are replaced by straight lines. For `index == 0`
/// the touching segments are the first and the last.
pub fn relocate_vertex(selection: &mut [PolyLine], index: usize, new_pos: Point) {
    let len = selection.len();
    debug_assert!(index < len);
    let previous = if index == 0 { len - 1 } else { index - 1 };

    selection[previous] = PolyLine::line(selection[previous].start(), new_pos);
    selection[index] = PolyLine::line(new_pos, selection[index].end());
}

/// Polygon vertices of a closed selection, without repeating shared endpoints.
pub fn boundary(selection: &[PolyLine]) -> Vec<Point> {
    let mut vertices: Vec<Point> = Vec::new();
    for segment in selection {
        let points = segment.points();
        let skip = usize::from(vertices.last() == points.first());
        vertices.extend_from_slice(&points[skip..]);
    }
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// Check whether `(px, py)` lies on the segment `a`-`b`.
fn point_on_segment(px: f64, py: f64, a: Point, b: Point) -> bool {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (abx, aby) = (b.x as f64 - ax, b.y as f64 - ay);
    let (apx, apy) = (px - ax, py - ay);

    let cross = abx * apy - aby * apx;
    if cross.abs() > 1e-9 {
        return false;
    }
    let dot = apx * abx + apy * aby;
    dot >= 0.0 && dot <= abx * abx + aby * aby
}

/// Even-odd point-in-polygon test (ray casting); points on an edge count as
/// inside.
pub fn polygon_contains(polygon: &[Point], px: f64, py: f64) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut previous = last;
    for &current in polygon {
        if point_on_segment(px, py, previous, current) {
            return true;
        }

        let (cx, cy) = (current.x as f64, current.y as f64);
        let (qx, qy) = (previous.x as f64, previous.y as f64);
        if (cy > py) != (qy > py) && px < (qx - cx) * (py - cy) / (qy - cy) + cx {
            inside = !inside;
        }
        previous = current;
    }
    inside
}
