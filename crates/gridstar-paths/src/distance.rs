//! Distance functions.

use gridstar_core::Point;

/// Manhattan (L1) distance between two points.
///
/// This is the metric of 4-way movement with unit step cost, and the
/// heuristic used by [`PathGrid::find_path`](crate::PathGrid::find_path).
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
