//! Search configuration errors.

use gridstar_core::Point;
use thiserror::Error;

/// Alias for results of fallible engine calls.
pub type Result<T> = std::result::Result<T, PathError>;

/// A configuration problem detected before or while seeding a search.
///
/// Configuration errors abort the call without running the search. An
/// unreachable goal is not an error; `find_path` reports it as `Ok(None)`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The same coordinate appears in both the start and the goal list.
    #[error("start {0} is also a goal")]
    SharedStartGoal(Point),

    /// A start or goal coordinate lies outside the grid.
    #[error("endpoint {0} is outside the grid")]
    OutOfBounds(Point),

    /// The obstacle bitmap does not cover the grid exactly.
    #[error("obstacle bitmap has {got} cells, grid has {expected}")]
    BitmapLen {
        /// Cell count of the grid.
        expected: usize,
        /// Cell count of the bitmap that was passed in.
        got: usize,
    },
}
