use grid_util::point::Point;
use thiserror::Error;

/// Errors raised by grid queries and searches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The coordinate lies outside `0 <= x < width`, `0 <= y < height`.
    #[error("coordinate ({}, {}) is outside the {width}x{height} grid", .point.x, .point.y)]
    InvalidCoordinate {
        point: Point,
        width: usize,
        height: usize,
    },
    /// The cell count overflows `usize` or a side does not fit the `i32` coordinates.
    #[error("a {width}x{height} grid is too large to address")]
    DimensionsTooLarge { width: usize, height: usize },
}
