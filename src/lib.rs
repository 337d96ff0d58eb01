//! # grid_search
//!
//! Best-first search on a uniform 8-connected obstruction grid. Three interchangeable searches
//! are provided on top of a single lazy-deletion engine:
//!
//! - [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) (zero heuristic),
//! - [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the octile distance,
//! - [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search), which scans
//!   straight lines instead of single-stepping and returns a sparse polyline of jump points.
//!
//! Costs are integers: an orthogonal step costs [C] and a diagonal step costs [D], an
//! approximation of the 1 : √2 ratio that keeps heap ordering free of floating point.
//! A diagonal step is illegal when both orthogonal cells it passes between are obstructed.
//!
//! ```
//! use grid_search::pathing_grid::PathingGrid;
//! use grid_util::point::Point;
//!
//! let mut grid = PathingGrid::new(5, 5);
//! grid.set_obstruction(Point::new(2, 2), true).unwrap();
//! let path = grid.astar_search(Point::new(0, 0), Point::new(4, 4)).unwrap();
//! assert_eq!(path.first(), Some(&Point::new(0, 0)));
//! assert_eq!(path.last(), Some(&Point::new(4, 4)));
//! ```
pub mod astar_jps;
pub mod error;
pub mod pathing_grid;
pub mod solver;

pub use error::GridError;

use grid_util::point::Point;
use itertools::Itertools;

/// Cost of an orthogonal step.
pub const C: i32 = 5;
/// Cost of a diagonal step.
pub const D: i32 = 7;
/// Helper constant for the closed-form octile distance.
pub const E: i32 = 2 * C - D;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Octile distance between two points under the [C]/[D] cost model: the cost of taking as many
/// diagonal steps as possible and covering the remainder straight. Admissible and consistent on
/// the 8-connected grid.
pub fn octile_distance(p1: &Point, p2: &Point) -> i32 {
    let delta_x = (p1.x - p2.x).abs();
    let delta_y = (p1.y - p2.y).abs();
    // Formula from https://github.com/riscy/a_star_on_grids
    // equal to 5*max + 2*min for C = 5, D = 7
    (E * (delta_x - delta_y).abs() + D * (delta_x + delta_y)) / 2
}

/// Sums the octile cost of every consecutive pair in the path. For a path of unit steps this is
/// the exact move cost; for a jump point polyline it is the cost of the re-expanded path.
pub fn path_cost(path: &[Point]) -> i32 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| octile_distance(a, b))
        .sum()
}

/// Turns waypoints into a path on the grid which can be followed step by step. Each step heads
/// straight or diagonally towards the next waypoint, so the jump points produced by
/// [JPSSolver](solver::jps::JPSSolver) expand to their exact runs. Waypoints that share no row,
/// column or diagonal are joined by diagonal steps followed by straight ones.
pub fn waypoints_to_path(waypoints: Vec<Point>) -> Vec<Point> {
    let mut iter = waypoints.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };
    let mut path = vec![current];
    for next in iter {
        while current != next {
            current = Point::new(
                current.x + (next.x - current.x).signum(),
                current.y + (next.y - current.y).signum(),
            );
            path.push(current);
        }
    }
    path
}
