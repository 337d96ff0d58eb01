use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{
    astar_jps::VisitationStore, pathing_grid::PathingGrid, solver::GridSolver, N_SMALLVEC_SIZE,
};

/// Uninformed uniform-cost search over single steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(
        &self,
        grid: &PathingGrid,
        node: &Point,
        _closed: &VisitationStore<Point>,
        _goal: &Point,
    ) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
