use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{
    astar_jps::VisitationStore, octile_distance, pathing_grid::PathingGrid, solver::GridSolver,
    N_SMALLVEC_SIZE,
};

/// A* over single steps, guided by the octile distance.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Multiplies the heuristic. Values above 1 give up optimality for fewer expansions.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl GridSolver for AstarSolver {
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

    /// The octile distance times the heuristic factor. A factor of 1 returns the exact distance.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        let distance = octile_distance(p1, p2);
        if self.heuristic_factor == 1.0 {
            distance
        } else {
            (f64::from(distance) * f64::from(self.heuristic_factor)) as i32
        }
    }
}
