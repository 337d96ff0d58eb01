use crate::astar_jps::VisitationStore;
use crate::{path_cost, pathing_grid::PathingGrid, waypoints_to_path, GridError};
use grid_util::point::Point;
use log::{debug, warn};

pub mod astar;
pub mod dijkstra;
pub mod jps;

use astar::AstarSolver;
use dijkstra::DijkstraSolver;
use jps::JPSSolver;

/// A search strategy over a [PathingGrid]: the heuristic that steers the shared best-first engine
/// and the successor function that expands a finalized node.
pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, i32)>;

    /// Estimated cost from `p1` to `p2`. Must never overestimate for the search to be optimal.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    /// The nodes reachable from `node` together with the cost of getting there.
    fn successors(
        &self,
        grid: &PathingGrid,
        node: &Point,
        closed: &VisitationStore<Point>,
        goal: &Point,
    ) -> Self::Successors;

    /// Total cost of a path returned by this solver.
    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path_cost(path)
    }

    /// Computes a path from start to goal and re-expands it into single steps.
    fn get_path_single_goal(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, GridError> {
        self.get_waypoints_single_goal(grid, start, goal)
            .map(waypoints_to_path)
    }

    /// The raw search result from which [get_path_single_goal](Self::get_path_single_goal) makes
    /// a path: every step for single-step solvers, only the jump points for [JPSSolver]. Empty if
    /// the goal cannot be reached. The closed set is left in the grid for inspection.
    fn get_waypoints_single_goal(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, GridError> {
        grid.check_coord(start)?;
        grid.check_coord(goal)?;
        debug!("Searching path from {:?} to {:?}", start, goal);
        let prechecked = grid.component_precheck && start != goal && !grid.is_blocked(start);
        if prechecked {
            grid.update();
            if grid.unreachable(&start, &goal) {
                debug!("{:?} is not reachable from {:?}", goal, start);
                grid.context.clear();
                return Ok(Vec::new());
            }
        }
        let mut ct = std::mem::take(&mut grid.context);
        let view: &PathingGrid = grid;
        let result = ct.astar_jps(
            &start,
            |node, closed| self.successors(view, node, closed, &goal),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        grid.context = ct;
        match result {
            Some((path, _cost)) => Ok(path),
            None => {
                if prechecked {
                    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
                }
                Ok(Vec::new())
            }
        }
    }
}

impl PathingGrid {
    /// Uniform-cost search: explores strictly in cost order. Returns every step of an optimal
    /// path, or an empty path if the goal cannot be reached.
    pub fn dijkstra_search(&mut self, start: Point, goal: Point) -> Result<Vec<Point>, GridError> {
        DijkstraSolver.get_waypoints_single_goal(self, start, goal)
    }
    /// A* with the octile distance. Returns every step of an optimal path, or an empty path if
    /// the goal cannot be reached.
    pub fn astar_search(&mut self, start: Point, goal: Point) -> Result<Vec<Point>, GridError> {
        AstarSolver::new().get_waypoints_single_goal(self, start, goal)
    }
    /// Jump Point Search. Returns the jump points of an optimal path; consecutive jump points are
    /// joined by straight or diagonal runs, see [waypoints_to_path](crate::waypoints_to_path).
    pub fn astar_jump_point_search(
        &mut self,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, GridError> {
        JPSSolver.get_waypoints_single_goal(self, start, goal)
    }
}
