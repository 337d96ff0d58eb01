use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{
    astar_jps::VisitationStore,
    octile_distance,
    pathing_grid::{offset, PathingGrid},
    solver::GridSolver,
    C, D, N_SMALLVEC_SIZE,
};

/// A turn becomes necessary at a cell when the `blocked` neighbour is obstructed while the
/// `open` neighbour diagonally ahead of it is free.
#[derive(Clone, Copy, Debug)]
struct ForcedCheck {
    blocked: (i32, i32),
    open: (i32, i32),
}

impl ForcedCheck {
    fn matches(&self, grid: &PathingGrid, node: Point) -> bool {
        grid.is_blocked(offset(node, self.blocked)) && !grid.is_blocked(offset(node, self.open))
    }
}

#[derive(Clone, Copy, Debug)]
struct StraightScan {
    dir: (i32, i32),
    forced: [ForcedCheck; 2],
}

/// A diagonal direction with the indices of its two orthogonal components in [STRAIGHT_SCANS].
#[derive(Clone, Copy, Debug)]
struct DiagonalScan {
    dir: (i32, i32),
    horizontal: usize,
    vertical: usize,
}

const STRAIGHT_SCANS: [StraightScan; 4] = [
    StraightScan {
        dir: (1, 0),
        forced: [
            ForcedCheck {
                blocked: (0, 1),
                open: (1, 1),
            },
            ForcedCheck {
                blocked: (0, -1),
                open: (1, -1),
            },
        ],
    },
    StraightScan {
        dir: (0, 1),
        forced: [
            ForcedCheck {
                blocked: (1, 0),
                open: (1, 1),
            },
            ForcedCheck {
                blocked: (-1, 0),
                open: (-1, 1),
            },
        ],
    },
    StraightScan {
        dir: (-1, 0),
        forced: [
            ForcedCheck {
                blocked: (0, 1),
                open: (-1, 1),
            },
            ForcedCheck {
                blocked: (0, -1),
                open: (-1, -1),
            },
        ],
    },
    StraightScan {
        dir: (0, -1),
        forced: [
            ForcedCheck {
                blocked: (1, 0),
                open: (1, -1),
            },
            ForcedCheck {
                blocked: (-1, 0),
                open: (-1, -1),
            },
        ],
    },
];

const DIAGONAL_SCANS: [DiagonalScan; 4] = [
    DiagonalScan {
        dir: (1, 1),
        horizontal: 0,
        vertical: 1,
    },
    DiagonalScan {
        dir: (-1, 1),
        horizontal: 2,
        vertical: 1,
    },
    DiagonalScan {
        dir: (-1, -1),
        horizontal: 2,
        vertical: 3,
    },
    DiagonalScan {
        dir: (1, -1),
        horizontal: 0,
        vertical: 3,
    },
];

/// Jump Point Search. Every expanded node scans the four straight and the four diagonal lines
/// leaving it and only the cells where a scan stops (the jump points) enter the frontier, with
/// the expanded node as predecessor and the whole run as move cost. The result is therefore a
/// polyline of jump points rather than a list of steps.
///
/// Scans stop at finalized cells: whatever lies beyond them is covered by their own expansion.
#[derive(Clone, Copy, Debug, Default)]
pub struct JPSSolver;

impl GridSolver for JPSSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(
        &self,
        grid: &PathingGrid,
        node: &Point,
        closed: &VisitationStore<Point>,
        goal: &Point,
    ) -> Self::Successors {
        let mut succ = SmallVec::new();
        for scan in &STRAIGHT_SCANS {
            if let Some(jump_point) = self.jump_straight(grid, closed, goal, *node, scan) {
                succ.push(jump_point);
            }
        }
        for scan in &DIAGONAL_SCANS {
            if let Some(jump_point) = self.jump_diagonal(grid, closed, goal, *node, scan) {
                succ.push(jump_point);
            }
        }
        succ
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        octile_distance(p1, p2)
    }
}

impl JPSSolver {
    /// Scans along an orthogonal line until the goal or a cell with a forced neighbour is found.
    fn jump_straight(
        &self,
        grid: &PathingGrid,
        closed: &VisitationStore<Point>,
        goal: &Point,
        mut initial: Point,
        scan: &StraightScan,
    ) -> Option<(Point, i32)> {
        let mut cost = 0;
        loop {
            initial = offset(initial, scan.dir);
            cost += C;
            if grid.is_blocked(initial) {
                return None;
            }
            if initial == *goal {
                return Some((initial, cost));
            }
            if closed.is_closed(&initial) {
                return None;
            }
            if scan.forced.iter().any(|check| check.matches(grid, initial)) {
                return Some((initial, cost));
            }
        }
    }

    /// Scans along a diagonal. A cell becomes a jump point when it shares a row or column with
    /// the goal, when either cell it was entered past is obstructed, or when one of the straight
    /// scans along the diagonal's components finds a jump point.
    fn jump_diagonal(
        &self,
        grid: &PathingGrid,
        closed: &VisitationStore<Point>,
        goal: &Point,
        mut initial: Point,
        scan: &DiagonalScan,
    ) -> Option<(Point, i32)> {
        let (dx, dy) = scan.dir;
        let mut cost = 0;
        loop {
            let next = offset(initial, scan.dir);
            if !grid.can_move_to(next, initial) || closed.is_closed(&next) {
                return None;
            }
            initial = next;
            cost += D;
            if initial.x == goal.x || initial.y == goal.y {
                return Some((initial, cost));
            }
            if grid.is_blocked(offset(initial, (-dx, 0)))
                || grid.is_blocked(offset(initial, (0, -dy)))
            {
                return Some((initial, cost));
            }
            if self
                .jump_straight(grid, closed, goal, initial, &STRAIGHT_SCANS[scan.horizontal])
                .is_some()
                || self
                    .jump_straight(grid, closed, goal, initial, &STRAIGHT_SCANS[scan.vertical])
                    .is_some()
            {
                return Some((initial, cost));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{path_cost, waypoints_to_path};

    /// The table pairs each blocked side cell with the free cell diagonally ahead of it.
    #[test]
    fn forced_table_is_consistent() {
        for scan in &STRAIGHT_SCANS {
            let (dx, dy) = scan.dir;
            assert_eq!(dx.abs() + dy.abs(), 1);
            for check in &scan.forced {
                let (bx, by) = check.blocked;
                assert_eq!(bx * dx + by * dy, 0);
                assert_eq!(check.open, (bx + dx, by + dy));
            }
        }
        for scan in &DIAGONAL_SCANS {
            let (dx, dy) = scan.dir;
            assert_eq!(STRAIGHT_SCANS[scan.horizontal].dir, (dx, 0));
            assert_eq!(STRAIGHT_SCANS[scan.vertical].dir, (0, dy));
        }
    }

    /// On an open grid the goal on the start's diagonal is reached in one jump.
    #[test]
    fn open_diagonal_is_single_jump() {
        let mut grid = PathingGrid::new(5, 5);
        let path = grid
            .astar_jump_point_search(Point::new(0, 0), Point::new(4, 4))
            .unwrap();
        assert_eq!(path, vec![Point::new(0, 0), Point::new(4, 4)]);
        assert_eq!(path_cost(&path), 4 * D);
    }

    #[test]
    fn straight_scan_stops_at_forced_neighbour() {
        // |S..#.|
        // |.....|
        let mut grid = PathingGrid::new(5, 2);
        grid.set_obstruction(Point::new(3, 0), true).unwrap();
        let closed = VisitationStore::default();
        let goal = Point::new(4, 1);
        let jump =
            JPSSolver.jump_straight(&grid, &closed, &goal, Point::new(0, 1), &STRAIGHT_SCANS[0]);
        // (3, 1) is passed with (3, 0) obstructed and (4, 0) free.
        assert_eq!(jump, Some((Point::new(3, 1), 3 * C)));
        let jump =
            JPSSolver.jump_straight(&grid, &closed, &goal, Point::new(0, 0), &STRAIGHT_SCANS[0]);
        assert_eq!(jump, None);
    }

    #[test]
    fn straight_scan_stops_at_closed_cell() {
        let grid = PathingGrid::new(6, 1);
        let mut closed = VisitationStore::default();
        closed.finalize(Point::new(3, 0), Point::new(3, 0));
        let goal = Point::new(5, 0);
        let jump =
            JPSSolver.jump_straight(&grid, &closed, &goal, Point::new(0, 0), &STRAIGHT_SCANS[0]);
        assert_eq!(jump, None);
        let jump =
            JPSSolver.jump_straight(&grid, &closed, &goal, Point::new(3, 0), &STRAIGHT_SCANS[0]);
        assert_eq!(jump, Some((goal, 2 * C)));
    }

    #[test]
    fn diagonal_scan_stops_on_goal_row() {
        let grid = PathingGrid::new(8, 8);
        let closed = VisitationStore::default();
        let goal = Point::new(7, 3);
        let jump =
            JPSSolver.jump_diagonal(&grid, &closed, &goal, Point::new(0, 0), &DIAGONAL_SCANS[0]);
        assert_eq!(jump, Some((Point::new(3, 3), 3 * D)));
    }

    /// The diagonal scan may not squeeze between two obstructed cells.
    #[test]
    fn diagonal_scan_respects_corner_rule() {
        let mut grid = PathingGrid::new(4, 4);
        grid.set_obstruction(Point::new(2, 1), true).unwrap();
        grid.set_obstruction(Point::new(1, 2), true).unwrap();
        let closed = VisitationStore::default();
        let goal = Point::new(3, 3);
        let jump =
            JPSSolver.jump_diagonal(&grid, &closed, &goal, Point::new(1, 1), &DIAGONAL_SCANS[0]);
        assert_eq!(jump, None);
        let jps = grid.astar_jump_point_search(Point::new(1, 1), goal).unwrap();
        let astar = grid.astar_search(Point::new(1, 1), goal).unwrap();
        assert_eq!(path_cost(&jps), path_cost(&astar));
        let expanded = waypoints_to_path(jps);
        for (a, b) in expanded.iter().zip(expanded.iter().skip(1)) {
            assert!(grid.can_move_to(*b, *a));
        }
    }

    /// The diagonal scan turns a cell into a jump point as soon as either cell it was entered
    /// past is obstructed, even where the cell diagonally ahead of that obstruction is obstructed
    /// too and the classic forced-neighbour rule would keep scanning. The resulting path is
    /// sparser than necessary but costs the same as the A* path.
    #[test]
    fn diagonal_scan_stops_on_either_corner() {
        // |S....|
        // |#....|
        // |#....|
        // |.....|
        // |....G|
        let mut grid = PathingGrid::new(5, 5);
        grid.set_obstruction(Point::new(0, 1), true).unwrap();
        grid.set_obstruction(Point::new(0, 2), true).unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(4, 4);
        let jps = grid.astar_jump_point_search(start, goal).unwrap();
        assert_eq!(jps, vec![start, Point::new(1, 1), goal]);
        let astar = grid.astar_search(start, goal).unwrap();
        assert_eq!(path_cost(&jps), path_cost(&astar));
        assert_eq!(path_cost(&waypoints_to_path(jps)), 4 * D);
    }

    /// Jump points are recorded with the expanded node as predecessor, skipping the scanned cells.
    #[test]
    fn predecessors_skip_scanned_cells() {
        let mut grid = PathingGrid::new(9, 3);
        let start = Point::new(0, 1);
        let goal = Point::new(8, 1);
        let path = grid.astar_jump_point_search(start, goal).unwrap();
        assert_eq!(path, vec![start, goal]);
        assert_eq!(grid.get_predecessor(&goal), Some(start));
        assert!(!grid.is_closed(&Point::new(4, 1)));
    }

    #[test]
    fn detour_around_wall() {
        // |S.#..|
        // |..#..|
        // |..#.G|
        // |.....|
        let mut grid = PathingGrid::new(5, 4);
        for y in 0..3 {
            grid.set_obstruction(Point::new(2, y), true).unwrap();
        }
        let start = Point::new(0, 0);
        let goal = Point::new(4, 2);
        let jps = grid.astar_jump_point_search(start, goal).unwrap();
        let astar = grid.astar_search(start, goal).unwrap();
        assert_eq!(path_cost(&jps), path_cost(&astar));
        let expanded = waypoints_to_path(jps);
        assert!(expanded.contains(&Point::new(2, 3)));
        for (a, b) in expanded.iter().zip(expanded.iter().skip(1)) {
            assert!(grid.can_move_to(*b, *a));
        }
    }
}
