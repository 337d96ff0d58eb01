use crate::astar_jps::SearchContext;
use crate::error::GridError;
use crate::{C, D, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// The 8-neighbourhood as `(dx, dy, step cost)`: orthogonal moves first, then diagonals.
/// The order fixes the push order of successors and with it the choice among equal-cost paths.
pub const DIRECTIONS: [(i32, i32, i32); 8] = [
    (1, 0, C),
    (0, 1, C),
    (-1, 0, C),
    (0, -1, C),
    (1, 1, D),
    (-1, 1, D),
    (-1, -1, D),
    (1, -1, D),
];

/// Offsets `point` by `(dx, dy)`.
#[inline]
pub(crate) fn offset(point: Point, (dx, dy): (i32, i32)) -> Point {
    Point::new(point.x + dx, point.y + dy)
}

/// [PathingGrid] holds the obstruction map ([true] is obstructed) of a `width` x `height` grid of
/// cells connected to their 8 neighbours. Next to the raw [BoolGrid] it maintains connected
/// components in a [UnionFind] structure and keeps the [SearchContext] of the most recent search,
/// whose closed set can be inspected through [is_closed](Self::is_closed) and
/// [get_predecessor](Self::get_predecessor).
///
/// The grid must not be mutated while a search runs; searches borrow it mutably for their whole
/// duration.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    /// Skip the search and return an empty path when start and goal lie on different components.
    pub component_precheck: bool,
    pub(crate) context: SearchContext<Point, i32>,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0)
    }
}

impl PathingGrid {
    /// Creates an unobstructed grid.
    ///
    /// # Panics
    ///
    /// Panics when the dimensions are rejected by [try_new](Self::try_new).
    pub fn new(width: usize, height: usize) -> PathingGrid {
        match PathingGrid::try_new(width, height) {
            Ok(pathing_grid) => pathing_grid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an unobstructed grid, failing when `width * height` overflows or a side exceeds
    /// `i32::MAX`.
    pub fn try_new(width: usize, height: usize) -> Result<PathingGrid, GridError> {
        let n_cells = width
            .checked_mul(height)
            .filter(|_| i32::try_from(width).is_ok() && i32::try_from(height).is_ok())
            .ok_or(GridError::DimensionsTooLarge { width, height })?;
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(width, height, false),
            components: UnionFind::new(n_cells),
            components_dirty: false,
            component_precheck: false,
            context: SearchContext::new(),
        };
        pathing_grid.context.closed.reserve(n_cells);
        pathing_grid.generate_components();
        Ok(pathing_grid)
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Checks `0 <= x < width` and `0 <= y < height`.
    pub fn is_valid_coord(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    pub(crate) fn check_coord(&self, point: Point) -> Result<(), GridError> {
        if self.is_valid_coord(point) {
            Ok(())
        } else {
            Err(GridError::InvalidCoordinate {
                point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    pub fn is_obstruction(&self, point: Point) -> Result<bool, GridError> {
        self.check_coord(point)?;
        Ok(self.grid.get_point(point))
    }

    /// Updates a cell of the obstruction map. Joins newly connected components when a cell is
    /// cleared and flags the components as dirty if they are (potentially) broken apart.
    pub fn set_obstruction(&mut self, point: Point, obstructed: bool) -> Result<(), GridError> {
        self.check_coord(point)?;
        let was_obstructed = self.grid.get_point(point);
        self.grid.set_point(point, obstructed);
        if obstructed {
            if !was_obstructed {
                self.components_dirty = true;
            }
        } else {
            let p_ix = self.get_ix_point(&point);
            for (n, _) in self.neighborhood_points_and_cost(&point) {
                let n_ix = self.get_ix_point(&n);
                self.components.union(p_ix, n_ix);
            }
        }
        Ok(())
    }

    pub(crate) fn get_ix_point(&self, point: &Point) -> usize {
        debug_assert!(self.is_valid_coord(*point));
        point.y as usize * self.width() + point.x as usize
    }

    /// Out-of-bounds cells count as obstructed.
    #[inline]
    pub(crate) fn is_blocked(&self, pos: Point) -> bool {
        !self.can_move_to_simple(pos)
    }
    /// True if `pos` is inside the grid and unobstructed.
    pub fn can_move_to_simple(&self, pos: Point) -> bool {
        self.is_valid_coord(pos) && !self.grid.get_point(pos)
    }
    /// Whether the single step from `start` to the adjacent cell `pos` is legal: `pos` must be a
    /// free cell and a diagonal step may not pass between two obstructed orthogonal cells.
    pub fn can_move_to(&self, pos: Point, start: Point) -> bool {
        debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
        self.can_move_to_simple(pos)
            && (start.x == pos.x
                || start.y == pos.y
                || !self.is_blocked(Point::new(start.x, pos.y))
                || !self.is_blocked(Point::new(pos.x, start.y)))
    }
    /// Legal single steps out of `pos` with their costs, in [DIRECTIONS] order.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy, cost)| (offset(*pos, (dx, dy)), cost))
            .filter(|(p, _)| self.can_move_to(*p, *pos))
            .collect()
    }

    /// Whether the most recent search finalized `point`.
    pub fn is_closed(&self, point: &Point) -> bool {
        self.context.closed.is_closed(point)
    }
    /// The cell from which the most recent search finalized `point`. The start is its own
    /// predecessor. For Jump Point Search this is the jump point the cell was scanned from.
    pub fn get_predecessor(&self, point: &Point) -> Option<Point> {
        self.context.closed.predecessor(point).copied()
    }
    /// Cells finalized by the most recent search with their predecessors, in finalization order.
    pub fn explored(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.context.closed.iter().map(|(p, q)| (*p, *q))
    }
    /// Number of cells finalized by the most recent search.
    pub fn closed_count(&self) -> usize {
        self.context.closed.len()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Out-of-bounds points are
    /// unreachable. The answer may be a false negative while the components are dirty.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_valid_coord(*start) && self.is_valid_coord(*goal) {
            !self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free cells joined by a legal step.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        // Steps are symmetric, so linking every cell forward covers every edge once.
        const FORWARD: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if self.is_blocked(point) {
                    continue;
                }
                let parent_ix = self.get_ix_point(&point);
                for delta in FORWARD {
                    let n = offset(point, delta);
                    if self.can_move_to(n, point) {
                        let ix = self.get_ix_point(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row: String = (0..self.width() as i32)
                .map(|x| {
                    if self.grid.get_point(Point::new(x, y)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
