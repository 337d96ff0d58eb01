use grid_search::{path_cost, pathing_grid::PathingGrid, waypoints_to_path, GridError};
use grid_util::point::Point;

// Runs the three searches on the same map and draws what each of them explored:
// - # marks an obstacle
// - o marks a finalized cell
// - * marks the path
// - S and E mark the start and the end

type Search = fn(&mut PathingGrid, Point, Point) -> Result<Vec<Point>, GridError>;

fn draw(grid: &PathingGrid, path: &[Point], start: Point, end: Point) {
    for y in 0..grid.height() as i32 {
        let row: String = (0..grid.width() as i32)
            .map(|x| {
                let p = Point::new(x, y);
                if p == start {
                    'S'
                } else if p == end {
                    'E'
                } else if path.contains(&p) {
                    '*'
                } else if grid.is_obstruction(p).unwrap_or(true) {
                    '#'
                } else if grid.is_closed(&p) {
                    'o'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{row}");
    }
}

fn main() -> Result<(), GridError> {
    let mut grid = PathingGrid::new(40, 30);
    for y in 3..27 {
        grid.set_obstruction(Point::new(20, y), true)?;
    }
    for x in 8..20 {
        grid.set_obstruction(Point::new(x, 12), true)?;
    }
    grid.set_obstruction(Point::new(4, 5), true)?;
    grid.set_obstruction(Point::new(5, 5), true)?;
    grid.set_obstruction(Point::new(38, 2), true)?;
    grid.set_obstruction(Point::new(6, 27), true)?;

    let start = Point::new(3, 20);
    let end = Point::new(35, 8);
    let searches: [(&str, Search); 3] = [
        ("Dijkstra", PathingGrid::dijkstra_search),
        ("A*", PathingGrid::astar_search),
        ("Jump Point Search", PathingGrid::astar_jump_point_search),
    ];
    for (name, search) in searches {
        let waypoints = search(&mut grid, start, end)?;
        let path = waypoints_to_path(waypoints.clone());
        println!(
            "{name}: {} waypoints, cost {}, {} cells finalized",
            waypoints.len(),
            path_cost(&path),
            grid.closed_count()
        );
        draw(&grid, &path, start, end);
        println!();
    }
    Ok(())
}
