use grid_search::pathing_grid::PathingGrid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() -> Result<(), grid_search::GridError> {
    let mut pathing_grid = PathingGrid::new(3, 3);
    pathing_grid.set_obstruction(Point::new(1, 1), true)?;
    println!("{}", pathing_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = pathing_grid.astar_search(start, end)?;
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
    Ok(())
}
