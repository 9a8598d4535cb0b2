use grid_astar::{find_path, CellState, Grid, PathResult};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood

fn main() {
    let mut grid = Grid::new(3);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    grid.set_state(start, CellState::Start);
    grid.set_state(end, CellState::End);
    grid.set_state(Point::new(1, 1), CellState::Barrier);
    grid.refresh_neighbors();
    print!("{}", grid);
    match find_path(&grid, start, end) {
        Ok(PathResult::Found(path)) => {
            println!("Path:");
            for p in path {
                println!("{:?}", p);
            }
        }
        Ok(result) => println!("{:?}", result),
        Err(e) => println!("{}", e),
    }
}
