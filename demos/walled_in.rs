use grid_astar::{find_path, CellState, Grid};
use grid_util::point::Point;

// A wall between the first and last column makes the end unreachable:
//  ___
// |S#E|
// | # |
// | # |
//  ___

fn main() {
    let mut grid = Grid::new(3);
    for row in 0..3 {
        grid.set_state(Point::new(row, 1), CellState::Barrier);
    }
    grid.refresh_neighbors();
    let start = Point::new(0, 0);
    let end = Point::new(0, 2);
    println!("Reachable: {}", grid.reachable(&start, &end));
    println!("{:?}", find_path(&grid, start, end));
}
