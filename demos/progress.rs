use grid_astar::{CellState, Grid, GridConfig, Pathfinder};
use grid_util::point::Point;
use std::ops::ControlFlow;

// Drives a search the way an interactive shell would: cells are picked by pixel position, every
// reported step is painted onto the grid and the search is cancelled once a step budget runs out.

const STEP_BUDGET: usize = 500;

fn main() {
    let mut grid = Grid::from_config(&GridConfig {
        rows: 12,
        width: 480,
    });
    let size = grid.cell_size();
    let start = grid.cell_at_pixel(5, 5);
    let end = grid.cell_at_pixel(11 * size + 1, 9 * size + 1);
    if let (Some(start), Some(end)) = (start, end) {
        grid.set_state(start, CellState::Start);
        grid.set_state(end, CellState::End);
    }
    for row in 2..10 {
        grid.set_state(Point::new(row, 5), CellState::Barrier);
    }
    grid.refresh_neighbors();

    let mut steps = Vec::new();
    let mut pathfinder = Pathfinder::new();
    let result = pathfinder.search_marked(&grid, |p, s| {
        steps.push((p, s));
        if steps.len() >= STEP_BUDGET {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    for (p, s) in steps {
        grid.mark(p, s);
    }
    print!("{}", grid);
    println!(
        "{:?} after {} expansions",
        result.map(|r| r.path_len()),
        pathfinder.expansions()
    );
}
