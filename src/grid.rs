use crate::cell::{Cell, CellState};
use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;

pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_WIDTH: u32 = 800;

/// Settings owned by the shell embedding the grid. Only `rows` matters to the search;
/// `width` is the display width in pixels and determines [cell_size](GridConfig::cell_size).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub width: u32,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: DEFAULT_ROWS,
            width: DEFAULT_WIDTH,
        }
    }
}

impl GridConfig {
    /// Zero when `rows` is zero or does not fit a `u32`.
    pub fn cell_size(&self) -> u32 {
        match u32::try_from(self.rows) {
            Ok(rows) if rows > 0 => self.width / rows,
            _ => 0,
        }
    }
}

/// A square grid of [Cell]s. Every cell caches its passable orthogonal neighbours; the caches
/// and the connected components used by [reachable](Grid::reachable) are rebuilt by
/// [refresh_neighbors](Grid::refresh_neighbors), which must be called after placing or
/// removing barriers and before searching.
#[derive(Clone, Debug)]
pub struct Grid {
    config: GridConfig,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    neighbours_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::from_config(&GridConfig::default())
    }
}

impl Grid {
    /// Creates a `rows` x `rows` grid of unvisited cells with the default display width.
    pub fn new(rows: usize) -> Grid {
        Grid::from_config(&GridConfig {
            rows,
            ..GridConfig::default()
        })
    }
    pub fn from_config(config: &GridConfig) -> Grid {
        let rows = config.rows;
        let cells = iproduct!(0..rows, 0..rows)
            .map(|(row, col)| Cell::new(row, col))
            .collect::<Vec<Cell>>();
        let mut grid = Grid {
            config: *config,
            cells,
            components: UnionFind::new(rows * rows),
            neighbours_dirty: false,
        };
        grid.refresh_neighbors();
        grid
    }
    pub fn rows(&self) -> usize {
        self.config.rows
    }
    pub fn width(&self) -> u32 {
        self.config.width
    }
    pub fn cell_size(&self) -> u32 {
        self.config.cell_size()
    }
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
    pub fn in_bounds(&self, p: Point) -> bool {
        let rows = self.config.rows as i32;
        p.x >= 0 && p.y >= 0 && p.x < rows && p.y < rows
    }
    fn get_ix(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.x as usize * self.config.rows + p.y as usize)
        } else {
            None
        }
    }
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.get_ix(p).map(|ix| &self.cells[ix])
    }
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.cell(p).map(Cell::state)
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// True if barriers changed since the last [refresh_neighbors](Grid::refresh_neighbors).
    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }

    /// The cached passable neighbours of `p`, in the order down, up, right, left. Empty for
    /// points outside the grid. The cache reflects barrier placement as of the last
    /// [refresh_neighbors](Grid::refresh_neighbors); reading a stale cache is not detected here.
    pub fn neighbors_of(&self, p: Point) -> &[Point] {
        self.cell(p).map(Cell::neighbours).unwrap_or(&[])
    }

    fn passable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| !c.is_barrier())
    }

    fn compute_neighbours(&self, p: Point) -> Vec<Point> {
        [
            Point::new(p.x + 1, p.y),
            Point::new(p.x - 1, p.y),
            Point::new(p.x, p.y + 1),
            Point::new(p.x, p.y - 1),
        ]
        .into_iter()
        .filter(|n| self.passable(*n))
        .collect::<Vec<Point>>()
    }

    /// Recomputes every neighbour cache and regenerates the connected components.
    pub fn refresh_neighbors(&mut self) {
        debug!("Refreshing neighbours of {} cells", self.cells.len());
        let neighbours = self
            .cells
            .iter()
            .map(|c| self.compute_neighbours(c.pos))
            .collect::<Vec<Vec<Point>>>();
        for (cell, n) in self.cells.iter_mut().zip(neighbours) {
            cell.neighbours = n;
        }
        self.generate_components();
        self.neighbours_dirty = false;
    }

    /// Links every passable cell with its passable neighbours into a fresh [UnionFind].
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        for ix in 0..self.cells.len() {
            if self.cells[ix].is_barrier() {
                continue;
            }
            for &n in &self.cells[ix].neighbours {
                if let Some(n_ix) = self.get_ix(n) {
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Checks whether `start` and `goal` lie on the same connected component. Only valid when
    /// neighbours are up to date.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_ix(*start), self.get_ix(*goal)) {
            (Some(s), Some(g)) if self.passable(*start) && self.passable(*goal) => {
                self.components.equiv(s, g)
            }
            _ => false,
        }
    }

    /// Sets the state of the cell at `p` and returns its previous state, or [None] if `p` lies
    /// outside the grid. Setting [Start](CellState::Start) or [End](CellState::End) resets the
    /// previous holder of that state, so each occurs at most once as long as this (and not
    /// direct mutation) is how cells are painted.
    pub fn set_state(&mut self, p: Point, state: CellState) -> Option<CellState> {
        let ix = self.get_ix(p)?;
        if matches!(state, CellState::Start | CellState::End) {
            if let Some(previous) = self.find(state).filter(|&q| q != p) {
                self.reset_cell(previous);
            }
        }
        let old = self.cells[ix].state;
        if old != state && (old == CellState::Barrier || state == CellState::Barrier) {
            self.neighbours_dirty = true;
        }
        self.cells[ix].state = state;
        Some(old)
    }

    /// Resets the cell at `p` to [Unvisited](CellState::Unvisited). Callers keeping their own
    /// reference to the start or end cell must drop it when that cell is reset.
    pub fn reset_cell(&mut self, p: Point) -> Option<CellState> {
        self.set_state(p, CellState::Unvisited)
    }

    /// Paints a search mark reported by [Pathfinder](crate::Pathfinder) onto the grid, leaving
    /// barriers, start and end untouched. Only [Open](CellState::Open),
    /// [Closed](CellState::Closed) and [Path](CellState::Path) are painted; every other state goes
    /// through [set_state](Grid::set_state). Returns whether the cell changed.
    pub fn mark(&mut self, p: Point, state: CellState) -> bool {
        if !state.is_search_mark() {
            return false;
        }
        match self.get_ix(p) {
            Some(ix) => {
                let cell = &mut self.cells[ix];
                if cell.is_barrier() || cell.is_start() || cell.is_end() {
                    false
                } else {
                    cell.state = state;
                    true
                }
            }
            None => false,
        }
    }

    /// Resets all [Open](CellState::Open), [Closed](CellState::Closed) and
    /// [Path](CellState::Path) cells, which is required before running another search.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.state.is_search_mark()) {
            cell.state = CellState::Unvisited;
        }
    }

    /// Resets every cell, barriers, start and end included.
    pub fn clear(&mut self) {
        info!("Clearing {0}x{0} grid", self.config.rows);
        for cell in self.cells.iter_mut() {
            cell.state = CellState::Unvisited;
        }
        self.refresh_neighbors();
    }

    /// The first cell in row-major order carrying `state`.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells.iter().find(|c| c.state == state).map(|c| c.pos)
    }

    /// Maps a pointer position in pixels to the cell drawn there. Rows run along the horizontal
    /// axis, so a cell's pixel origin is `(row * cell_size, col * cell_size)`.
    pub fn cell_at_pixel(&self, px: u32, py: u32) -> Option<Point> {
        let size = self.cell_size();
        if size == 0 {
            return None;
        }
        let p = Point::new((px / size) as i32, (py / size) as i32);
        if self.in_bounds(p) {
            Some(p)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.config.rows.max(1)) {
            let line = row.iter().map(|c| c.state.symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_all_unvisited() {
        let grid = Grid::new(4);
        assert_eq!(grid.cells().count(), 16);
        assert!(grid.cells().all(|c| c.state() == CellState::Unvisited));
        assert!(!grid.neighbours_dirty());
    }

    #[test]
    fn neighbour_order_and_bounds() {
        let grid = Grid::new(3);
        assert_eq!(
            grid.neighbors_of(Point::new(1, 1)),
            &[
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 0)
            ]
        );
        assert_eq!(
            grid.neighbors_of(Point::new(0, 0)),
            &[Point::new(1, 0), Point::new(0, 1)]
        );
        assert!(grid.neighbors_of(Point::new(3, 0)).is_empty());
        assert!(grid.neighbors_of(Point::new(-1, 0)).is_empty());
    }

    #[test]
    fn barriers_excluded_after_refresh() {
        let mut grid = Grid::new(3);
        grid.set_state(Point::new(1, 0), CellState::Barrier);
        assert!(grid.neighbours_dirty());
        // Stale until refreshed
        assert!(grid.neighbors_of(Point::new(0, 0)).contains(&Point::new(1, 0)));
        grid.refresh_neighbors();
        assert!(!grid.neighbours_dirty());
        assert_eq!(grid.neighbors_of(Point::new(0, 0)), &[Point::new(0, 1)]);
        for cell in grid.cells() {
            assert!(!cell.neighbours().contains(&Point::new(1, 0)));
        }
    }

    #[test]
    fn single_start_and_end() {
        let mut grid = Grid::new(3);
        grid.set_state(Point::new(0, 0), CellState::Start);
        grid.set_state(Point::new(2, 2), CellState::End);
        grid.set_state(Point::new(1, 1), CellState::Start);
        assert_eq!(grid.state(Point::new(0, 0)), Some(CellState::Unvisited));
        assert_eq!(grid.find(CellState::Start), Some(Point::new(1, 1)));
        // Overwriting the end with the start leaves no end behind
        grid.set_state(Point::new(2, 2), CellState::Start);
        assert_eq!(grid.find(CellState::End), None);
        assert_eq!(grid.state(Point::new(1, 1)), Some(CellState::Unvisited));
        assert_eq!(grid.cells().filter(|c| c.is_start()).count(), 1);
    }

    #[test]
    fn reset_and_out_of_bounds() {
        let mut grid = Grid::new(2);
        assert_eq!(grid.set_state(Point::new(5, 5), CellState::Barrier), None);
        grid.set_state(Point::new(0, 1), CellState::End);
        assert_eq!(grid.reset_cell(Point::new(0, 1)), Some(CellState::End));
        assert_eq!(grid.find(CellState::End), None);
    }

    #[test]
    fn mark_preserves_configuration() {
        let mut grid = Grid::new(3);
        grid.set_state(Point::new(0, 0), CellState::Start);
        grid.set_state(Point::new(1, 1), CellState::Barrier);
        assert!(!grid.mark(Point::new(0, 0), CellState::Open));
        assert!(!grid.mark(Point::new(1, 1), CellState::Closed));
        assert!(grid.mark(Point::new(2, 2), CellState::Path));
        grid.clear_search_marks();
        assert_eq!(grid.state(Point::new(2, 2)), Some(CellState::Unvisited));
        assert_eq!(grid.state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(grid.state(Point::new(1, 1)), Some(CellState::Barrier));
        grid.clear();
        assert!(grid.cells().all(|c| c.state() == CellState::Unvisited));
    }

    #[test]
    fn mark_rejects_configuration_states() {
        let mut grid = Grid::new(3);
        grid.set_state(Point::new(0, 0), CellState::Start);
        grid.mark(Point::new(0, 2), CellState::Open);
        for state in [
            CellState::Start,
            CellState::End,
            CellState::Barrier,
            CellState::Unvisited,
        ] {
            assert!(!grid.mark(Point::new(2, 2), state));
            assert_eq!(grid.state(Point::new(2, 2)), Some(CellState::Unvisited));
            assert!(!grid.mark(Point::new(0, 2), state));
            assert_eq!(grid.state(Point::new(0, 2)), Some(CellState::Open));
        }
        assert_eq!(grid.cells().filter(|c| c.is_start()).count(), 1);
        assert_eq!(grid.find(CellState::End), None);
        assert!(!grid.neighbours_dirty());
    }

    #[test]
    fn cell_size_of_degenerate_configs() {
        assert_eq!(GridConfig { rows: 0, width: 800 }.cell_size(), 0);
        assert_eq!(GridConfig { rows: 3, width: 800 }.cell_size(), 266);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            GridConfig {
                rows: u32::MAX as usize + 1,
                width: 800
            }
            .cell_size(),
            0
        );
    }

    #[test]
    fn component_generation() {
        let mut grid = Grid::new(3);
        for row in 0..3 {
            grid.set_state(Point::new(row, 1), CellState::Barrier);
        }
        grid.refresh_neighbors();
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(0, 2)));
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn pixel_mapping() {
        let grid = Grid::from_config(&GridConfig {
            rows: 10,
            width: 100,
        });
        assert_eq!(grid.cell_size(), 10);
        assert_eq!(grid.cell_at_pixel(0, 0), Some(Point::new(0, 0)));
        assert_eq!(grid.cell_at_pixel(35, 99), Some(Point::new(3, 9)));
        assert_eq!(grid.cell_at_pixel(100, 0), None);
    }

    #[test]
    fn display() {
        let mut grid = Grid::new(2);
        grid.set_state(Point::new(0, 0), CellState::Start);
        grid.set_state(Point::new(0, 1), CellState::Barrier);
        grid.set_state(Point::new(1, 1), CellState::End);
        assert_eq!(grid.to_string(), "S#\n.E\n");
    }
}
