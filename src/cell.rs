use core::fmt;
use grid_util::point::Point;

/// The traversal state of a single [Cell]. The shell paints
/// [Barrier](CellState::Barrier), [Start](CellState::Start) and [End](CellState::End); the search
/// reports [Open](CellState::Open), [Closed](CellState::Closed) and [Path](CellState::Path).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Unvisited,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
    Barrier,
    Start,
    End,
    Path,
}

impl CellState {
    /// Marks painted by a search run, cleared again by
    /// [clear_search_marks](crate::Grid::clear_search_marks).
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }

    pub fn symbol(self) -> char {
        match self {
            CellState::Unvisited => '.',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Path => '*',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A grid cell at `(row, col)`, stored as a [Point] with `x` the row and `y` the column.
/// Keeps a cache of its passable orthogonal neighbours which is only valid as of the last
/// [refresh_neighbors](crate::Grid::refresh_neighbors).
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) pos: Point,
    pub(crate) state: CellState,
    pub(crate) neighbours: Vec<Point>,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Cell {
        Cell {
            pos: Point::new(row as i32, col as i32),
            state: CellState::Unvisited,
            neighbours: Vec::new(),
        }
    }
    pub fn position(&self) -> Point {
        self.pos
    }
    pub fn row(&self) -> usize {
        self.pos.x as usize
    }
    pub fn col(&self) -> usize {
        self.pos.y as usize
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn neighbours(&self) -> &[Point] {
        &self.neighbours
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }
    pub fn is_open(&self) -> bool {
        self.state == CellState::Open
    }
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }
}
