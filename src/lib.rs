//! # grid_astar
//!
//! The search engine behind an interactive grid pathfinder. A square [Grid] of cells is painted
//! with barriers and a start and end cell, after which a [Pathfinder] runs
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over its 4-connected, uniform-cost
//! graph using the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as
//! heuristic. Progress is reported through a callback after every frontier insertion, expansion
//! and path step, which is also where an embedding renderer can request cancellation.
//!
//! Ties between cells of equal estimated cost are broken by insertion order, so runs on equal
//! grids expand cells in exactly the same sequence.
//!
//! ```
//! use grid_astar::{CellState, Grid, Pathfinder};
//! use grid_util::point::Point;
//! use std::ops::ControlFlow;
//!
//! let mut grid = Grid::new(3);
//! grid.set_state(Point::new(1, 1), CellState::Barrier);
//! grid.refresh_neighbors();
//! let mut pathfinder = Pathfinder::new();
//! let result = pathfinder
//!     .search(&grid, Point::new(0, 0), Point::new(2, 2), |_, _| ControlFlow::Continue(()))
//!     .unwrap();
//! assert_eq!(result.path_len(), Some(4));
//! ```
mod astar;
mod cell;
mod error;
mod grid;

pub use crate::astar::{find_path, manhattan, PathResult, Pathfinder};
pub use crate::cell::{Cell, CellState};
pub use crate::error::{ConfigIssue, SearchError};
pub use crate::grid::{Grid, GridConfig, DEFAULT_ROWS, DEFAULT_WIDTH};
