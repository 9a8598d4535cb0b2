use crate::cell::CellState;
use crate::error::{ConfigIssue, SearchError};
use crate::grid::Grid;
use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;

/// Manhattan distance between two cells. Admissible and consistent on a 4-connected grid with
/// unit edge costs, so the first time the end is popped its path is a shortest one.
pub fn manhattan(p1: &Point, p2: &Point) -> u32 {
    p1.x.abs_diff(p2.x) + p1.y.abs_diff(p2.y)
}

/// Outcome of a completed [Pathfinder::search].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// The cells from the start (exclusive) to the end (inclusive).
    Found(Vec<Point>),
    NotFound,
    /// The progress callback asked the search to stop.
    Cancelled,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }
    /// Number of steps of a found path.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(<[Point]>::len)
    }
}

#[derive(Debug)]
struct FrontierEntry {
    estimated_cost: u32,
    sequence: u64,
    point: Point,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.sequence == other.sequence
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimate first, earliest insertion among ties
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Bookkeeping of a single run. Only ever touched by the [Pathfinder] that owns it and cleared
/// at the start of each run.
#[derive(Debug, Default)]
struct SearchState {
    came_from: FxHashMap<Point, Point>,
    g_score: FxHashMap<Point, u32>,
    f_score: FxHashMap<Point, u32>,
    open_set: BinaryHeap<FrontierEntry>,
    open_members: FxHashSet<Point>,
    sequence: u64,
}

impl SearchState {
    fn clear(&mut self) {
        self.came_from.clear();
        self.g_score.clear();
        self.f_score.clear();
        self.open_set.clear();
        self.open_members.clear();
        self.sequence = 0;
    }

    fn g(&self, p: &Point) -> u32 {
        self.g_score.get(p).copied().unwrap_or(u32::MAX)
    }

    fn push(&mut self, point: Point) {
        self.open_set.push(FrontierEntry {
            estimated_cost: self.f_score.get(&point).copied().unwrap_or(u32::MAX),
            sequence: self.sequence,
            point,
        });
        self.sequence += 1;
        self.open_members.insert(point);
    }

    /// Walks the predecessor tree back from `end`, reporting every cell strictly between start
    /// and end as [Path](CellState::Path) in the order it is walked.
    fn reconstruct_path<F>(&self, start: Point, end: Point, on_step: &mut F) -> PathResult
    where
        F: FnMut(Point, CellState) -> ControlFlow<()>,
    {
        let mut path = vec![end];
        let mut current = end;
        while let Some(&previous) = self.came_from.get(&current) {
            if previous == start {
                break;
            }
            if on_step(previous, CellState::Path).is_break() {
                return PathResult::Cancelled;
            }
            path.push(previous);
            current = previous;
        }
        path.reverse();
        PathResult::Found(path)
    }
}

/// Runs A* over a [Grid], reporting progress through a callback after every state change so a
/// renderer can draw the search as it unfolds. Keeps its bookkeeping between runs only to reuse
/// allocations.
#[derive(Debug, Default)]
pub struct Pathfinder {
    state: SearchState,
    expansions: usize,
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    /// Number of cells expanded by the last run.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Searches a shortest path from `start` to `end`.
    ///
    /// `on_step` is called with `(cell, Open)` when a cell first enters the frontier, with
    /// `(cell, Closed)` after a cell other than the start is expanded and with `(cell, Path)`
    /// for each cell of the reconstructed path between start and end. Returning
    /// [ControlFlow::Break] stops the run with [PathResult::Cancelled].
    ///
    /// The grid's neighbour caches must reflect the current barriers, see
    /// [Grid::refresh_neighbors]. Cells marked by a previous run are the caller's to reset.
    pub fn search<F>(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        mut on_step: F,
    ) -> Result<PathResult, SearchError>
    where
        F: FnMut(Point, CellState) -> ControlFlow<()>,
    {
        validate(grid, start, end)?;
        if grid.neighbours_dirty() {
            warn!("Searching with stale neighbours, results may be incorrect");
        }
        info!("Searching path from {} to {}", start, end);
        self.expansions = 0;
        let state = &mut self.state;
        state.clear();

        state.g_score.insert(start, 0);
        state.f_score.insert(start, manhattan(&start, &end));
        state.push(start);

        while let Some(FrontierEntry { point: current, .. }) = state.open_set.pop() {
            state.open_members.remove(&current);
            if current == end {
                info!(
                    "Reached {} after {} expansions, reconstructing path",
                    end, self.expansions
                );
                return Ok(state.reconstruct_path(start, end, &mut on_step));
            }

            let tentative_g = state.g(&current) + 1;
            for &neighbour in grid.neighbors_of(current) {
                if tentative_g < state.g(&neighbour) {
                    state.came_from.insert(neighbour, current);
                    state.g_score.insert(neighbour, tentative_g);
                    state
                        .f_score
                        .insert(neighbour, tentative_g + manhattan(&neighbour, &end));
                    if !state.open_members.contains(&neighbour) {
                        state.push(neighbour);
                        if on_step(neighbour, CellState::Open).is_break() {
                            info!("Search cancelled");
                            return Ok(PathResult::Cancelled);
                        }
                    }
                }
            }
            self.expansions += 1;
            debug!("Expanded {} (g = {})", current, tentative_g - 1);

            if current != start && on_step(current, CellState::Closed).is_break() {
                info!("Search cancelled");
                return Ok(PathResult::Cancelled);
            }
        }
        info!(
            "{} is not reachable from {} ({} expansions)",
            end, start, self.expansions
        );
        Ok(PathResult::NotFound)
    }

    /// Like [search](Self::search), with start and end taken from the cells tagged
    /// [Start](CellState::Start) and [End](CellState::End).
    pub fn search_marked<F>(&mut self, grid: &Grid, on_step: F) -> Result<PathResult, SearchError>
    where
        F: FnMut(Point, CellState) -> ControlFlow<()>,
    {
        let start = grid.find(CellState::Start).ok_or(ConfigIssue::MissingStart)?;
        let end = grid.find(CellState::End).ok_or(ConfigIssue::MissingEnd)?;
        self.search(grid, start, end, on_step)
    }
}

/// One-shot search without progress reporting.
pub fn find_path(grid: &Grid, start: Point, end: Point) -> Result<PathResult, SearchError> {
    Pathfinder::new().search(grid, start, end, |_, _| ControlFlow::Continue(()))
}

fn validate(grid: &Grid, start: Point, end: Point) -> Result<(), ConfigIssue> {
    for p in [start, end] {
        match grid.state(p) {
            None => return Err(ConfigIssue::OutOfBounds(p)),
            Some(CellState::Barrier) => return Err(ConfigIssue::Barrier(p)),
            Some(_) => {}
        }
    }
    if start == end {
        warn!("Start and end are both {}", start);
        return Err(ConfigIssue::SameCell(start));
    }
    Ok(())
}
