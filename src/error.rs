use grid_util::point::Point;
use thiserror::Error;

/// Why a start/end pair cannot be searched.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("start and end are both {0}")]
    SameCell(Point),
    #[error("no start cell is set")]
    MissingStart,
    #[error("no end cell is set")]
    MissingEnd,
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("{0} is a barrier")]
    Barrier(Point),
}

/// Errors raised before a search touches its frontier. An unreachable end is not an error, see
/// [PathResult::NotFound](crate::PathResult::NotFound).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
}
