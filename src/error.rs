// Error taxonomy for the planning core
//
// Configuration errors describe malformed snapshots (missing or mismatched grid
// dimensions, locations that are not valid indices). Contract errors describe
// callers passing action labels or fields the agent does not know about.
// None of these are retried: they surface to the host as an agent fault.

use thiserror::Error;

use crate::position::GridSize;
use crate::policy::Field;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategyError {
    #[error("position {index} has no grid dimensions")]
    MissingDimensions { index: usize },

    #[error("grid dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: GridSize, right: GridSize },

    #[error("invalid grid size {width}x{height}")]
    InvalidGridSize { width: i64, height: i64 },

    #[error("location {value} is not a non-negative cell index")]
    InvalidLocation { value: i64 },

    #[error("location {index} lies outside a {grid} grid")]
    LocationOutOfBounds { index: usize, grid: GridSize },

    #[error("action '{label}' is not one of the possible actions")]
    UnknownAction { label: String },

    #[error("expected at least {required} possible actions, got {got}")]
    MissingActions { required: usize, got: usize },

    #[error("turn context is missing required field '{0}'")]
    MissingField(Field),

    #[error("agent '{name}' has no location")]
    UnknownAgent { name: String },

    #[error("agent '{name}' has no score")]
    MissingScore { name: String },

    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),

    #[error("search worker stopped before producing a result")]
    SearchAborted,

    #[error("search passed its deadline after {simulations} simulations")]
    DeadlineExceeded { simulations: u64 },
}
