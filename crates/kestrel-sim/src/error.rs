//! Recoverable errors of the simulation kernel.
//!
//! Broken state-machine contracts are not errors: they panic.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown ground symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },
    #[error("layer grid is {found_width}x{found_height}, map is {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MovementError {
    #[error("invalid direction {symbol:?} in path {path:?}")]
    InvalidPath { path: String, symbol: char },
    #[error("trajectory {0:?} has an odd number of coordinates")]
    OddTrajectory(String),
    #[error("invalid coordinate {token:?} in trajectory")]
    InvalidCoordinate { token: String },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Movement(#[from] MovementError),
    #[error("failed to decode save data: {0}")]
    Save(#[from] serde_json::Error),
}
