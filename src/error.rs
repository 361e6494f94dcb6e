//! Error types for puzzle configuration and the search worker.

use thiserror::Error;

use crate::geometry::Coord;

/// A piece definition that cannot be turned into a catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceError {
    #[error("piece has an empty name")]
    EmptyName,
    #[error("piece {name} lists cube {cube:?} more than once")]
    DuplicateCube { name: &'static str, cube: Coord },
    #[error("piece {name} has cube {cube:?} outside the 3x3x3 grid")]
    OutOfBounds { name: &'static str, cube: Coord },
    #[error("piece {name} has zero copies")]
    ZeroCopies { name: &'static str },
}

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("puzzle {puzzle} is misconfigured: {source}")]
    InvalidPuzzle {
        puzzle: &'static str,
        #[source]
        source: PieceError,
    },
    #[error("failed to start search worker")]
    Spawn(#[source] std::io::Error),
    #[error("search worker panicked")]
    WorkerPanicked,
}
