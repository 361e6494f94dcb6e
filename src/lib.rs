//! Wooden Cube Puzzle Solver Library
//!
//! Finds every way a set of polycube pieces can exactly fill a 3x3x3 cube.
//! Piece catalogues are built once up front; the search then fills the grid
//! cell by cell and reports each complete filling.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod solver;
pub mod stream;

pub use error::{Error, PieceError};
pub use pieces::{build_catalogues, Catalogue, PieceSpec, Puzzle};
pub use solver::{ForEach, Search, SearchStats, Solution, SolutionSink};
pub use stream::SolutionStream;

/// Builds the catalogues for `puzzle` and collects every solution.
pub fn solve(puzzle: &Puzzle) -> Result<Vec<Solution>, Error> {
    let catalogues = build_catalogues(puzzle)?;
    let mut solutions: Vec<Solution> = Vec::new();
    Search::new(&catalogues).run(&mut solutions);
    Ok(solutions)
}

/// Builds the catalogues for `puzzle` and streams solutions from a worker
/// thread.
pub fn stream(puzzle: &Puzzle) -> Result<SolutionStream, Error> {
    SolutionStream::spawn(build_catalogues(puzzle)?)
}
