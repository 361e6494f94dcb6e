//! Wooden Cube Puzzle Solver
//!
//! Enumerates every way a fixed set of pieces can fill a 3x3x3 cube and
//! prints each filling as it is found, one y layer per line.

use std::io::{self, BufWriter, Write};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use woodcube::pieces::{self, Puzzle};

/// Finds every packing of a 3x3x3 cube by a set of polycube pieces.
#[derive(Parser)]
#[command(name = "woodcube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Built-in puzzle to solve.
    #[arg(long, value_enum, default_value_t = Preset::Wooden, global = true)]
    puzzle: Preset,

    /// More logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Print every solution, then the total (default).
    Solve,
    /// Only report the number of solutions.
    Count,
    /// Show how many orientations and placements each piece has.
    Pieces,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    /// Four L pieces, a T, a fixed S and a small corner.
    Wooden,
    /// The seven Soma pieces.
    Soma,
    /// Nine 1x1x3 rods.
    Rods,
    /// Twenty-seven unit cubes.
    Units,
}

impl Preset {
    fn puzzle(self) -> Puzzle {
        match self {
            Preset::Wooden => pieces::WOODEN,
            Preset::Soma => pieces::SOMA,
            Preset::Rods => pieces::RODS,
            Preset::Units => pieces::UNITS,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let puzzle = cli.puzzle.puzzle();
    match cli.command.unwrap_or(Command::Solve) {
        Command::Solve => run_solver(&puzzle, true),
        Command::Count => run_solver(&puzzle, false),
        Command::Pieces => run_pieces(&puzzle),
    }
}

/// Logs go to stderr so stdout only carries solutions.
fn init_tracing(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Streams solutions from the search worker, optionally printing each one.
fn run_solver(puzzle: &Puzzle, print: bool) -> Result<()> {
    let mut stream = woodcube::stream(puzzle)
        .with_context(|| format!("failed to start solving {}", puzzle.name))?;

    let mut out = BufWriter::new(io::stdout().lock());
    let mut count = 0usize;
    for solution in stream.by_ref() {
        if print {
            // blank line between solutions
            writeln!(out, "{solution}")?;
        }
        count += 1;
    }
    out.flush()?;

    stream.finish()?;
    eprintln!("Found {count} solutions");
    Ok(())
}

/// Prints the catalogue summary for each piece.
fn run_pieces(puzzle: &Puzzle) -> Result<()> {
    let catalogues = woodcube::build_catalogues(puzzle)?;

    println!("{:<6} {:>6} {:>12} {:>10}", "piece", "copies", "orientations", "placements");
    for catalogue in &catalogues {
        println!(
            "{:<6} {:>6} {:>12} {:>10}",
            catalogue.name(),
            catalogue.copies(),
            catalogue.orientation_count(),
            catalogue.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_solution_snapshot() {
        let solutions = woodcube::solve(&Preset::Wooden.puzzle()).unwrap();
        insta::assert_snapshot!(solutions[0].to_string());
    }

    #[test]
    fn test_preset_solution_counts() {
        let count = |preset: Preset| woodcube::stream(&preset.puzzle()).unwrap().count();
        assert_eq!(count(Preset::Wooden), 1128);
        assert_eq!(count(Preset::Rods), 21);
        assert_eq!(count(Preset::Units), 1);
    }

    #[test]
    fn test_cli_defaults_to_wooden_solve() {
        let cli = Cli::try_parse_from(["woodcube"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.puzzle, Preset::Wooden));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["woodcube", "count", "--puzzle", "rods", "-vv"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Count)));
        assert!(matches!(cli.puzzle, Preset::Rods));
        assert_eq!(cli.verbose, 2);
    }
}
