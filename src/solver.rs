//! Exhaustive backtracking search.
//!
//! Cells are visited in [`CELL_ORDER`]. The first empty cell must be the
//! anchor of whichever piece covers it, because every smaller cell is already
//! filled, so only placements anchored there are tried. Identical copies of
//! a piece are tried once per level, which keeps a tiling from being emitted
//! again with its copies swapped around.

use std::fmt;
use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::grid::{Cell, Grid, Label, CELL_ORDER};
use crate::pieces::Catalogue;

/// Index of a piece definition within the catalogue list.
///
/// Copies of one definition share an id; two definitions never do, even if
/// their shapes match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId(usize);

/// A completely filled grid, copied out of the search when it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    grid: Grid,
}

impl Solution {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

/// Receives solutions as the search finds them.
pub trait SolutionSink {
    /// Returning `Break` means nobody is listening any more and the search
    /// unwinds without looking further.
    fn accept(&mut self, solution: Solution) -> ControlFlow<()>;
}

impl SolutionSink for Vec<Solution> {
    fn accept(&mut self, solution: Solution) -> ControlFlow<()> {
        self.push(solution);
        ControlFlow::Continue(())
    }
}

/// Adapts a closure into a sink that takes every solution.
pub struct ForEach<F>(pub F);

impl<F: FnMut(Solution)> SolutionSink for ForEach<F> {
    fn accept(&mut self, solution: Solution) -> ControlFlow<()> {
        (self.0)(solution);
        ControlFlow::Continue(())
    }
}

/// Counters gathered over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub solutions: usize,
    /// Placements that fitted and were recursed into.
    pub placements: usize,
    /// Empty cells where no remaining piece fitted.
    pub dead_ends: usize,
}

/// One run of the search. Owns the grid it mutates.
pub struct Search<'a> {
    catalogues: &'a [Catalogue],
    /// One entry per physical copy, copies adjacent; `None` while in use.
    slots: Vec<Option<PieceId>>,
    grid: Grid,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(catalogues: &'a [Catalogue]) -> Self {
        let slots = catalogues
            .iter()
            .enumerate()
            .flat_map(|(index, catalogue)| {
                std::iter::repeat(Some(PieceId(index))).take(catalogue.copies())
            })
            .collect();

        Self {
            catalogues,
            slots,
            grid: Grid::new(),
            stats: SearchStats::default(),
        }
    }

    /// Runs to completion, or until `sink` breaks, and returns the counters.
    pub fn run<S: SolutionSink + ?Sized>(mut self, sink: &mut S) -> SearchStats {
        if self.fill(&CELL_ORDER, Label::FIRST, sink).is_break() {
            debug!(solutions = self.stats.solutions, "solution sink closed, stopping search");
        }

        info!(
            solutions = self.stats.solutions,
            placements = self.stats.placements,
            dead_ends = self.stats.dead_ends,
            "search finished"
        );
        self.stats
    }

    fn fill<S: SolutionSink + ?Sized>(
        &mut self,
        to_fill: &[Cell],
        label: Label,
        sink: &mut S,
    ) -> ControlFlow<()> {
        // skip cells earlier placements already covered
        let Some(next) = to_fill.iter().position(|&cell| self.grid.is_empty_at(cell)) else {
            self.stats.solutions += 1;
            return sink.accept(Solution { grid: self.grid });
        };
        let anchor = to_fill[next];
        let rest = &to_fill[next + 1..];

        let catalogues = self.catalogues;
        let mut last_tried: Option<PieceId> = None;
        let mut placed_any = false;

        for slot in 0..self.slots.len() {
            let Some(piece) = self.slots[slot] else {
                continue;
            };
            if last_tried == Some(piece) {
                continue;
            }

            self.slots[slot] = None;
            for placement in catalogues[piece.0].placements_at(anchor) {
                if !self.grid.fits(placement) {
                    continue;
                }
                placed_any = true;
                self.stats.placements += 1;

                self.grid.place(placement, label);
                let flow = self.fill(rest, label.next(), sink);
                self.grid.unplace(placement);

                if flow.is_break() {
                    self.slots[slot] = Some(piece);
                    return flow;
                }
            }
            self.slots[slot] = Some(piece);
            last_tried = Some(piece);
        }

        if !placed_any {
            self.stats.dead_ends += 1;
        }
        ControlFlow::Continue(())
    }
}
