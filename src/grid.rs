//! The 3x3x3 occupancy grid and the cell-level types placed into it.
//!
//! The grid is a flat array in x-major order where each cell holds the label
//! of the piece that owns it, or nothing while empty.

use std::fmt;
use std::num::NonZeroU8;

use crate::geometry::Coord;

/// Cells per axis.
pub const DIM: usize = 3;

/// Total number of cells in the grid.
pub const CELL_COUNT: usize = DIM * DIM * DIM;

/// Printed for a cell that no piece owns.
pub const EMPTY_SYMBOL: char = '-';

/// An absolute cell inside the grid.
///
/// Unlike a [`Coord`], a `Cell` can only be built in bounds. Ordering is
/// lexicographic on `(x, y, z)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    x: u8,
    y: u8,
    z: u8,
}

/// Every cell in the order the search considers them: x-major, then y, then z.
pub const CELL_ORDER: [Cell; CELL_COUNT] = build_cell_order();

const fn build_cell_order() -> [Cell; CELL_COUNT] {
    let mut order = [Cell { x: 0, y: 0, z: 0 }; CELL_COUNT];
    let mut index = 0;
    while index < CELL_COUNT {
        order[index] = Cell::from_index(index);
        index += 1;
    }
    order
}

impl Cell {
    /// Returns the cell at `coord`, or `None` if it lies outside the grid.
    pub fn from_coord((x, y, z): Coord) -> Option<Self> {
        let in_bounds = |v: i32| (0..DIM as i32).contains(&v);
        if in_bounds(x) && in_bounds(y) && in_bounds(z) {
            Some(Self {
                x: x as u8,
                y: y as u8,
                z: z as u8,
            })
        } else {
            None
        }
    }

    /// Converts a linear x-major index back into a cell.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index / (DIM * DIM)) as u8,
            y: ((index / DIM) % DIM) as u8,
            z: (index % DIM) as u8,
        }
    }

    /// Linear index: `x * DIM * DIM + y * DIM + z`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.x as usize * DIM * DIM + self.y as usize * DIM + self.z as usize
    }

    pub const fn coord(self) -> Coord {
        (self.x as i32, self.y as i32, self.z as i32)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// Marks which placed piece owns a cell.
///
/// Labels only tell pieces apart when rendering; the search never compares
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(NonZeroU8);

impl Label {
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn get(self) -> u8 {
        self.0.get()
    }

    /// Digits for 1 to 9, then `A`, `B`, ... from 10 on.
    pub fn symbol(self) -> char {
        match self.get() {
            n @ 1..=9 => char::from(b'0' + n),
            n => char::from(b'A'.saturating_add(n - 10)),
        }
    }
}

/// One piece occupying specific cells.
///
/// Cells are kept in ascending order, so two placements are equal exactly
/// when they cover the same cells.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    cells: Vec<Cell>,
}

impl Placement {
    /// Builds a placement from cells in any order.
    ///
    /// Returns `None` for an empty list since it has no anchor.
    pub fn new(mut cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        cells.sort_unstable();
        Some(Self { cells })
    }

    /// The smallest cell, which keys the placement in a catalogue.
    #[inline]
    pub fn anchor(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

/// The mutable scratch space the search fills.
///
/// Placements passed in are in bounds by construction, so none of the
/// operations re-check bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [Option<Label>; CELL_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub const fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// True if every cell of `placement` is currently empty.
    #[inline]
    pub fn fits(&self, placement: &Placement) -> bool {
        placement
            .cells()
            .iter()
            .all(|cell| self.cells[cell.index()].is_none())
    }

    /// Marks every cell of `placement` as owned by `label`.
    ///
    /// The caller checks [`Grid::fits`] first; anything underneath is
    /// overwritten.
    #[inline]
    pub fn place(&mut self, placement: &Placement, label: Label) {
        debug_assert!(self.fits(placement), "placing {placement} over another piece");
        for cell in placement.cells() {
            self.cells[cell.index()] = Some(label);
        }
    }

    /// Clears every cell of a placement previously passed to [`Grid::place`].
    #[inline]
    pub fn unplace(&mut self, placement: &Placement) {
        for cell in placement.cells() {
            self.cells[cell.index()] = None;
        }
    }

    #[inline]
    pub fn label_at(&self, cell: Cell) -> Option<Label> {
        self.cells[cell.index()]
    }

    #[inline]
    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.cells[cell.index()].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn symbol_at(&self, x: usize, y: usize, z: usize) -> char {
        self.cells[x * DIM * DIM + y * DIM + z].map_or(EMPTY_SYMBOL, Label::symbol)
    }
}

/// One line per y layer. On each line the x slices sit side by side, five
/// spaces apart, and the z cells inside a slice are one space apart.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..DIM {
            for x in 0..DIM {
                if x > 0 {
                    f.write_str("     ")?;
                }
                for z in 0..DIM {
                    if z > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", self.symbol_at(x, y, z))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
