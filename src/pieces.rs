//! Puzzle piece definitions and their placement catalogues.
//!
//! A piece is defined by a base shape, whether it may be rotated, and how
//! many identical copies are available. Its catalogue lists every distinct
//! way it fits inside the grid, grouped by anchor cell.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::error::{Error, PieceError};
use crate::geometry::{all_orientations, translate, Coord};
use crate::grid::{Cell, Placement, CELL_COUNT, CELL_ORDER};

/// One kind of piece, as configured.
#[derive(Clone, Copy, Debug)]
pub struct PieceSpec {
    pub name: &'static str,
    /// Unit cube positions; order does not matter.
    pub cubes: &'static [Coord],
    /// Whether the piece may be turned into any of the 24 orientations.
    pub rotate: bool,
    /// Number of interchangeable copies.
    pub copies: usize,
}

impl PieceSpec {
    /// Checks the definition before any catalogue is built from it.
    pub fn validate(&self) -> Result<(), PieceError> {
        if self.name.is_empty() {
            return Err(PieceError::EmptyName);
        }
        if self.copies == 0 {
            return Err(PieceError::ZeroCopies { name: self.name });
        }

        let mut seen = FxHashSet::default();
        for &cube in self.cubes {
            if Cell::from_coord(cube).is_none() {
                return Err(PieceError::OutOfBounds {
                    name: self.name,
                    cube,
                });
            }
            if !seen.insert(cube) {
                return Err(PieceError::DuplicateCube {
                    name: self.name,
                    cube,
                });
            }
        }
        Ok(())
    }
}

/// A named problem definition: the pieces to pack into the grid.
#[derive(Clone, Copy, Debug)]
pub struct Puzzle {
    pub name: &'static str,
    pub pieces: &'static [PieceSpec],
}

impl Puzzle {
    /// Validates every piece, failing on the first bad one.
    pub fn validate(&self) -> Result<(), Error> {
        for piece in self.pieces {
            piece.validate().map_err(|source| Error::InvalidPuzzle {
                puzzle: self.name,
                source,
            })?;
        }
        Ok(())
    }

    /// Total cells covered if every copy of every piece is placed.
    pub fn volume(&self) -> usize {
        self.pieces
            .iter()
            .map(|piece| piece.cubes.len() * piece.copies)
            .sum()
    }
}

/// The wooden puzzle: four L pieces, a T, a fixed S and a small corner.
pub const WOODEN: Puzzle = Puzzle {
    name: "wooden",
    pieces: &[
        PieceSpec {
            name: "L",
            cubes: &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0)],
            rotate: true,
            copies: 4,
        },
        PieceSpec {
            name: "T",
            cubes: &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 0, 0)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "S",
            cubes: &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)],
            rotate: false,
            copies: 1,
        },
        PieceSpec {
            name: "R",
            cubes: &[(0, 0, 0), (0, 1, 0), (1, 1, 0)],
            rotate: true,
            copies: 1,
        },
    ],
};

/// The seven Soma cube pieces.
pub const SOMA: Puzzle = Puzzle {
    name: "soma",
    pieces: &[
        PieceSpec {
            name: "L",
            cubes: &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 1, 0)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "T",
            cubes: &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "S",
            cubes: &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "V",
            cubes: &[(0, 0, 0), (1, 0, 0), (0, 1, 0)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "A",
            cubes: &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 0, 1)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "B",
            cubes: &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1)],
            rotate: true,
            copies: 1,
        },
        PieceSpec {
            name: "P",
            cubes: &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 1, 1)],
            rotate: true,
            copies: 1,
        },
    ],
};

/// Nine straight 1x1x3 rods.
pub const RODS: Puzzle = Puzzle {
    name: "rods",
    pieces: &[PieceSpec {
        name: "I",
        cubes: &[(0, 0, 0), (1, 0, 0), (2, 0, 0)],
        rotate: true,
        copies: 9,
    }],
};

/// Twenty-seven unit cubes.
pub const UNITS: Puzzle = Puzzle {
    name: "units",
    pieces: &[PieceSpec {
        name: "o",
        cubes: &[(0, 0, 0)],
        rotate: false,
        copies: CELL_COUNT,
    }],
};

/// Every placement of one piece inside the grid, keyed by anchor cell.
///
/// Immutable once built; safe to share across threads.
#[derive(Clone, Debug)]
pub struct Catalogue {
    name: &'static str,
    copies: usize,
    orientation_count: usize,
    placement_count: usize,
    by_anchor: FxHashMap<Cell, Vec<Placement>>,
}

impl Catalogue {
    /// Enumerates all distinct placements of `piece`.
    ///
    /// Each orientation is tried at all 27 offsets; placements leaving the
    /// grid are dropped and coinciding ones merged.
    pub fn build(piece: &PieceSpec) -> Self {
        let orientations = all_orientations(piece.cubes, piece.rotate);

        let mut placements: Vec<Placement> = orientations
            .iter()
            .flat_map(|orientation| {
                CELL_ORDER
                    .iter()
                    .filter_map(move |offset| place_within_grid(orientation, offset.coord()))
            })
            .collect();

        // a symmetric piece can reach the same cells from several orientations
        placements.sort();
        placements.dedup();

        let placement_count = placements.len();
        let mut by_anchor: FxHashMap<Cell, Vec<Placement>> = FxHashMap::default();
        for placement in placements {
            by_anchor.entry(placement.anchor()).or_default().push(placement);
        }

        debug!(
            piece = piece.name,
            orientations = orientations.len(),
            placements = placement_count,
            "built piece catalogue"
        );

        Self {
            name: piece.name,
            copies: piece.copies,
            orientation_count: orientations.len(),
            placement_count,
            by_anchor,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Interchangeable copies available to the search.
    pub fn copies(&self) -> usize {
        self.copies
    }

    /// Distinct orientations after normalisation (1 for a fixed piece).
    pub fn orientation_count(&self) -> usize {
        self.orientation_count
    }

    /// Total number of placements.
    pub fn len(&self) -> usize {
        self.placement_count
    }

    pub fn is_empty(&self) -> bool {
        self.placement_count == 0
    }

    /// Placements whose smallest cell is `anchor`, in ascending order.
    #[inline]
    pub fn placements_at(&self, anchor: Cell) -> &[Placement] {
        self.by_anchor.get(&anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every placement, anchor by anchor in grid order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> + '_ {
        CELL_ORDER
            .iter()
            .flat_map(move |&anchor| self.placements_at(anchor))
    }
}

/// Translates an orientation by `offset`.
///
/// Returns `None` if any cube would fall outside the grid.
fn place_within_grid(orientation: &[Coord], offset: Coord) -> Option<Placement> {
    let cells = translate(orientation, offset)
        .into_iter()
        .map(Cell::from_coord)
        .collect::<Option<Vec<Cell>>>()?;
    Placement::new(cells)
}

/// Validates the puzzle and builds one catalogue per piece definition.
///
/// Catalogues are returned in the same order as `puzzle.pieces`.
pub fn build_catalogues(puzzle: &Puzzle) -> Result<Vec<Catalogue>, Error> {
    puzzle.validate()?;

    let volume = puzzle.volume();
    if volume != CELL_COUNT {
        warn!(
            puzzle = puzzle.name,
            volume,
            "pieces cover {volume} cells but the grid has {CELL_COUNT}; no solution can exist"
        );
    }

    Ok(puzzle.pieces.iter().map(Catalogue::build).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(cubes: &'static [Coord], rotate: bool) -> PieceSpec {
        PieceSpec {
            name: "test",
            cubes,
            rotate,
            copies: 1,
        }
    }

    #[test]
    fn test_presets_are_valid_and_fill_the_grid() {
        for puzzle in [WOODEN, SOMA, RODS, UNITS] {
            puzzle.validate().unwrap();
            assert_eq!(puzzle.volume(), CELL_COUNT, "{}", puzzle.name);
        }
    }

    #[test]
    fn test_wooden_catalogue_sizes() {
        let catalogues = build_catalogues(&WOODEN).unwrap();
        let sizes: Vec<(&str, usize, usize)> = catalogues
            .iter()
            .map(|c| (c.name(), c.orientation_count(), c.len()))
            .collect();
        assert_eq!(
            sizes,
            vec![("L", 24, 144), ("T", 12, 72), ("S", 1, 6), ("R", 12, 144)]
        );
    }

    #[test]
    fn test_soma_catalogue_sizes() {
        let catalogues = build_catalogues(&SOMA).unwrap();
        let placements: Vec<usize> = catalogues.iter().map(Catalogue::len).collect();
        assert_eq!(placements, vec![144, 72, 72, 144, 96, 64, 96]);
    }

    #[test]
    fn test_small_catalogues() {
        let rod = Catalogue::build(&piece(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)], true));
        assert_eq!((rod.orientation_count(), rod.len()), (3, 27));

        let fixed_rod = Catalogue::build(&piece(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)], false));
        assert_eq!((fixed_rod.orientation_count(), fixed_rod.len()), (1, 9));

        let domino = Catalogue::build(&piece(&[(0, 0, 0), (0, 0, 1)], true));
        assert_eq!((domino.orientation_count(), domino.len()), (3, 54));

        let unit = Catalogue::build(&piece(&[(0, 0, 0)], false));
        assert_eq!(unit.len(), CELL_COUNT);
    }

    #[test]
    fn test_placements_are_valid_distinct_and_anchored() {
        for puzzle in [WOODEN, SOMA, RODS, UNITS] {
            for catalogue in build_catalogues(&puzzle).unwrap() {
                let all: Vec<&Placement> = catalogue.iter().collect();
                assert_eq!(all.len(), catalogue.len());

                let distinct: FxHashSet<&Placement> = all.iter().copied().collect();
                assert_eq!(distinct.len(), all.len(), "{} has duplicates", catalogue.name());

                for anchor in CELL_ORDER {
                    for placement in catalogue.placements_at(anchor) {
                        assert_eq!(placement.anchor(), anchor);
                        assert_eq!(placement.cells().iter().min(), Some(&anchor));
                        for cell in placement.cells() {
                            assert!(Cell::from_coord(cell.coord()).is_some());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fixed_piece_only_translates() {
        let catalogue = Catalogue::build(&piece(&[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)], false));
        for placement in catalogue.iter() {
            let cells: Vec<Coord> = placement.cells().iter().map(|c| c.coord()).collect();
            let (x, y, z) = cells[0];
            assert_eq!(cells, translate(&[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)], (x, y, z)));
        }
    }

    #[test]
    fn test_empty_shape_has_empty_catalogue() {
        let catalogue = Catalogue::build(&piece(&[], true));
        assert!(catalogue.is_empty());
        assert!(catalogue.placements_at(CELL_ORDER[0]).is_empty());
    }

    #[test]
    fn test_grid_spanning_fixed_piece_fits_once() {
        let catalogue = Catalogue::build(&piece(&[(0, 0, 0), (2, 2, 2), (0, 2, 0), (2, 0, 2)], false));
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.placements_at(CELL_ORDER[0]).len(), 1);
    }

    #[test]
    fn test_validation_errors() {
        let duplicate = PieceSpec {
            name: "dup",
            cubes: &[(0, 0, 0), (1, 0, 0), (0, 0, 0)],
            rotate: true,
            copies: 1,
        };
        assert_eq!(
            duplicate.validate(),
            Err(PieceError::DuplicateCube {
                name: "dup",
                cube: (0, 0, 0)
            })
        );

        let negative = PieceSpec {
            name: "neg",
            cubes: &[(0, -1, 0)],
            rotate: false,
            copies: 1,
        };
        assert!(matches!(negative.validate(), Err(PieceError::OutOfBounds { .. })));

        let long = PieceSpec {
            name: "long",
            cubes: &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)],
            rotate: true,
            copies: 1,
        };
        assert!(matches!(
            long.validate(),
            Err(PieceError::OutOfBounds { cube: (3, 0, 0), .. })
        ));

        let unnamed = PieceSpec { name: "", ..negative };
        assert_eq!(unnamed.validate(), Err(PieceError::EmptyName));

        let none = PieceSpec {
            name: "none",
            cubes: &[(0, 0, 0)],
            rotate: false,
            copies: 0,
        };
        assert_eq!(none.validate(), Err(PieceError::ZeroCopies { name: "none" }));
    }

    #[test]
    fn test_puzzle_validation_names_the_puzzle() {
        const BROKEN: Puzzle = Puzzle {
            name: "broken",
            pieces: &[PieceSpec {
                name: "dup",
                cubes: &[(1, 1, 1), (1, 1, 1)],
                rotate: true,
                copies: 1,
            }],
        };
        let err = build_catalogues(&BROKEN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "puzzle broken is misconfigured: piece dup lists cube (1, 1, 1) more than once"
        );
    }
}
