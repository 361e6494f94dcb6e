//! 3D rotation and translation utilities.
//!
//! A cube has 24 proper rotations. They are built here as 4 spins about the
//! z axis, each followed by one of 6 reorientations that decide where the
//! z axis ends up (4 x 6 = 24).

/// A 3D integer coordinate, local to a piece until it has been placed.
pub type Coord = (i32, i32, i32);

/// A proper rotation of the cube, stored as a 3x3 integer matrix.
///
/// Row `i` holds the coefficients of output component `i`, so applying the
/// rotation is a plain matrix-vector product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    matrix: [[i32; 3]; 3],
}

/// `(x, y, z) -> (y, -x, z)`: quarter turn in the xy plane.
pub const ROTATE_XY: Rotation = Rotation::new([[0, 1, 0], [-1, 0, 0], [0, 0, 1]]);

/// `(x, y, z) -> (x, z, -y)`: quarter turn in the yz plane.
pub const ROTATE_YZ: Rotation = Rotation::new([[1, 0, 0], [0, 0, 1], [0, -1, 0]]);

/// `(x, y, z) -> (-z, y, x)`: quarter turn in the xz plane.
pub const ROTATE_XZ: Rotation = Rotation::new([[0, 0, -1], [0, 1, 0], [1, 0, 0]]);

/// All 24 rotations of the cube, built once at compile time.
///
/// Index `spin * 6 + reorientation`, where `spin` is the power of
/// [`ROTATE_XY`] applied first.
pub const ROTATIONS: [Rotation; 24] = build_rotations();

impl Rotation {
    pub const IDENTITY: Self = Self::new([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    const fn new(matrix: [[i32; 3]; 3]) -> Self {
        Self { matrix }
    }

    /// Rotates a single coordinate.
    #[inline]
    pub const fn apply(&self, (x, y, z): Coord) -> Coord {
        let m = &self.matrix;
        (
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        )
    }

    /// Composes two rotations: the result applies `self` first, then `next`.
    pub const fn then(self, next: Rotation) -> Rotation {
        let mut matrix = [[0; 3]; 3];
        let mut row = 0;
        while row < 3 {
            let mut col = 0;
            while col < 3 {
                let mut k = 0;
                while k < 3 {
                    matrix[row][col] += next.matrix[row][k] * self.matrix[k][col];
                    k += 1;
                }
                col += 1;
            }
            row += 1;
        }
        Rotation { matrix }
    }

    /// Applies this rotation `times` times in a row.
    pub const fn pow(self, times: u32) -> Rotation {
        let mut result = Rotation::IDENTITY;
        let mut i = 0;
        while i < times {
            result = result.then(self);
            i += 1;
        }
        result
    }
}

const fn build_rotations() -> [Rotation; 24] {
    let spins = [
        ROTATE_XY.pow(0),
        ROTATE_XY.pow(1),
        ROTATE_XY.pow(2),
        ROTATE_XY.pow(3),
    ];
    // where the z axis ends up: four turns about x, plus the two x-facing cases
    let reorientations = [
        ROTATE_YZ.pow(0),
        ROTATE_YZ.pow(1),
        ROTATE_YZ.pow(2),
        ROTATE_YZ.pow(3),
        ROTATE_XZ.pow(1),
        ROTATE_XZ.pow(3),
    ];

    let mut table = [Rotation::IDENTITY; 24];
    let mut spin = 0;
    while spin < spins.len() {
        let mut reorientation = 0;
        while reorientation < reorientations.len() {
            table[spin * reorientations.len() + reorientation] =
                spins[spin].then(reorientations[reorientation]);
            reorientation += 1;
        }
        spin += 1;
    }
    table
}

/// Adds `offset` to every coordinate.
pub fn translate(coords: &[Coord], offset: Coord) -> Vec<Coord> {
    coords
        .iter()
        .map(|&(x, y, z)| (x + offset.0, y + offset.1, z + offset.2))
        .collect()
}

/// Generates all unique orientations of a piece.
///
/// Without rotation the only orientation is the sorted base shape, left where
/// it was defined. With rotation every one of the 24 rotations is applied,
/// the result is sorted and shifted so its smallest coordinate sits at the
/// origin, then duplicates are removed. Symmetric pieces yield fewer than 24.
pub fn all_orientations(piece: &[Coord], rotate: bool) -> Vec<Vec<Coord>> {
    if !rotate {
        let mut base = piece.to_vec();
        base.sort_unstable();
        return vec![base];
    }

    let mut orientations: Vec<Vec<Coord>> = ROTATIONS
        .iter()
        .map(|rotation| {
            let mut rotated: Vec<Coord> = piece.iter().map(|&coord| rotation.apply(coord)).collect();
            rotated.sort_unstable();
            anchor_at_origin(rotated)
        })
        .collect();

    // symmetric pieces produce duplicates
    orientations.sort();
    orientations.dedup();
    orientations
}

/// Translates sorted coordinates so the first one lands on the origin.
fn anchor_at_origin(sorted: Vec<Coord>) -> Vec<Coord> {
    match sorted.first() {
        Some(&(x, y, z)) => translate(&sorted, (-x, -y, -z)),
        None => sorted,
    }
}
