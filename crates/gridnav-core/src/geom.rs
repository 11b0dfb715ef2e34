//! Lattice geometry: [`Coord`] and the eight compass [`Direction`]s.
//!
//! Rows grow towards the south, columns towards the east. A `Coord` may lie
//! outside any grid; only [`Grid`](crate::Grid) decides whether it exists.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A `(row, col)` lattice coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Coordinate one step away in direction `d`.
    #[inline]
    pub const fn step(self, d: Direction) -> Self {
        let (dr, dc) = d.offset();
        self.shift(dr, dc)
    }

    /// Absolute per-axis distance `(|drow|, |dcol|)`.
    #[inline]
    pub fn delta(self, other: Coord) -> (i32, i32) {
        ((self.row - other.row).abs(), (self.col - other.col).abs())
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    // Row-major, matching node id assignment.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Cost of an orthogonal step.
pub const ORTHOGONAL_COST: i32 = 10;
/// Cost of a diagonal step (10·√2 rounded down).
pub const DIAGONAL_COST: i32 = 14;

/// One of the eight compass directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl Direction {
    /// All directions clockwise starting at north-west.
    ///
    /// The search relies on this order: every diagonal sits between its two
    /// flanking orthogonals, at indices `i - 1` and `i + 1` (mod 8).
    pub const CLOCKWISE: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
    ];

    /// Position of this direction in [`CLOCKWISE`](Self::CLOCKWISE).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(drow, dcol)` of a single step.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
        }
    }

    /// The direction pointing back.
    #[inline]
    pub const fn opposite(self) -> Direction {
        Self::CLOCKWISE[(self.index() + 4) % 8]
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthWest | Direction::NorthEast | Direction::SouthEast | Direction::SouthWest
        )
    }

    /// Movement cost of one step in this direction.
    #[inline]
    pub const fn step_cost(self) -> i32 {
        if self.is_diagonal() {
            DIAGONAL_COST
        } else {
            ORTHOGONAL_COST
        }
    }

    /// The two orthogonal directions a diagonal is composed of, vertical
    /// component first. `None` for orthogonal directions.
    #[inline]
    pub const fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthWest => Some((Direction::North, Direction::West)),
            Direction::NorthEast => Some((Direction::North, Direction::East)),
            Direction::SouthEast => Some((Direction::South, Direction::East)),
            Direction::SouthWest => Some((Direction::South, Direction::West)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::NorthWest => "NW",
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
        };
        f.write_str(s)
    }
}
