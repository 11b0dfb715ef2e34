//! Level layouts built from text.
//!
//! A [`Layout`] is the "world" block of a level: one line per grid row, one
//! character per cell. Whitespace between characters is ignored, so both
//! `"w.w"` and `"w . w"` describe the same three cells. The layout only
//! decides shape and per-cell markers; which markers block movement is up
//! to the caller of [`Layout::to_grid`].

use std::fmt;

use crate::geom::Coord;
use crate::grid::{Grid, GridError};

/// A rectangular block of single-character cell markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    cells: Vec<char>,
    rows: i32,
    cols: i32,
}

impl Layout {
    /// Parse a layout accepting any non-whitespace character.
    pub fn new(s: &str) -> Result<Self, LayoutError> {
        Self::parse(s, None)
    }

    /// Parse a layout, rejecting characters not in `allowed`.
    pub fn with_chars(s: &str, allowed: &str) -> Result<Self, LayoutError> {
        Self::parse(s, Some(allowed))
    }

    fn parse(s: &str, allowed: Option<&str>) -> Result<Self, LayoutError> {
        let mut cells = Vec::new();
        let mut rows = 0;
        let mut cols: Option<i32> = None;

        for (line_no, line) in s.lines().enumerate() {
            let row: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if row.is_empty() {
                continue;
            }
            let width = row.len() as i32;
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(LayoutError::InconsistentWidth {
                        line: line_no + 1,
                        expected,
                        found: width,
                    });
                }
                Some(_) => {}
            }
            if let Some(allowed) = allowed {
                if let Some(pos) = row.iter().position(|ch| !allowed.contains(*ch)) {
                    return Err(LayoutError::InvalidChar {
                        ch: row[pos],
                        coord: Coord::new(rows, pos as i32),
                    });
                }
            }
            cells.extend(row);
            rows += 1;
        }

        let Some(cols) = cols else {
            return Err(LayoutError::Empty);
        };
        Ok(Self { cells, rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Marker at `c`, or `None` off the layout.
    pub fn at(&self, c: Coord) -> Option<char> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        self.cells.get((c.row * self.cols + c.col) as usize).copied()
    }

    /// Row-major iterator over `(Coord, marker)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &ch)| (Coord::new(i as i32 / cols, i as i32 % cols), ch))
    }

    /// First cell (row-major) holding `ch`.
    pub fn find(&self, ch: char) -> Option<Coord> {
        self.iter().find(|&(_, c)| c == ch).map(|(p, _)| p)
    }

    /// Every cell holding `ch`, row-major.
    pub fn find_all(&self, ch: char) -> Vec<Coord> {
        self.iter().filter(|&(_, c)| c == ch).map(|(p, _)| p).collect()
    }

    /// Build a grid of the same shape; cells whose marker satisfies
    /// `blocked` start occupied.
    pub fn to_grid(&self, blocked: impl Fn(char) -> bool) -> Result<Grid, LayoutError> {
        let grid = Grid::from_fn(self.rows, self.cols, |c| self.at(c).is_some_and(&blocked))?;
        log::debug!(
            "layout: built {}x{} grid, {} clear cells",
            self.rows,
            self.cols,
            grid.clear_count()
        );
        Ok(grid)
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No non-blank lines.
    Empty,
    /// A row has a different number of cells than the first row.
    InconsistentWidth {
        line: usize,
        expected: i32,
        found: i32,
    },
    /// A character outside the permitted set was found.
    InvalidChar { ch: char, coord: Coord },
    /// The parsed shape could not form a grid.
    Grid(GridError),
}

impl From<GridError> for LayoutError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: no rows"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, coord } => {
                write!(f, "layout: invalid character \u{201c}{ch}\u{201d} at {coord}")
            }
            Self::Grid(e) => write!(f, "layout: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
w w w w
w p . w
w . g w
w w w w";

    #[test]
    fn parse_and_size() {
        let l = Layout::new(ROOM).unwrap();
        assert_eq!((l.rows(), l.cols()), (4, 4));
        assert_eq!(l.at(Coord::new(1, 1)), Some('p'));
        assert_eq!(l.at(Coord::new(4, 0)), None);
    }

    #[test]
    fn spacing_is_optional() {
        let a = Layout::new("w.\n.w").unwrap();
        let b = Layout::new("  w .\n\n . w  \n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn find_markers() {
        let l = Layout::new(ROOM).unwrap();
        assert_eq!(l.find('p'), Some(Coord::new(1, 1)));
        assert_eq!(l.find('g'), Some(Coord::new(2, 2)));
        assert_eq!(l.find('x'), None);
        assert_eq!(l.find_all('.').len(), 2);
    }

    #[test]
    fn to_grid_blocks_walls() {
        let l = Layout::new(ROOM).unwrap();
        let g = l.to_grid(|ch| ch == 'w').unwrap();
        assert_eq!(g.clear_count(), 4);
        assert!(g.is_clear(g.node_at(Coord::new(1, 1)).unwrap()));
        assert!(!g.is_clear(g.node_at(Coord::new(0, 3)).unwrap()));
    }

    #[test]
    fn inconsistent_width_error() {
        assert_eq!(
            Layout::new("ww\nwww"),
            Err(LayoutError::InconsistentWidth {
                line: 2,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn empty_error() {
        assert_eq!(Layout::new(" \n\n"), Err(LayoutError::Empty));
    }

    #[test]
    fn allowed_chars() {
        assert!(Layout::with_chars(ROOM, "wpg.").is_ok());
        assert_eq!(
            Layout::with_chars("w.\n.x", "w."),
            Err(LayoutError::InvalidChar {
                ch: 'x',
                coord: Coord::new(1, 1)
            })
        );
    }
}
