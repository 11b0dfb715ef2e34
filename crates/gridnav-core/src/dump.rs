//! Plain-text diagnostic dumps of a [`Grid`].
//!
//! Each cell prints as its tag (`.` clear, `B` blocked). A path overlay
//! marks the first cell `S`, the last `G`, and numbers the cells in between
//! with cycling digits `0` through `9`.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use crate::geom::Coord;
use crate::grid::Grid;
use crate::node::NodeId;

/// Overlay marking the start of a path.
pub const START_TAG: char = 'S';
/// Overlay marking the end of a path.
pub const GOAL_TAG: char = 'G';

/// A renderable snapshot of a grid plus optional overlays.
///
/// Overlays never touch the grid itself; later overlays win.
pub struct Dump<'a> {
    grid: &'a Grid,
    overlay: Vec<(NodeId, char)>,
}

impl Grid {
    /// Start a diagnostic dump of this grid.
    pub fn dump(&self) -> Dump<'_> {
        Dump {
            grid: self,
            overlay: Vec::new(),
        }
    }
}

impl<'a> Dump<'a> {
    /// Overlay a path given as node ids from start to goal.
    pub fn with_path(mut self, path: &[NodeId]) -> Self {
        if let Some((&first, rest)) = path.split_first() {
            self.overlay.push((first, START_TAG));
            for (i, &id) in rest.iter().enumerate() {
                let digit = char::from_digit((i % 10) as u32, 10).unwrap_or('?');
                self.overlay.push((id, digit));
            }
            if let Some(&last) = path.last() {
                self.overlay.push((last, GOAL_TAG));
            }
        }
        self
    }

    /// Overlay a single character on one node.
    pub fn with_mark(mut self, id: NodeId, ch: char) -> Self {
        self.overlay.push((id, ch));
        self
    }

    /// Resolved character for every cell, row-major.
    pub fn cells(&self) -> Vec<(Coord, char)> {
        let mut chars: Vec<char> = self.grid.iter().map(|n| n.tag()).collect();
        for &(id, ch) in &self.overlay {
            if let Some(slot) = chars.get_mut(id.index()) {
                *slot = ch;
            }
        }
        self.grid
            .iter()
            .zip(chars)
            .map(|(n, ch)| (n.coord(), ch))
            .collect()
    }

    /// Write the dump, one grid row per line.
    pub fn write_to(&self, mut w: impl io::Write) -> io::Result<()> {
        write!(w, "{self}")
    }

    /// Write the dump to a file, replacing it if present.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let mut w = io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        log::debug!("dump: wrote {}", path.display());
        Ok(())
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.grid.cols() as usize;
        for (i, (_, ch)) in self.cells().into_iter().enumerate() {
            let col = i % cols;
            if col > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{ch}")?;
            if col + 1 == cols {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dump() {
        let mut g = Grid::new(2, 3).unwrap();
        g.set_occupied(g.node_at(Coord::new(0, 1)).unwrap());
        assert_eq!(g.dump().to_string(), ". B .\n. . .\n");
    }

    #[test]
    fn path_overlay() {
        let g = Grid::new(1, 13).unwrap();
        let path: Vec<NodeId> = (0..13).map(NodeId).collect();
        let s = g.dump().with_path(&path).to_string();
        assert_eq!(s, "S 0 1 2 3 4 5 6 7 8 9 0 G\n");
        // Overlays do not leak into the grid.
        assert_eq!(g.dump().to_string(), ". . . . . . . . . . . . .\n");
    }

    #[test]
    fn singleton_path_shows_goal() {
        let g = Grid::new(1, 2).unwrap();
        let s = g.dump().with_path(&[NodeId(1)]).to_string();
        assert_eq!(s, ". G\n");
    }

    #[test]
    fn mark_and_write() {
        let g = Grid::new(2, 2).unwrap();
        let mut out = Vec::new();
        g.dump().with_mark(NodeId(3), 'S').write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ". .\n. S\n");
    }

    #[test]
    fn save_flushes_to_disk() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set_occupied(NodeId(1));
        let path = std::env::temp_dir().join(format!("gridnav-dump-{}.txt", std::process::id()));
        g.dump().with_path(&[NodeId(0), NodeId(3)]).save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "S B\n. G\n");
    }

    #[test]
    fn save_reports_unwritable_path() {
        let g = Grid::new(1, 1).unwrap();
        let dir = std::env::temp_dir().join("gridnav-no-such-dir").join("x");
        assert!(g.dump().save(dir.join("dump.txt")).is_err());
    }
}
