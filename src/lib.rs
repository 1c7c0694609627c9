//! # maze_pathfinding
//!
//! Shortest-path solving and always-solvable maze generation on square grids with
//! 4-connectivity. The entrance is the top-left cell and the exit the bottom-right
//! cell. Paths are found with a
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search) over the
//! implicit unit-cost graph of free cells, and
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! are used to report unsolvable grids without flood-filling.
//!
//! Mazes are grown from a named template by blocking random cells one at a time and
//! keeping only those walls after which the grid can still be solved.
//!
//! ```
//! use maze_pathfinding::{generate, solve, Solution};
//!
//! let grid = generate(12, "slalom", 0.3, 500, Some(7)).unwrap();
//! match solve(&grid).unwrap() {
//!     Solution::Path(path) => assert_eq!(path.first(), grid.entrance()),
//!     Solution::Unsolvable => unreachable!("generated grids are always solvable"),
//! }
//! ```
pub mod error;
pub mod generator;
pub mod grid;
pub mod search;
pub mod solver;
pub mod template;

use core::fmt;

pub use error::{GenerationFailure, GridDefect, MazeError, Result};
pub use generator::{generate, GenerationReport, GeneratorSettings, MazeGenerator};
pub use grid::{validate_matrix, Grid};
pub use solver::{solve, Path, Solution};
pub use template::TemplateRegistry;

/// Smallest side length a valid grid can have.
pub const MIN_SIZE: usize = 2;

/// A position on the grid, addressed by row and column from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// Number of unit moves separating two cells on an empty grid.
    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if the cells share an edge. Says nothing about walls.
    pub fn touches(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The up, right, down and left neighbours in that order. Neighbours that would
    /// fall off the top or left edge are [None]; the bottom and right edges are the
    /// grid's business.
    pub(crate) fn von_neumann(&self) -> [Option<Cell>; 4] {
        [
            self.row.checked_sub(1).map(|row| Cell::new(row, self.col)),
            Some(Cell::new(self.row, self.col + 1)),
            Some(Cell::new(self.row + 1, self.col)),
            self.col.checked_sub(1).map(|col| Cell::new(self.row, col)),
        ]
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
