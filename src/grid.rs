use crate::error::{GridDefect, MazeError, Result};
use crate::solver::Path;
use crate::{Cell, MIN_SIZE};
use core::fmt;
use fxhash::FxHashSet;
use itertools::{iproduct, Itertools};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::ops::Range;

/// Square maze where every cell is either free or blocked ([true]). The entrance is
/// the top-left cell and the exit the bottom-right one.
///
/// Adjacency is never stored: [neighbors](Self::neighbors) derives it from the current
/// cell states every time it is asked, so a grid that is edited between searches
/// never serves stale edges.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")
)]
pub struct Grid {
    size: usize,
    blocked: Vec<bool>,
}

/// Checks that a row-major matrix of blocked flags describes a valid maze: square,
/// at least 2x2 and with free entrance and exit.
pub fn validate_matrix(rows: &[Vec<bool>]) -> Result<()> {
    let size = rows.len();
    if let Some((row, r)) = rows.iter().find_position(|r| r.len() != size) {
        return Err(GridDefect::NotSquare {
            rows: size,
            row,
            len: r.len(),
        }
        .into());
    }
    if size < MIN_SIZE {
        return Err(GridDefect::TooSmall { size }.into());
    }
    check_shape(size, rows[0][0], rows[size - 1][size - 1]).map_err(MazeError::from)
}

fn check_shape(
    size: usize,
    entrance_blocked: bool,
    exit_blocked: bool,
) -> std::result::Result<(), GridDefect> {
    if size < MIN_SIZE {
        Err(GridDefect::TooSmall { size })
    } else if entrance_blocked {
        Err(GridDefect::EntranceBlocked)
    } else if exit_blocked {
        Err(GridDefect::ExitBlocked { size })
    } else {
        Ok(())
    }
}

impl Grid {
    /// An all-free grid of the given side length.
    pub fn new(size: usize) -> Result<Grid> {
        if size < MIN_SIZE {
            return Err(GridDefect::TooSmall { size }.into());
        }
        let cells = size
            .checked_mul(size)
            .ok_or(GridDefect::TooLarge { size })?;
        Ok(Grid {
            size,
            blocked: vec![false; cells],
        })
    }

    /// Builds a grid from rows of blocked flags after [validate_matrix] accepts them.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Grid> {
        validate_matrix(&rows)?;
        Ok(Grid {
            size: rows.len(),
            blocked: rows.into_iter().flatten().collect(),
        })
    }

    /// Re-checks the invariants a solver relies on. The side length can't change, but
    /// [set](Self::set) is free to wall off the entrance or exit.
    pub fn validate(&self) -> Result<()> {
        check_shape(
            self.size,
            self.blocked[0],
            self.blocked[self.size * self.size - 1],
        )
        .map_err(MazeError::from)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entrance(&self) -> Cell {
        Cell::new(0, 0)
    }

    pub fn exit(&self) -> Cell {
        Cell::new(self.size - 1, self.size - 1)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    fn ix(&self, cell: Cell) -> Result<usize> {
        if self.in_bounds(cell) {
            Ok(cell.row * self.size + cell.col)
        } else {
            Err(MazeError::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    pub fn is_free(&self, cell: Cell) -> Result<bool> {
        self.ix(cell).map(|ix| !self.blocked[ix])
    }

    pub fn is_blocked(&self, cell: Cell) -> Result<bool> {
        self.ix(cell).map(|ix| self.blocked[ix])
    }

    /// Like [is_free](Self::is_free) but treats everything off the grid as a wall.
    pub fn can_move_to(&self, cell: Cell) -> bool {
        self.is_free(cell).unwrap_or(false)
    }

    pub fn set(&mut self, cell: Cell, blocked: bool) -> Result<()> {
        let ix = self.ix(cell)?;
        self.blocked[ix] = blocked;
        Ok(())
    }

    /// Sets every cell in the given row and column ranges. Ranges reaching past the
    /// edge are clipped.
    pub fn set_rect(&mut self, rows: Range<usize>, cols: Range<usize>, blocked: bool) {
        let rows = rows.start.min(self.size)..rows.end.min(self.size);
        let cols = cols.start.min(self.size)..cols.end.min(self.size);
        for (row, col) in iproduct!(rows, cols) {
            self.blocked[row * self.size + col] = blocked;
        }
    }

    /// The free cells sharing an edge with `cell`, in the order up, right, down, left.
    /// Breadth-first search visits them in this order, which decides which of several
    /// equally short paths gets returned.
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        if !self.in_bounds(cell) {
            return SmallVec::new();
        }
        cell.von_neumann()
            .into_iter()
            .flatten()
            .filter(|&n| self.can_move_to(n))
            .collect()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        iproduct!(0..self.size, 0..self.size).map(|(row, col)| Cell::new(row, col))
    }

    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&c| self.can_move_to(c))
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Fraction of all cells that are blocked.
    pub fn density(&self) -> f64 {
        self.blocked_count() as f64 / (self.size * self.size) as f64
    }

    /// Copies the grid out as rows of blocked flags.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.blocked.chunks(self.size).map(<[bool]>::to_vec).collect()
    }

    /// Links every pair of adjacent free cells in a fresh [UnionFind] over row-major
    /// cell indices.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.size * self.size);
        for cell in self.free_cells() {
            let ix = cell.row * self.size + cell.col;
            // Looking right and down is enough to see every edge once.
            for n in [Cell::new(cell.row, cell.col + 1), Cell::new(cell.row + 1, cell.col)] {
                if self.can_move_to(n) {
                    components.union(ix, n.row * self.size + n.col);
                }
            }
        }
        components
    }

    /// Checks whether both cells are free and on the same connected component.
    pub fn connected(&self, components: &UnionFind<usize>, a: Cell, b: Cell) -> bool {
        match (self.ix(a), self.ix(b)) {
            (Ok(a_ix), Ok(b_ix)) => {
                !self.blocked[a_ix] && !self.blocked[b_ix] && components.equiv(a_ix, b_ix)
            }
            _ => false,
        }
    }

    /// Display adapter drawing `path` on top of the grid with `*`.
    pub fn with_path(&self, path: &Path) -> WithPath<'_> {
        WithPath {
            grid: self,
            on_path: path.iter().copied().collect(),
        }
    }

    fn write_rows(&self, f: &mut fmt::Formatter, on_path: &FxHashSet<Cell>) -> fmt::Result {
        for row in 0..self.size {
            let line = (0..self.size)
                .map(|col| {
                    let cell = Cell::new(row, col);
                    if on_path.contains(&cell) {
                        '*'
                    } else if self.blocked[row * self.size + col] {
                        '#'
                    } else {
                        '.'
                    }
                })
                .join("");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = MazeError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Grid> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Vec<Vec<bool>> {
        grid.rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_rows(f, &FxHashSet::default())
    }
}

/// See [Grid::with_path].
pub struct WithPath<'a> {
    grid: &'a Grid,
    on_path: FxHashSet<Cell>,
}

impl fmt::Display for WithPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.grid.write_rows(f, &self.on_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_str(s: &str) -> Grid {
        Grid::from_rows(
            s.lines()
                .map(|l| l.trim().chars().map(|c| c == '#').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn non_square_matrix_is_rejected() {
        let rows = vec![vec![false; 4]; 3];
        assert_eq!(
            validate_matrix(&rows),
            Err(MazeError::InvalidGrid(GridDefect::NotSquare {
                rows: 3,
                row: 0,
                len: 4
            }))
        );
        assert!(Grid::from_rows(rows).is_err());
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let rows = vec![vec![false; 3], vec![false; 3], vec![false; 2]];
        assert!(matches!(
            validate_matrix(&rows),
            Err(MazeError::InvalidGrid(GridDefect::NotSquare { row: 2, .. }))
        ));
    }

    #[test]
    fn too_small_is_rejected() {
        assert_eq!(
            Grid::new(1),
            Err(MazeError::InvalidGrid(GridDefect::TooSmall { size: 1 }))
        );
        assert_eq!(
            validate_matrix(&[]),
            Err(MazeError::InvalidGrid(GridDefect::TooSmall { size: 0 }))
        );
        assert_eq!(
            validate_matrix(&[vec![false]]),
            Err(MazeError::InvalidGrid(GridDefect::TooSmall { size: 1 }))
        );
    }

    #[test]
    fn side_whose_area_overflows_is_rejected() {
        assert_eq!(
            Grid::new(usize::MAX),
            Err(MazeError::InvalidGrid(GridDefect::TooLarge { size: usize::MAX }))
        );
    }

    #[test]
    fn blocked_corners_are_rejected() {
        let mut rows = vec![vec![false; 3]; 3];
        rows[0][0] = true;
        assert_eq!(
            validate_matrix(&rows),
            Err(MazeError::InvalidGrid(GridDefect::EntranceBlocked))
        );
        rows[0][0] = false;
        rows[2][2] = true;
        assert_eq!(
            validate_matrix(&rows),
            Err(MazeError::InvalidGrid(GridDefect::ExitBlocked { size: 3 }))
        );

        let mut grid = Grid::new(3).unwrap();
        assert!(grid.validate().is_ok());
        grid.set(grid.exit(), true).unwrap();
        assert!(grid.validate().is_err());
    }

    #[test]
    fn out_of_bounds_queries_fail() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(
            grid.is_free(Cell::new(0, 3)),
            Err(MazeError::OutOfBounds {
                cell: Cell::new(0, 3),
                size: 3
            })
        );
        assert!(grid.is_blocked(Cell::new(3, 0)).is_err());
        assert!(!grid.can_move_to(Cell::new(5, 5)));
        assert!(grid.neighbors(Cell::new(7, 0)).is_empty());
        assert!(Grid::new(3).unwrap().set(Cell::new(3, 3), true).is_err());
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        // .#.
        // ...
        // .#.
        let grid = grid_from_str(".#.\n...\n.#.");
        assert_eq!(
            grid.neighbors(Cell::new(1, 1)).as_slice(),
            &[Cell::new(1, 2), Cell::new(1, 0)]
        );
        assert_eq!(
            grid.neighbors(Cell::new(0, 0)).as_slice(),
            &[Cell::new(1, 0)]
        );
        assert_eq!(
            grid.neighbors(Cell::new(2, 2)).as_slice(),
            &[Cell::new(1, 2)]
        );
    }

    #[test]
    fn set_rect_is_clipped() {
        let mut grid = Grid::new(4).unwrap();
        grid.set_rect(2..10, 1..10, true);
        assert_eq!(grid.blocked_count(), 6);
        assert!(grid.is_free(Cell::new(2, 0)).unwrap());
        assert!(grid.is_blocked(Cell::new(3, 3)).unwrap());
        assert_eq!(grid.density(), 6.0 / 16.0);
    }

    /// Tests whether cells are correctly mapped to different connected components.
    #[test]
    fn test_component_generation() {
        // .#.
        // .#.
        // .#.
        let grid = grid_from_str(".#.\n.#.\n.#.");
        let components = grid.components();
        assert!(grid.connected(&components, Cell::new(0, 0), Cell::new(2, 0)));
        assert!(grid.connected(&components, Cell::new(0, 2), Cell::new(2, 2)));
        assert!(!grid.connected(&components, grid.entrance(), grid.exit()));
        assert!(!grid.connected(&components, Cell::new(0, 0), Cell::new(0, 1)));
        assert!(!grid.connected(&components, Cell::new(0, 0), Cell::new(9, 9)));
    }

    /// Diagonal contact does not connect cells on a 4-grid.
    #[test]
    fn diagonal_does_not_connect() {
        // .#
        // #.
        let mut grid = Grid::new(2).unwrap();
        grid.set(Cell::new(0, 1), true).unwrap();
        grid.set(Cell::new(1, 0), true).unwrap();
        let components = grid.components();
        assert!(!grid.connected(&components, grid.entrance(), grid.exit()));
    }

    #[test]
    fn rows_round_trip_and_display() {
        let text = "..#\n#..\n...\n";
        let grid = grid_from_str(text);
        assert_eq!(grid.to_string(), text);
        assert_eq!(Grid::from_rows(grid.rows()).unwrap(), grid);
        assert_eq!(grid.free_cells().count(), 7);
        assert_eq!(grid.cells().nth(4), Some(Cell::new(1, 1)));
    }
}
