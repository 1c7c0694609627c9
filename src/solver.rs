use crate::error::{MazeError, Result};
use crate::grid::Grid;
use crate::search::{bfs, reachable_count};
use crate::Cell;
use fxhash::FxHashSet;
use itertools::Itertools;
use log::{debug, log_enabled, warn, Level};

/// Cells from the entrance to the exit, each one step away from the previous one.
/// Owns its cells; it stays valid however the grid it was found on changes later.
/// Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Cell>", into = "Vec<Cell>")
)]
pub struct Path(Vec<Cell>);

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.0.iter()
    }

    /// Number of cells on the path, entrance and exit included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept next to [len](Self::len).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves, one less than [len](Self::len).
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn first(&self) -> Cell {
        self.0[0]
    }

    pub fn last(&self) -> Cell {
        self.0[self.0.len() - 1]
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.0.contains(cell)
    }

    /// Checks that this is a walk from entrance to exit over free cells of `grid` that
    /// only makes edge moves and never visits a cell twice.
    pub fn is_valid_for(&self, grid: &Grid) -> bool {
        let mut seen = FxHashSet::default();
        !self.0.is_empty()
            && self.first() == grid.entrance()
            && self.last() == grid.exit()
            && self.0.iter().all(|&c| grid.can_move_to(c) && seen.insert(c))
            && self.0.iter().tuple_windows().all(|(a, b)| a.touches(b))
    }

    pub fn into_inner(self) -> Vec<Cell> {
        self.0
    }
}

impl TryFrom<Vec<Cell>> for Path {
    type Error = MazeError;

    fn try_from(cells: Vec<Cell>) -> Result<Path> {
        if cells.is_empty() {
            return Err(MazeError::EmptyPath);
        }
        Ok(Path(cells))
    }
}

impl From<Path> for Vec<Cell> {
    fn from(path: Path) -> Vec<Cell> {
        path.0
    }
}

impl IntoIterator for Path {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of [solve]. Unsolvable grids are a normal answer, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Solution {
    Path(Path),
    Unsolvable,
}

impl Solution {
    pub fn is_solvable(&self) -> bool {
        matches!(self, Solution::Path(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Solution::Path(path) => Some(path),
            Solution::Unsolvable => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Solution::Path(path) => Some(path),
            Solution::Unsolvable => None,
        }
    }
}

/// Computes a shortest path from the entrance to the exit of `grid`.
///
/// Fails only if the grid itself is invalid. Entrance and exit are first checked to
/// lie on the same connected component, so a disconnected grid is answered without
/// flooding it. Otherwise a breadth-first search runs from the entrance with
/// neighbours visited up, right, down, left; for a given grid the same path is
/// returned every time.
pub fn solve(grid: &Grid) -> Result<Solution> {
    grid.validate()?;
    let (entrance, exit) = (grid.entrance(), grid.exit());
    if !grid.connected(&grid.components(), entrance, exit) {
        debug!("{} is not reachable from {}", exit, entrance);
        return Ok(Solution::Unsolvable);
    }
    debug!("{} is reachable from {}, computing path", exit, entrance);
    match bfs(&entrance, |&cell| grid.neighbors(cell), |&cell| cell == exit) {
        Some(cells) => Ok(Solution::Path(Path(cells))),
        None => {
            warn!("Reachable exit could not be pathed to, are the components correct?");
            if log_enabled!(Level::Debug) {
                let seen = reachable_count(&entrance, |&cell| grid.neighbors(cell));
                debug!("Search saw {} cells from {}", seen, entrance);
            }
            Ok(Solution::Unsolvable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GridDefect, MazeError};

    fn grid_from_str(s: &str) -> Grid {
        Grid::from_rows(
            s.lines()
                .map(|l| l.trim().chars().map(|c| c == '#').collect())
                .collect(),
        )
        .unwrap()
    }

    /// Asserts that the optimal 4 step solution is found on an empty 3x3 grid.
    #[test]
    fn solve_empty_three_by_three() {
        let grid = Grid::new(3).unwrap();
        let path = solve(&grid).unwrap().into_path().unwrap();
        assert_eq!(path.steps(), 4);
        assert_eq!(path.len(), 5);
        assert!(path.is_valid_for(&grid));
    }

    /// Right comes before down, so on an empty grid the path runs along the top row
    /// and then down the last column.
    #[test]
    fn ties_follow_neighbour_order() {
        let grid = Grid::new(3).unwrap();
        let path = solve(&grid).unwrap().into_path().unwrap();
        let expected: Vec<Cell> = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
            .into_iter()
            .map(Cell::from)
            .collect();
        assert_eq!(path.cells(), expected.as_slice());
    }

    #[test]
    fn walled_in_entrance_is_unsolvable() {
        // .#.
        // #..
        // ...
        let grid = grid_from_str(".#.\n#..\n...");
        assert_eq!(solve(&grid).unwrap(), Solution::Unsolvable);
    }

    #[test]
    fn detour_around_a_wall() {
        // ..#..
        // .#...
        // .#.#.
        // ...#.
        // ####.
        let grid = grid_from_str("..#..\n.#...\n.#.#.\n...#.\n####.");
        let path = solve(&grid).unwrap().into_path().unwrap();
        assert!(path.is_valid_for(&grid));
        // Down the first column, across row 3, up and around through row 1.
        assert_eq!(path.steps(), 12);
    }

    #[test]
    fn minimal_grid() {
        let grid = Grid::new(2).unwrap();
        let path = solve(&grid).unwrap().into_path().unwrap();
        assert_eq!(path.steps(), 2);
    }

    #[test]
    fn repeated_solves_agree() {
        let grid = grid_from_str("....\n.##.\n....\n.#..");
        assert_eq!(solve(&grid).unwrap(), solve(&grid).unwrap());
    }

    #[test]
    fn invalid_grid_is_an_error() {
        let mut grid = Grid::new(4).unwrap();
        grid.set(grid.entrance(), true).unwrap();
        assert_eq!(
            solve(&grid),
            Err(MazeError::InvalidGrid(GridDefect::EntranceBlocked))
        );
    }

    #[test]
    fn invalid_paths_are_detected() {
        let grid = Grid::new(3).unwrap();
        fn cells(v: &[(usize, usize)]) -> Path {
            Path(v.iter().copied().map(Cell::from).collect())
        }
        // Jumps a cell.
        assert!(!cells(&[(0, 0), (0, 2), (1, 2), (2, 2)]).is_valid_for(&grid));
        // Revisits a cell.
        assert!(!cells(&[(0, 0), (0, 1), (0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
            .is_valid_for(&grid));
        // Does not end at the exit.
        assert!(!cells(&[(0, 0), (0, 1)]).is_valid_for(&grid));
        assert!(!Path(vec![]).is_valid_for(&grid));
    }

    #[test]
    fn paths_are_never_empty() {
        assert_eq!(Path::try_from(Vec::new()), Err(MazeError::EmptyPath));
        let path = Path::try_from(vec![Cell::new(0, 0)]).unwrap();
        assert_eq!(path.first(), path.last());
        assert_eq!(path.steps(), 0);
        assert_eq!(Vec::from(path), vec![Cell::new(0, 0)]);
    }
}
