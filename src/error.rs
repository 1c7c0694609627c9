use crate::Cell;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MazeError>;

/// Everything that can go wrong when building, solving or generating a grid.
///
/// An unsolvable grid is not an error, see [Solution](crate::Solution).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridDefect),
    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfBounds { cell: Cell, size: usize },
    #[error("unknown template {name:?} (known: {})", .known.join(", "))]
    UnknownTemplate { name: String, known: Vec<String> },
    #[error("a path needs at least one cell")]
    EmptyPath,
    #[error("wall density must lie in [0, 1), got {0}")]
    InvalidDensity(f64),
    #[error("generating a {size}x{size} maze from template {template:?} failed: {reason}")]
    GenerationFailed {
        template: String,
        size: usize,
        reason: GenerationFailure,
    },
}

/// Why a matrix or grid does not describe a valid maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridDefect {
    #[error("matrix is not square: {rows} rows but row {row} has {len} columns")]
    NotSquare { rows: usize, row: usize, len: usize },
    #[error("grid side {size} is smaller than {min}", min = crate::MIN_SIZE)]
    TooSmall { size: usize },
    #[error("grid side {size} is too large to store")]
    TooLarge { size: usize },
    #[error("entrance (0, 0) is blocked")]
    EntranceBlocked,
    #[error("exit ({last}, {last}) is blocked", last = .size - 1)]
    ExitBlocked { size: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("the template itself has no path from entrance to exit")]
    TemplateUnsolvable,
    #[error("the finished grid has no path from entrance to exit")]
    FinalUnsolvable,
}
