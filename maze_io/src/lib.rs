//! Collaborators around [maze_pathfinding]: reading and writing grids as CSV files
//! and drawing them, with or without a path, as PNG images.
pub mod load;
pub mod render;

pub use load::{load_grid, read_grid, save_grid, write_grid, LoadError};
pub use render::{render, save_png, BLOCKED, FREE, PATH};

use maze_pathfinding::{GenerationReport, Grid, Path};
use serde::Serialize;

/// What the command line prints with `--json`.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub size: usize,
    pub grid: &'a Grid,
    pub path: Option<&'a Path>,
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a GenerationReport>,
}

impl<'a> Summary<'a> {
    pub fn new(grid: &'a Grid, path: Option<&'a Path>) -> Summary<'a> {
        Summary {
            size: grid.size(),
            grid,
            path,
            steps: path.map(Path::steps),
            report: None,
        }
    }

    pub fn with_report(mut self, report: &'a GenerationReport) -> Summary<'a> {
        self.report = Some(report);
        self
    }
}
