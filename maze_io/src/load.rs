use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use maze_pathfinding::{Grid, MazeError};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure to turn a file into a [Grid]. Input that is not a matrix of cell tokens is
/// [Malformed](LoadError::Malformed); a well-formed matrix that is not a valid maze
/// surfaces the core's [MazeError] unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed input at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Grid(#[from] MazeError),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> LoadError {
        let line = err.position().map_or(0, |p| p.line());
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => LoadError::Io(source),
            _ => LoadError::Malformed { line, reason },
        }
    }
}

/// `0`/`false` is a free cell, `1`/`true` a blocked one. Case is ignored.
fn parse_cell(token: &str) -> Option<bool> {
    match token {
        "0" => Some(false),
        "1" => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        t if t.eq_ignore_ascii_case("true") => Some(true),
        _ => None,
    }
}

/// Reads a comma separated matrix of cell tokens without a header line, one grid row
/// per line.
pub fn read_grid<R: io::Read>(reader: R) -> Result<Grid, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);
    let mut rows: Vec<Vec<bool>> = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .iter()
            .enumerate()
            .map(|(col, token)| {
                parse_cell(token).ok_or_else(|| LoadError::Malformed {
                    line,
                    reason: format!(
                        "column {}: expected 0, 1, true or false, found {:?}",
                        col + 1,
                        token
                    ),
                })
            })
            .collect::<Result<Vec<bool>, _>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(LoadError::Malformed {
            line: 0,
            reason: "no rows".to_owned(),
        });
    }
    debug!("Read {} rows", rows.len());
    Ok(Grid::from_rows(rows)?)
}

pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    debug!("Loading grid from {}", path.display());
    read_grid(File::open(path)?)
}

/// Writes the grid in the format [read_grid] accepts, using `0` and `1`.
pub fn write_grid<W: io::Write>(grid: &Grid, writer: W) -> Result<(), LoadError> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    for row in grid.rows() {
        csv_writer.write_record(row.iter().map(|&blocked| if blocked { "1" } else { "0" }))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_grid(grid: &Grid, path: impl AsRef<Path>) -> Result<(), LoadError> {
    write_grid(grid, File::create(path)?)
}
