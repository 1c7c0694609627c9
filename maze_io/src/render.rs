use image::error::{ImageError, LimitError, LimitErrorKind};
use image::{ImageResult, Rgb, RgbImage};
use log::debug;
use maze_pathfinding::{Cell, Grid, Path};

pub const FREE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLOCKED: Rgb<u8> = Rgb([0, 0, 0]);
pub const PATH: Rgb<u8> = Rgb([255, 0, 0]);

fn fill_cell(image: &mut RgbImage, cell: Cell, cell_px: u32, colour: Rgb<u8>) {
    let (x0, y0) = (cell.col as u32 * cell_px, cell.row as u32 * cell_px);
    for y in y0..y0 + cell_px {
        for x in x0..x0 + cell_px {
            image.put_pixel(x, y, colour);
        }
    }
}

/// Draws each cell as a `cell_px` square: blocked cells black, free cells white and,
/// when a path is given, its cells red. Rows run top to bottom.
///
/// Fails if the image side would not fit in a `u32`.
pub fn render(grid: &Grid, path: Option<&Path>, cell_px: u32) -> ImageResult<RgbImage> {
    let cell_px = cell_px.max(1);
    let side = u32::try_from(grid.size())
        .ok()
        .and_then(|size| size.checked_mul(cell_px))
        .ok_or_else(|| {
            ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError))
        })?;
    let mut image = RgbImage::from_pixel(side, side, FREE);
    for cell in grid.cells() {
        if !grid.can_move_to(cell) {
            fill_cell(&mut image, cell, cell_px, BLOCKED);
        }
    }
    for &cell in path.into_iter().flatten() {
        if grid.in_bounds(cell) {
            fill_cell(&mut image, cell, cell_px, PATH);
        }
    }
    Ok(image)
}

/// Renders and writes a PNG file.
pub fn save_png(
    grid: &Grid,
    path: Option<&Path>,
    cell_px: u32,
    file: impl AsRef<std::path::Path>,
) -> ImageResult<()> {
    let file = file.as_ref();
    debug!("Rendering {}x{} grid to {}", grid.size(), grid.size(), file.display());
    render(grid, path, cell_px)?.save(file)
}
