use std::fmt;

use crate::assets::{AssetError, AssetId};
use crate::render::DrawCtx;

/// Placement step of one grid cell in device pixels.
///
/// Tiles are positioned on this step; the tile images themselves may be
/// taller (the arcade blocks are 171 px tall on an 83 px row step) and then
/// overlap the next row, drawn in row order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Tile count does not match `rows * cols`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridError {
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile grid expects {} tiles, got {}", self.expected, self.actual)
    }
}

impl std::error::Error for GridError {}

/// One positioned tile, as yielded by [`TileGrid::cells`].
#[derive(Debug, Copy, Clone)]
pub struct TileCell<'a> {
    pub row: usize,
    pub col: usize,
    pub x: i32,
    pub y: i32,
    pub tile: &'a AssetId,
}

/// Rows x columns of tile images with a uniform cell size.
#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cell: CellSize,
    /// Row-major.
    tiles: Vec<AssetId>,
}

impl TileGrid {
    pub fn new(rows: usize, cols: usize, cell: CellSize, tiles: Vec<AssetId>) -> Result<Self, GridError> {
        let expected = rows * cols;
        if tiles.len() != expected {
            return Err(GridError { expected, actual: tiles.len() });
        }
        Ok(Self { rows, cols, cell, tiles })
    }

    /// Grid where every tile of a row uses the same image.
    pub fn from_rows<I>(row_images: I, cols: usize, cell: CellSize) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AssetId>,
    {
        let row_images: Vec<AssetId> = row_images.into_iter().map(Into::into).collect();
        let rows = row_images.len();
        let tiles = row_images
            .iter()
            .flat_map(|id| std::iter::repeat_n(id.clone(), cols))
            .collect();
        Self { rows, cols, cell, tiles }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&AssetId> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles.get(row * self.cols + col)
    }

    /// Top-left pixel of cell `(row, col)`.
    pub fn origin(&self, row: usize, col: usize) -> (i32, i32) {
        (
            (col as u32 * self.cell.width) as i32,
            (row as u32 * self.cell.height) as i32,
        )
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = TileCell<'_>> {
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let (row, col) = (i / self.cols, i % self.cols);
            let (x, y) = self.origin(row, col);
            TileCell { row, col, x, y, tile }
        })
    }

    /// Draws every tile, row by row, left to right.
    pub fn render(&self, ctx: &mut DrawCtx<'_>) -> Result<(), AssetError> {
        for cell in self.cells() {
            ctx.draw_asset(cell.tile.as_str(), cell.x, cell.y)?;
        }
        Ok(())
    }
}
