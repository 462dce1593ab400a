//! Static level background.

mod grid;

pub use grid::{CellSize, GridError, TileCell, TileGrid};
