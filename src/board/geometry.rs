//! Cell numbering on the grid.
//!
//! Cells are numbered in boustrophedon order: cell 1 sits on the bottom row,
//! numbering alternates direction on every row going up, and the last cell
//! is always the top-left corner. Counting from the top, even rows run left
//! to right and odd rows run right to left.
//!
//! For a 2×3 grid:
//!
//! ```text
//! row 0:  6 5 4
//! row 1:  1 2 3
//! ```
//!
//! The mapping depends only on the grid shape, never on board contents.

use serde::{Deserialize, Serialize};

use super::Cell;

/// Row and column of a cell. Row 0 is the top row, column 0 the left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u16,
    pub col: u16,
}

impl GridPosition {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// Grid position of `cell` on a `rows × cols` board.
///
/// Returns `None` for cell 0 (not on the board) and cells past the last one.
///
/// ```
/// use rust_snl::board::{grid_position, GridPosition};
///
/// assert_eq!(grid_position(10, 10, 100), Some(GridPosition::new(0, 0)));
/// assert_eq!(grid_position(10, 10, 1), Some(GridPosition::new(9, 0)));
/// assert_eq!(grid_position(10, 10, 11), Some(GridPosition::new(8, 9)));
/// assert_eq!(grid_position(10, 10, 0), None);
/// ```
#[must_use]
pub fn grid_position(rows: u16, cols: u16, cell: Cell) -> Option<GridPosition> {
    let size = u32::from(rows) * u32::from(cols);
    let cell = u32::from(cell);
    if cell == 0 || cell > size {
        return None;
    }

    // Distance from the top-left corner in reading order.
    let index = size - cell;
    let cols = u32::from(cols);
    let row = index / cols;
    let offset = index % cols;
    let col = if row % 2 == 0 { offset } else { cols - 1 - offset };

    Some(GridPosition::new(row as u16, col as u16))
}

/// Inverse of [`grid_position`].
#[must_use]
pub fn cell_at(rows: u16, cols: u16, position: GridPosition) -> Option<Cell> {
    if position.row >= rows || position.col >= cols {
        return None;
    }

    let size = u32::from(rows) * u32::from(cols);
    let cols = u32::from(cols);
    let row = u32::from(position.row);
    let col = u32::from(position.col);
    let offset = if row % 2 == 0 { col } else { cols - 1 - col };

    Cell::try_from(size - (row * cols + offset)).ok()
}
