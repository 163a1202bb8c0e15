//! Board definitions as read from configuration.
//!
//! The JSON shape matches the board files used by the chat bot:
//!
//! ```json
//! {
//!   "id": 0,
//!   "snakes":  { "16": 6, "47": 26 },
//!   "ladders": { "4": 14, "9": 31 },
//!   "options": { "row": 10, "col": 10, "cellW": 60, "cellH": 60, ... }
//! }
//! ```
//!
//! Map keys may be JSON strings. Layout pixel fields default to zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::{grid_position, GridPosition};
use super::Cell;
use crate::error::ConfigError;

/// Grid shape and pixel layout of a board image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Number of rows.
    pub row: u16,
    /// Number of columns.
    pub col: u16,
    /// Cell width in pixels.
    pub cell_w: u32,
    /// Cell height in pixels.
    pub cell_h: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_left: u32,
    pub padding_right: u32,
    /// Horizontal distance between cells.
    pub gap_v: u32,
    /// Vertical distance between cells.
    pub gap_h: u32,
}

impl LayoutOptions {
    /// Layout with only a grid shape and no pixel geometry.
    #[must_use]
    pub fn grid(row: u16, col: u16) -> Self {
        Self {
            row,
            col,
            ..Self::default()
        }
    }

    /// Set cell dimensions in pixels.
    #[must_use]
    pub fn with_cell_size(mut self, width: u32, height: u32) -> Self {
        self.cell_w = width;
        self.cell_h = height;
        self
    }

    /// Set padding (top, right, bottom, left).
    #[must_use]
    pub fn with_padding(mut self, top: u32, right: u32, bottom: u32, left: u32) -> Self {
        self.padding_top = top;
        self.padding_right = right;
        self.padding_bottom = bottom;
        self.padding_left = left;
        self
    }

    /// Set gaps between cells.
    #[must_use]
    pub fn with_gaps(mut self, gap_v: u32, gap_h: u32) -> Self {
        self.gap_v = gap_v;
        self.gap_h = gap_h;
        self
    }

    /// Number of cells in the grid (may exceed the `Cell` range).
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        u32::from(self.row) * u32::from(self.col)
    }

    /// Row and column of a cell on this grid.
    #[must_use]
    pub fn grid_position(&self, cell: Cell) -> Option<GridPosition> {
        grid_position(self.row, self.col, cell)
    }

    /// Top-left pixel of a cell on the board image.
    ///
    /// ```
    /// use rust_snl::board::LayoutOptions;
    ///
    /// let layout = LayoutOptions::grid(10, 10)
    ///     .with_cell_size(50, 40)
    ///     .with_padding(5, 0, 0, 10)
    ///     .with_gaps(2, 3);
    ///
    /// // Cell 100 is the top-left corner.
    /// assert_eq!(layout.cell_origin(100), Some((10, 5)));
    /// // Cell 1 is bottom-left on an even number of rows.
    /// assert_eq!(layout.cell_origin(1), Some((10, 5 + 9 * 43)));
    /// assert_eq!(layout.cell_origin(0), None);
    /// ```
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Option<(u32, u32)> {
        let GridPosition { row, col } = self.grid_position(cell)?;
        let x = self.padding_left + u32::from(col) * (self.cell_w + self.gap_v);
        let y = self.padding_top + u32::from(row) * (self.cell_h + self.gap_h);
        Some((x, y))
    }
}

/// Static description of a board: shape plus snakes and ladders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefinition {
    /// Identifier of the board within a board collection.
    #[serde(default)]
    pub id: u32,

    /// Snake heads mapped to snake tails.
    #[serde(default)]
    pub snakes: BTreeMap<Cell, Cell>,

    /// Ladder feet mapped to ladder tops.
    #[serde(default)]
    pub ladders: BTreeMap<Cell, Cell>,

    /// Grid shape and pixel layout.
    pub options: LayoutOptions,
}

/// Snakes of the built-in board.
const CLASSIC_SNAKES: [(Cell, Cell); 10] = [
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

/// Ladders of the built-in board.
const CLASSIC_LADDERS: [(Cell, Cell); 8] = [
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (80, 99),
];

impl BoardDefinition {
    /// Create an empty board of `row × col` cells.
    #[must_use]
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The built-in 10×10 board.
    ///
    /// Identical to `data/boards/classic.json`.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            id: 0,
            snakes: CLASSIC_SNAKES.into_iter().collect(),
            ladders: CLASSIC_LADDERS.into_iter().collect(),
            options: LayoutOptions::grid(10, 10)
                .with_cell_size(60, 60)
                .with_padding(20, 20, 20, 20)
                .with_gaps(0, 0),
        }
    }

    /// Parse a single board definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of board definitions.
    pub fn collection_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a snake (builder pattern).
    #[must_use]
    pub fn with_snake(mut self, head: Cell, tail: Cell) -> Self {
        self.snakes.insert(head, tail);
        self
    }

    /// Add a ladder (builder pattern).
    #[must_use]
    pub fn with_ladder(mut self, foot: Cell, top: Cell) -> Self {
        self.ladders.insert(foot, top);
        self
    }
}
