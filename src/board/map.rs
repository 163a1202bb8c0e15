//! Validated redirect map built from a [`BoardDefinition`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{BoardDefinition, LayoutOptions};
use super::geometry::{grid_position, GridPosition};
use super::Cell;
use crate::error::ConfigError;

/// Cells visited while following a redirect chain.
///
/// Inline capacity covers every chain on realistic boards.
pub type RedirectPath = SmallVec<[Cell; 4]>;

/// An immutable board: size plus snake and ladder redirects.
///
/// Built once per game. Serializes as its definition and is re-validated
/// when deserialized, so a stored session can never carry a broken board.
///
/// ## Example
///
/// ```
/// use rust_snl::board::{Board, BoardDefinition, LayoutOptions};
///
/// let def = BoardDefinition::new(LayoutOptions::grid(4, 5))
///     .with_ladder(3, 7)
///     .with_ladder(7, 15)
///     .with_snake(18, 2);
/// let board = Board::build(def).unwrap();
///
/// assert_eq!(board.size(), 20);
/// assert_eq!(board.resolve(3), 15);
/// assert_eq!(board.resolve(18), 2);
/// assert_eq!(board.resolve(5), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardDefinition", into = "BoardDefinition")]
pub struct Board {
    definition: BoardDefinition,
    size: Cell,
    redirects: FxHashMap<Cell, Cell>,
}

impl Board {
    /// Validate a definition and build the redirect map.
    ///
    /// ## Errors
    ///
    /// - `EmptyGrid` if the grid has no cells
    /// - `GridTooLarge` if the cell count does not fit in [`Cell`]
    /// - `CellOutOfRange` if a redirect source or target lies outside `1..=size`
    /// - `OverlappingRedirect` if a cell is both a snake and a ladder
    /// - `RedirectCycle` if following redirects from some cell never ends
    pub fn build(definition: BoardDefinition) -> Result<Self, ConfigError> {
        let cell_count = definition.options.cell_count();
        if cell_count == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let size = Cell::try_from(cell_count)
            .map_err(|_| ConfigError::GridTooLarge { cells: cell_count })?;

        let in_range = |cell: Cell| -> Result<(), ConfigError> {
            if (1..=size).contains(&cell) {
                Ok(())
            } else {
                Err(ConfigError::CellOutOfRange { cell, size })
            }
        };

        let mut redirects = FxHashMap::default();
        for (&from, &to) in definition.snakes.iter().chain(definition.ladders.iter()) {
            in_range(from)?;
            in_range(to)?;
            if redirects.insert(from, to).is_some() {
                return Err(ConfigError::OverlappingRedirect { cell: from });
            }
        }

        // Sorted so the reported cell is deterministic.
        let mut sources: Vec<Cell> = redirects.keys().copied().collect();
        sources.sort_unstable();
        for start in sources {
            let mut cell = start;
            let mut hops = 0;
            while let Some(&next) = redirects.get(&cell) {
                hops += 1;
                if hops > redirects.len() {
                    return Err(ConfigError::RedirectCycle { cell: start });
                }
                cell = next;
            }
        }

        Ok(Self {
            definition,
            size,
            redirects,
        })
    }

    /// Number of cells; also the winning cell.
    #[must_use]
    pub fn size(&self) -> Cell {
        self.size
    }

    /// The definition this board was built from.
    #[must_use]
    pub fn definition(&self) -> &BoardDefinition {
        &self.definition
    }

    /// Grid shape and pixel layout.
    #[must_use]
    pub fn layout(&self) -> &LayoutOptions {
        &self.definition.options
    }

    /// One redirect hop from `cell`, if any.
    #[must_use]
    pub fn redirect(&self, cell: Cell) -> Option<Cell> {
        self.redirects.get(&cell).copied()
    }

    /// Whether `cell` starts a snake or a ladder.
    #[must_use]
    pub fn has_redirect(&self, cell: Cell) -> bool {
        self.redirects.contains_key(&cell)
    }

    /// Follow redirects from `cell` until reaching a cell with none.
    ///
    /// Chains are followed transitively: with `3 → 7` and `7 → 15`,
    /// `resolve(3)` is `15`.
    #[must_use]
    pub fn resolve(&self, cell: Cell) -> Cell {
        let mut current = cell;
        while let Some(next) = self.redirect(current) {
            current = next;
        }
        current
    }

    /// Cells reached by each hop of the chain from `cell`, in order.
    ///
    /// Empty when `cell` has no redirect. The last entry equals
    /// `resolve(cell)`.
    #[must_use]
    pub fn resolve_path(&self, cell: Cell) -> RedirectPath {
        let mut path = RedirectPath::new();
        let mut current = cell;
        while let Some(next) = self.redirect(current) {
            path.push(next);
            current = next;
        }
        path
    }

    /// Grid position of `cell` on this board.
    #[must_use]
    pub fn grid_position(&self, cell: Cell) -> Option<GridPosition> {
        grid_position(self.definition.options.row, self.definition.options.col, cell)
    }

    /// Number of configured redirects.
    #[must_use]
    pub fn redirect_count(&self) -> usize {
        self.redirects.len()
    }
}

impl TryFrom<BoardDefinition> for Board {
    type Error = ConfigError;

    fn try_from(definition: BoardDefinition) -> Result<Self, Self::Error> {
        Self::build(definition)
    }
}

impl From<Board> for BoardDefinition {
    fn from(board: Board) -> Self {
        board.definition
    }
}
