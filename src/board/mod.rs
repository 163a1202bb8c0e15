//! The game board.
//!
//! - `definition`: serde types for board configuration (JSON)
//! - `map`: the validated, immutable redirect map
//! - `geometry`: boustrophedon cell numbering on the grid
//!
//! Snakes and ladders are both plain `cell → cell` redirects. The board only
//! answers "where does a piece standing here end up"; movement rules live in
//! the engine.

mod definition;
mod geometry;
mod map;

pub use definition::{BoardDefinition, LayoutOptions};
pub use geometry::{cell_at, grid_position, GridPosition};
pub use map::{Board, RedirectPath};

/// A board cell, numbered from 1. `0` means "not on the board yet".
pub type Cell = u16;
