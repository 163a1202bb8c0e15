//! Game engine: the turn lifecycle and dice resolution.
//!
//! - `game`: [`GameEngine`], the `Idle → Started → Finished` state machine
//! - `resolve`: the per-roll movement rules
//! - `event`: [`MoveEvent`] and the [`VisualizationPort`] renderers implement

mod event;
mod game;
mod resolve;

pub use event::{MoveEvent, MoveKind, VisualizationPort};
pub use game::{EnginePhase, GameEngine};
pub use resolve::{bounce, resolve_move, Resolution, START_CELL, TRIPLE_SUM};
