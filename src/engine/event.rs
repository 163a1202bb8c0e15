//! Move events and the visualization port.
//!
//! Every completed `dice` call produces exactly one [`MoveEvent`]. The engine
//! keeps them in an outbox until the host drains it, either directly with
//! `take_events` or by flushing into a [`VisualizationPort`] that renders the
//! board image.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, RedirectPath};
use crate::core::{ChipColor, PlayerId};

/// How a roll was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Ordinary move, possibly bounced back or redirected.
    Moved,
    /// Landed exactly on the last cell.
    Won,
    /// Last three rolls summed to 18; sent back to the start cell.
    TripleSumReset,
}

/// A player moved from one cell to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Who moved.
    pub player: PlayerId,

    /// Chip color to draw.
    pub color: ChipColor,

    /// Dice value that caused the move.
    pub roll: u8,

    /// Cell before the roll.
    pub previous_position: Cell,

    /// Cell after the roll, with every redirect applied.
    pub new_position: Cell,

    /// How the roll was resolved.
    pub kind: MoveKind,

    /// Whether the roll overshot the last cell and bounced back.
    pub bounced: bool,

    /// Snake and ladder hops taken after the dice move, in order.
    pub path: RedirectPath,

    /// Sequence number of the roll within the game, starting at 1.
    pub turn: u32,
}

impl MoveEvent {
    /// Whether a snake or ladder moved the player.
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Consumer of move events, typically a board renderer.
///
/// Implementations receive each event once, in roll order. Rendering may be
/// slow or asynchronous on the host side; the engine never waits on it.
pub trait VisualizationPort {
    /// A player finished moving.
    fn player_moved(&mut self, event: &MoveEvent);
}

/// Collects events, useful for hosts that batch them and for tests.
impl VisualizationPort for Vec<MoveEvent> {
    fn player_moved(&mut self, event: &MoveEvent) {
        self.push(event.clone());
    }
}
