//! Error types for each layer.
//!
//! - [`ConfigError`]: malformed board definitions. Fatal to `set_board`.
//! - [`RollWindowError`]: a tampered player record rejected while decoding.
//! - [`EmptyQueue`]: a dequeue or peek on an empty turn queue.
//! - [`EngineError`]: engine operations called out of protocol.
//! - [`SessionError`]: lobby and turn rules rejected for a chat user.

use thiserror::Error;

use crate::board::Cell;
use crate::core::{ChipColor, PlayerId};
use crate::engine::EnginePhase;

/// A board definition that cannot be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board grid has no cells")]
    EmptyGrid,

    #[error("board grid has {cells} cells, more than a cell number can hold")]
    GridTooLarge { cells: u32 },

    #[error("cell {cell} is outside the board (1..={size})")]
    CellOutOfRange { cell: Cell, size: Cell },

    #[error("cell {cell} is configured as both a snake and a ladder")]
    OverlappingRedirect { cell: Cell },

    #[error("redirect chain starting at cell {cell} never ends")]
    RedirectCycle { cell: Cell },

    #[error("invalid board definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stored roll window that cannot be restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RollWindowError {
    #[error("roll window slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("stored roll {0} is not a die face")]
    InvalidRoll(u8),
}

/// Dequeue or peek on an empty queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("turn queue is empty")]
pub struct EmptyQueue;

/// An engine operation invoked against the protocol.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("`{operation}` is not allowed while the engine is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: EnginePhase,
    },

    #[error("{remaining} players are still in the rotation")]
    NotFinished { remaining: usize },

    #[error("no board has been set")]
    BoardNotSet,

    #[error("dice value {0} is not in 1..=6")]
    InvalidRoll(u8),

    #[error("{0} appears more than once in the player list")]
    DuplicatePlayer(PlayerId),

    #[error("{0} is in the turn queue but not on the roster")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    EmptyQueue(#[from] EmptyQueue),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A chat action the session refuses.
///
/// Most variants are expected, user-correctable conditions that the host
/// reports back to the chat rather than logging as failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the game has already started")]
    AlreadyStarted,

    #[error("no game is running")]
    NotStarted,

    #[error("players cannot join a running game")]
    JoinForbidden,

    #[error("players cannot leave a running game")]
    LeaveForbidden,

    #[error("the {0} chip is already taken")]
    ColorTaken(ChipColor),

    #[error("{registered} player(s) registered, at least {required} needed")]
    NotEnoughPlayers { required: usize, registered: usize },

    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: PlayerId },

    #[error("{0} is not registered in this session")]
    UnknownPlayer(PlayerId),

    #[error("session encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
