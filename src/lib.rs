//! # rust-snl
//!
//! A turn-based Snakes and Ladders engine for chat-based multiplayer games.
//!
//! ## Design Principles
//!
//! 1. **Plain calls in, plain facts out**: the chat integration calls
//!    `start`, `dice`, `next_player`; the engine answers with players and
//!    `MoveEvent`s. No chat, rendering or storage code lives here.
//!
//! 2. **One session per chat**: a [`Session`] owns its engine outright.
//!    Sessions share nothing, so chats run in parallel while each chat's
//!    events are processed one at a time.
//!
//! 3. **Faithful rules**: the triple-sum reset, exact-landing win, bounce
//!    on overshoot and transitive snakes and ladders are applied in a fixed
//!    priority order.
//!
//! ## Modules
//!
//! - `core`: player ids, players, chip colors, seeded dice
//! - `board`: board definitions, the redirect map, grid geometry
//! - `turns`: the FIFO turn queue
//! - `engine`: the game state machine and move events
//! - `session`: lobby and turn orchestration for one chat
//! - `error`: error types for each layer

pub mod board;
pub mod core;
pub mod engine;
pub mod error;
pub mod session;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{ChipColor, Dice, Player, PlayerId, PlayerStatus};

pub use crate::board::{Board, BoardDefinition, Cell, GridPosition, LayoutOptions};

pub use crate::turns::TurnQueue;

pub use crate::engine::{EnginePhase, GameEngine, MoveEvent, MoveKind, VisualizationPort};

pub use crate::session::{GameSummary, Session, SessionConfig, TurnReport};

pub use crate::error::{ConfigError, EmptyQueue, EngineError, RollWindowError, SessionError};
