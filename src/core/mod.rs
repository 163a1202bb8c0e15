//! Core types: players, chip colors, dice.
//!
//! These are the leaf building blocks shared by the board, the turn queue,
//! the engine, and the session layer.

pub mod color;
pub mod player;
pub mod rng;

pub use color::ChipColor;
pub use player::{Player, PlayerId, PlayerStatus, RollWindow, ROLL_WINDOW};
pub use rng::{Dice, DiceState, DIE_FACES};
