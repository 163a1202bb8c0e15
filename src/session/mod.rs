//! Chat sessions.
//!
//! One [`Session`] per chat: the lobby (players picking chip colors), the
//! engine, and the bookkeeping around each roll. Chat-platform handlers
//! translate commands and callbacks into these calls and render the results.

mod config;
mod state;

pub use config::{SessionConfig, CLASSIC_ASSET};
pub use state::{GameSummary, Session, TurnReport};
