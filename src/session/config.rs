//! Session configuration.
//!
//! Hosts build one `SessionConfig` at startup and create every chat's
//! session from it. The board definition usually comes from a JSON board
//! file; see [`BoardDefinition::from_json`].

use serde::{Deserialize, Serialize};

use crate::board::BoardDefinition;

/// Asset reference of the built-in board image.
pub const CLASSIC_ASSET: &str = "board0.jpg";

/// Configuration shared by the sessions of one host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Registered players required before a game can start.
    pub min_players: usize,

    /// Board every game of the session is played on.
    pub board: BoardDefinition,

    /// Reference to the board image handed to the renderer.
    pub asset_ref: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            board: BoardDefinition::classic(),
            asset_ref: CLASSIC_ASSET.to_string(),
        }
    }
}

impl SessionConfig {
    /// Classic board, two players minimum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum number of players.
    #[must_use]
    pub fn with_min_players(mut self, count: usize) -> Self {
        assert!(count > 0, "Must require at least 1 player");
        self.min_players = count;
        self
    }

    /// Set the board and its image.
    #[must_use]
    pub fn with_board(mut self, board: BoardDefinition, asset_ref: impl Into<String>) -> Self {
        self.board = board;
        self.asset_ref = asset_ref.into();
        self
    }
}
