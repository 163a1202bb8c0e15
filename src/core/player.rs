//! Player identification and per-player game state.
//!
//! ## PlayerId
//!
//! Type-safe wrapper around the chat platform's numeric user id.
//!
//! ## Player
//!
//! Mutable per-participant state: board position, the previous position
//! (for move animation), lifecycle status, and the rolling window of the
//! last three dice rolls that drives the triple-sum rule.

use serde::{Deserialize, Serialize};

use super::color::ChipColor;
use super::rng::DIE_FACES;
use crate::board::Cell;
use crate::error::RollWindowError;

/// Number of rolls tracked by the rolling window.
pub const ROLL_WINDOW: usize = 3;

/// Player identifier: the chat platform's user id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw user id.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Lifecycle status of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Registered, game not started yet.
    #[default]
    Waiting,
    /// In the turn rotation.
    Playing,
    /// Landed exactly on the last cell.
    Won,
    /// Last player left in the rotation when the game ended.
    Lost,
}

/// Ring buffer of the last three dice rolls with a running sum.
///
/// Starts as `[0, 0, 0]`. Each roll evicts the oldest value and the sum is
/// updated incrementally. Decoding checks the slot index and the stored
/// rolls, and recomputes the sum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredRollWindow", into = "StoredRollWindow")]
pub struct RollWindow {
    rolls: [u8; ROLL_WINDOW],
    oldest: usize,
    sum: u16,
}

impl RollWindow {
    /// Create an empty window (all zeros).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a roll, returning the evicted value.
    pub fn push(&mut self, value: u8) -> u8 {
        let evicted = self.rolls[self.oldest];
        self.rolls[self.oldest] = value;
        self.oldest = (self.oldest + 1) % ROLL_WINDOW;
        self.sum = self.sum - u16::from(evicted) + u16::from(value);
        evicted
    }

    /// Sum of the rolls currently in the window.
    #[must_use]
    pub fn sum(&self) -> u16 {
        self.sum
    }

    /// Rolls in the order they were made, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..ROLL_WINDOW).map(move |i| self.rolls[(self.oldest + i) % ROLL_WINDOW])
    }
}

/// Wire form of [`RollWindow`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredRollWindow {
    rolls: [u8; ROLL_WINDOW],
    oldest: usize,
    sum: u16,
}

impl TryFrom<StoredRollWindow> for RollWindow {
    type Error = RollWindowError;

    fn try_from(stored: StoredRollWindow) -> Result<Self, Self::Error> {
        if stored.oldest >= ROLL_WINDOW {
            return Err(RollWindowError::SlotOutOfRange(stored.oldest));
        }
        if let Some(&roll) = stored.rolls.iter().find(|&&r| r > DIE_FACES) {
            return Err(RollWindowError::InvalidRoll(roll));
        }
        Ok(Self {
            rolls: stored.rolls,
            oldest: stored.oldest,
            sum: stored.rolls.iter().map(|&r| u16::from(r)).sum(),
        })
    }
}

impl From<RollWindow> for StoredRollWindow {
    fn from(window: RollWindow) -> Self {
        Self {
            rolls: window.rolls,
            oldest: window.oldest,
            sum: window.sum,
        }
    }
}

/// A participant in one session.
///
/// ## Example
///
/// ```
/// use rust_snl::core::{ChipColor, Player, PlayerId, PlayerStatus};
///
/// let mut player = Player::new(PlayerId::new(7), "Ada", ChipColor::Blue);
/// assert_eq!(player.status, PlayerStatus::Waiting);
/// assert_eq!(player.position, 0);
///
/// player.register_roll(6);
/// player.register_roll(6);
/// assert_eq!(player.moving_sum(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable chat user id.
    pub id: PlayerId,

    /// Name shown in chat messages.
    pub display_name: String,

    /// Chip color, unique within a session.
    pub color: ChipColor,

    /// Current cell. `0` until the game starts.
    pub position: Cell,

    /// Cell before the last roll.
    pub previous_position: Cell,

    /// Lifecycle status.
    pub status: PlayerStatus,

    rolls: RollWindow,
}

impl Player {
    /// Create a waiting player with no position.
    pub fn new(id: PlayerId, display_name: impl Into<String>, color: ChipColor) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            color,
            position: 0,
            previous_position: 0,
            status: PlayerStatus::Waiting,
            rolls: RollWindow::new(),
        }
    }

    /// Record a dice roll in the rolling window.
    ///
    /// This is the only way the moving sum changes.
    pub fn register_roll(&mut self, value: u8) {
        self.rolls.push(value);
    }

    /// Sum of the last three rolls.
    #[must_use]
    pub fn moving_sum(&self) -> u16 {
        self.rolls.sum()
    }

    /// The last three rolls, oldest first.
    #[must_use]
    pub fn recent_rolls(&self) -> &RollWindow {
        &self.rolls
    }

    /// Put the player on the start cell for a new game.
    pub(crate) fn place_at_start(&mut self) {
        self.status = PlayerStatus::Playing;
        self.previous_position = 1;
        self.position = 1;
    }

    /// Whether the player is still taking turns.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PlayerStatus::Playing
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color.emoji(), self.display_name)
    }
}
