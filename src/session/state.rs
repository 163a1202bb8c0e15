//! Per-chat session record and the turn orchestration around the engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::SessionConfig;
use crate::core::{ChipColor, Player, PlayerId, PlayerStatus};
use crate::engine::{GameEngine, MoveEvent, VisualizationPort};
use crate::error::SessionError;

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Players who reached the last cell, in finishing order.
    pub winners: Vec<Player>,

    /// The player left in the rotation. `None` when everybody won, which
    /// only happens in a single-player game.
    pub loser: Option<Player>,

    /// Rolls played.
    pub rolls: u32,
}

/// What happened on one accepted roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// The player who rolled, after the move.
    pub mover: Player,

    /// Whose turn it is now. `None` once the game is over.
    pub next: Option<PlayerId>,

    /// Set when this roll ended the game.
    pub summary: Option<GameSummary>,
}

/// Everything one chat needs between events.
///
/// A session owns its engine exclusively; hosts keep one per chat and must
/// process that chat's events one at a time. The whole record serializes,
/// so it can be stored between events with [`to_bytes`](Self::to_bytes).
///
/// Move events pile up until drained with [`take_events`](Self::take_events)
/// or [`flush_events`](Self::flush_events), and are stored with the session
/// until then. Hosts should drain after every roll; undrained events are
/// dropped when the next game starts.
///
/// ## Example
///
/// ```
/// use rust_snl::core::{ChipColor, PlayerId};
/// use rust_snl::session::{Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::new()).unwrap();
/// let ada = PlayerId::new(10);
/// let bo = PlayerId::new(20);
///
/// session.select_color(ada, "Ada", ChipColor::Red).unwrap();
/// session.select_color(bo, "Bo", ChipColor::Blue).unwrap();
///
/// let first = session.start().unwrap().id;
/// assert_eq!(first, ada);
///
/// // Bo cannot roll out of turn.
/// assert!(session.roll(bo, 3).is_err());
///
/// let report = session.roll(ada, 5).unwrap();
/// assert_eq!(report.mover.position, 6);
/// assert_eq!(report.next, Some(bo));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    config: SessionConfig,
    /// Registered players, in the order they joined.
    roster: Vec<Player>,
    engine: GameEngine,
    current_player: Option<PlayerId>,
    /// Players who finished, in finishing order.
    winners: Vec<Player>,
}

impl Session {
    /// Create an idle session and bind the configured board.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut engine = GameEngine::new();
        engine.set_board(config.board.clone(), config.asset_ref.clone())?;
        Ok(Self {
            config,
            roster: Vec::new(),
            engine,
            current_player: None,
            winners: Vec::new(),
        })
    }

    // === Lobby ===

    /// Register a player with a chip color, or switch their color.
    ///
    /// Joining again with a new color releases the old one. The display name
    /// is refreshed on every call.
    pub fn select_color(
        &mut self,
        id: PlayerId,
        display_name: impl Into<String>,
        color: ChipColor,
    ) -> Result<(), SessionError> {
        if self.is_started() {
            return Err(SessionError::JoinForbidden);
        }
        if let Some(holder) = self.color_holder(color) {
            if holder != id {
                debug!(player = %id, %color, "chip already taken");
                return Err(SessionError::ColorTaken(color));
            }
        }

        let display_name = display_name.into();
        match self.roster.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.color = color;
                player.display_name = display_name;
            }
            None => {
                debug!(player = %id, %color, "player joined");
                self.roster.push(Player::new(id, display_name, color));
            }
        }
        Ok(())
    }

    /// Remove a registered player before the game starts.
    pub fn leave(&mut self, id: PlayerId) -> Result<Player, SessionError> {
        if self.is_started() {
            return Err(SessionError::LeaveForbidden);
        }
        let index = self
            .roster
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::UnknownPlayer(id))?;
        debug!(player = %id, "player left");
        Ok(self.roster.remove(index))
    }

    /// The player holding `color`, if any.
    #[must_use]
    pub fn color_holder(&self, color: ChipColor) -> Option<PlayerId> {
        self.roster.iter().find(|p| p.color == color).map(|p| p.id)
    }

    /// Colors nobody has picked yet, in palette order.
    pub fn available_colors(&self) -> impl Iterator<Item = ChipColor> + '_ {
        ChipColor::ALL
            .into_iter()
            .filter(move |&color| self.color_holder(color).is_none())
    }

    /// Registered players, in the order they joined.
    #[must_use]
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    // === Game ===

    /// Start a game with the registered players.
    ///
    /// Returns the player who moves first.
    pub fn start(&mut self) -> Result<&Player, SessionError> {
        if self.is_started() {
            return Err(SessionError::AlreadyStarted);
        }
        let registered = self.roster.len();
        if registered < self.config.min_players {
            return Err(SessionError::NotEnoughPlayers {
                required: self.config.min_players,
                registered,
            });
        }

        self.winners.clear();
        let first = self
            .engine
            .start(self.roster.clone())?
            .ok_or(SessionError::NotEnoughPlayers {
                required: self.config.min_players,
                registered,
            })?;
        self.current_player = Some(first.id);
        Ok(first)
    }

    /// Submit a dice roll from a chat user.
    ///
    /// Only the player whose turn it is may roll. The roll is resolved, the
    /// turn passes (winners leave the rotation), and when a single player is
    /// left the game ends: that player is marked lost, the engine stops and
    /// the lobby is cleared for the next game.
    pub fn roll(&mut self, user: PlayerId, value: u8) -> Result<TurnReport, SessionError> {
        let expected = match self.current_player {
            Some(id) if self.engine.is_started() => id,
            _ => return Err(SessionError::NotStarted),
        };
        if user != expected {
            debug!(player = %user, %expected, "roll out of turn");
            return Err(SessionError::NotYourTurn { expected });
        }

        let mover = self.engine.dice(value)?.clone();

        let next = if mover.status == PlayerStatus::Won {
            self.winners.push(mover.clone());
            self.engine.retire(mover.id)?.map(|p| p.id)
        } else {
            Some(self.engine.next_player()?.id)
        };
        self.current_player = next;

        let summary = if self.engine.has_finished() {
            let loser = self.engine.finalize_last_player()?.clone();
            self.engine.last_player()?;
            Some(self.finish(Some(loser)))
        } else if next.is_none() {
            Some(self.finish(None))
        } else {
            None
        };

        Ok(TurnReport {
            mover,
            next: self.current_player,
            summary,
        })
    }

    /// Abandon a running game. The roster is kept.
    pub fn abort(&mut self) {
        if self.is_started() {
            info!(rolls = self.engine.rolls(), "game aborted");
        }
        self.engine.stop();
        self.current_player = None;
        self.winners.clear();
    }

    fn finish(&mut self, loser: Option<Player>) -> GameSummary {
        let summary = GameSummary {
            winners: std::mem::take(&mut self.winners),
            loser,
            rolls: self.engine.rolls(),
        };
        info!(
            winners = summary.winners.len(),
            loser = ?summary.loser.as_ref().map(|p| p.id),
            rolls = summary.rolls,
            "session reset after game"
        );
        self.engine.stop();
        self.roster.clear();
        self.current_player = None;
        summary
    }

    // === Queries ===

    /// Whether a game is running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.engine.is_started()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player.and_then(|id| self.engine.player(id))
    }

    /// Players who already won this game, in finishing order.
    #[must_use]
    pub fn winners(&self) -> &[Player] {
        &self.winners
    }

    /// The engine, for read access to the board, queue and players.
    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The configuration this session was created with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // === Events ===

    /// Drain pending move events.
    pub fn take_events(&mut self) -> Vec<MoveEvent> {
        self.engine.take_events()
    }

    /// Hand pending move events to a renderer.
    pub fn flush_events(&mut self, port: &mut impl VisualizationPort) -> usize {
        self.engine.flush_events(port)
    }

    // === Persistence ===

    /// Encode the session for storage between events.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a session stored with [`to_bytes`](Self::to_bytes).
    ///
    /// The board is re-validated while decoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
