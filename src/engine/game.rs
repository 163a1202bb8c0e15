//! The game state machine.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::event::{MoveEvent, MoveKind, VisualizationPort};
use super::resolve::resolve_move;
use crate::board::{Board, BoardDefinition};
use crate::core::{Player, PlayerId, PlayerStatus, DIE_FACES};
use crate::error::EngineError;
use crate::turns::TurnQueue;

/// Lifecycle phase of a [`GameEngine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No game running. Initial phase.
    #[default]
    Idle,
    /// Players are taking turns.
    Started,
    /// One player is left and has been marked lost.
    Finished,
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnginePhase::Idle => "idle",
            EnginePhase::Started => "started",
            EnginePhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Orchestrates the board, the turn queue and the players of one game.
///
/// ## Lifecycle
///
/// `Idle → Started → Finished`, and [`stop`](Self::stop) back to `Idle`.
///
/// ## Turn protocol
///
/// The engine never advances turns on its own. After each
/// [`dice`](Self::dice) the caller:
///
/// 1. retires the player if they won, otherwise calls
///    [`next_player`](Self::next_player);
/// 2. checks [`has_finished`](Self::has_finished), and when it is true calls
///    [`finalize_last_player`](Self::finalize_last_player) then
///    [`last_player`](Self::last_player).
///
/// ## Example
///
/// ```
/// use rust_snl::board::BoardDefinition;
/// use rust_snl::core::{ChipColor, Player, PlayerId};
/// use rust_snl::engine::GameEngine;
///
/// let mut engine = GameEngine::new();
/// engine.set_board(BoardDefinition::classic(), "board0.jpg").unwrap();
///
/// let players = vec![
///     Player::new(PlayerId::new(1), "Ada", ChipColor::Red),
///     Player::new(PlayerId::new(2), "Bo", ChipColor::Blue),
/// ];
/// let first = engine.start(players).unwrap().unwrap();
/// assert_eq!(first.id, PlayerId::new(1));
///
/// // 1 + 3 lands on the ladder at 4.
/// let moved = engine.dice(3).unwrap();
/// assert_eq!(moved.position, 14);
///
/// let next = engine.next_player().unwrap();
/// assert_eq!(next.id, PlayerId::new(2));
/// assert_eq!(engine.take_events().len(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameEngine {
    board: Option<Board>,
    asset_ref: Option<String>,
    phase: EnginePhase,
    /// Players of the current game, in registration order.
    players: Vec<Player>,
    queue: TurnQueue<PlayerId>,
    /// Move events not yet handed to the host.
    events: Vector<MoveEvent>,
    /// Completed `dice` calls since `start`.
    rolls: u32,
}

impl GameEngine {
    /// Create an idle engine with no board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Configuration ===

    /// Bind a board and the reference of its background image.
    ///
    /// Must be called before [`start`](Self::start). Rejected while a game
    /// is running; a board that fails validation leaves the previous one in
    /// place.
    pub fn set_board(
        &mut self,
        definition: BoardDefinition,
        asset_ref: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.require_not(EnginePhase::Started, "set_board")?;
        let board = Board::build(definition)?;
        let asset_ref = asset_ref.into();
        debug!(size = board.size(), asset = %asset_ref, "board set");
        self.board = Some(board);
        self.asset_ref = Some(asset_ref);
        Ok(())
    }

    /// The bound board, if any.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Reference to the board image, as given to [`set_board`](Self::set_board).
    #[must_use]
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset_ref.as_deref()
    }

    // === Lifecycle ===

    /// Start a game with `players`, queued in the given order.
    ///
    /// Returns `Ok(None)` without touching any state when `players` is
    /// empty: "not enough participants yet" is a normal condition, not an
    /// error. Otherwise every player is set to `Playing` on cell 1 and the
    /// first player to act is returned. Move events the host never drained
    /// from the previous game are dropped.
    ///
    /// ## Errors
    ///
    /// - `InvalidState` if a game is running or finished but not stopped
    /// - `BoardNotSet` if [`set_board`](Self::set_board) was never called
    /// - `DuplicatePlayer` if two entries share an id
    pub fn start(&mut self, players: Vec<Player>) -> Result<Option<&Player>, EngineError> {
        self.require(EnginePhase::Idle, "start")?;
        if players.is_empty() {
            debug!("start requested with no players");
            return Ok(None);
        }
        if self.board.is_none() {
            return Err(EngineError::BoardNotSet);
        }
        let mut seen = FxHashSet::default();
        if let Some(duplicate) = players.iter().find(|p| !seen.insert(p.id)) {
            return Err(EngineError::DuplicatePlayer(duplicate.id));
        }

        if !self.events.is_empty() {
            debug!(dropped = self.events.len(), "discarding undrained move events");
            self.events.clear();
        }
        self.players = players;
        for player in &mut self.players {
            player.place_at_start();
        }
        self.queue.clear();
        self.queue.enqueue_all(self.players.iter().map(|p| p.id));
        self.rolls = 0;
        self.phase = EnginePhase::Started;

        info!(players = self.players.len(), "game started");
        Ok(self.current_player())
    }

    /// Drain the queue and return to `Idle`.
    ///
    /// Safe to call in any phase; a no-op when already idle. Pending move
    /// events are kept until the host drains them or the next game starts.
    pub fn stop(&mut self) {
        if self.phase == EnginePhase::Idle && self.queue.is_empty() {
            return;
        }
        self.queue.clear();
        self.phase = EnginePhase::Idle;
        debug!(rolls = self.rolls, "game stopped");
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Whether a game is running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase == EnginePhase::Started
    }

    // === Turns ===

    /// Resolve a dice roll for the player whose turn it is.
    ///
    /// Both preconditions (a roll in `1..=6` and a running game) are checked
    /// before anything changes, so a rejected call leaves the engine
    /// untouched. Exactly one [`MoveEvent`] is queued per successful call.
    ///
    /// After a triple-sum reset the player is appended to the queue tail
    /// once more, so they hold an extra slot in the rotation.
    pub fn dice(&mut self, value: u8) -> Result<&Player, EngineError> {
        self.require(EnginePhase::Started, "dice")?;
        if !(1..=DIE_FACES).contains(&value) {
            return Err(EngineError::InvalidRoll(value));
        }
        let board = self.board.as_ref().ok_or(EngineError::BoardNotSet)?;
        let id = *self.queue.peek()?;
        let index = roster_index(&self.players, id)?;

        let player = &mut self.players[index];
        let resolution = resolve_move(board, player, value);
        self.rolls += 1;

        let event = MoveEvent {
            player: id,
            color: player.color,
            roll: value,
            previous_position: player.previous_position,
            new_position: player.position,
            kind: resolution.kind,
            bounced: resolution.bounced,
            path: resolution.path,
            turn: self.rolls,
        };
        debug!(
            player = %id,
            roll = value,
            from = event.previous_position,
            to = event.new_position,
            kind = ?event.kind,
            "dice resolved"
        );

        match event.kind {
            MoveKind::TripleSumReset => {
                info!(player = %id, "triple sum, back to start");
                self.queue.enqueue(id);
            }
            MoveKind::Won => info!(player = %id, turn = self.rolls, "player won"),
            MoveKind::Moved => {}
        }
        self.events.push_back(event);

        Ok(&self.players[index])
    }

    /// Pass the turn: move the head to the tail and return the new head.
    pub fn next_player(&mut self) -> Result<&Player, EngineError> {
        self.require(EnginePhase::Started, "next_player")?;
        let id = *self.queue.rotate()?;
        self.player_or_err(id)
    }

    /// Take a player out of the rotation, typically after they won.
    ///
    /// Removes every queue entry for `id` and returns the new head, or
    /// `None` if nobody is left.
    pub fn retire(&mut self, id: PlayerId) -> Result<Option<&Player>, EngineError> {
        self.require(EnginePhase::Started, "retire")?;
        roster_index(&self.players, id)?;
        self.queue.retain(|&queued| queued != id);
        debug!(player = %id, remaining = self.queue.len(), "player retired");
        match self.queue.peek() {
            Ok(&head) => self.player_or_err(head).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// The player whose turn it is. `None` unless a game is running.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase != EnginePhase::Started {
            return None;
        }
        let id = self.queue.peek().ok()?;
        self.player(*id)
    }

    // === Termination ===

    /// Whether exactly one player is left in the rotation.
    ///
    /// Pure: call [`finalize_last_player`](Self::finalize_last_player) to
    /// record the loss.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.phase == EnginePhase::Started && self.remaining_players() == 1
    }

    /// Mark the sole remaining player as lost and finish the game.
    ///
    /// Fails with `NotFinished` while more than one player remains, and
    /// with `InvalidState` when called a second time.
    pub fn finalize_last_player(&mut self) -> Result<&Player, EngineError> {
        self.require(EnginePhase::Started, "finalize_last_player")?;
        let remaining = self.remaining_players();
        if remaining != 1 {
            return Err(EngineError::NotFinished { remaining });
        }

        let id = *self.queue.peek()?;
        let index = roster_index(&self.players, id)?;
        self.players[index].status = PlayerStatus::Lost;
        self.phase = EnginePhase::Finished;

        info!(player = %id, rolls = self.rolls, "game finished");
        Ok(&self.players[index])
    }

    /// Dequeue the sole remaining player, leaving the queue empty.
    ///
    /// Intended to be read once, right after
    /// [`has_finished`](Self::has_finished) reports true.
    pub fn last_player(&mut self) -> Result<&Player, EngineError> {
        let id = self.queue.dequeue()?;
        // Drop the extra slots a triple-sum reset may have left.
        self.queue.retain(|&queued| queued != id);
        self.player_or_err(id)
    }

    // === Queries ===

    /// Players of the current (or last) game, in registration order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The turn queue, head first.
    #[must_use]
    pub fn queue(&self) -> &TurnQueue<PlayerId> {
        &self.queue
    }

    /// Number of distinct players still in the rotation.
    #[must_use]
    pub fn remaining_players(&self) -> usize {
        self.queue.iter().collect::<FxHashSet<_>>().len()
    }

    /// Completed rolls since the game started.
    #[must_use]
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    // === Events ===

    /// Move events not yet drained, oldest first.
    pub fn pending_events(&self) -> impl Iterator<Item = &MoveEvent> {
        self.events.iter()
    }

    /// Drain all pending move events.
    pub fn take_events(&mut self) -> Vec<MoveEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }

    /// Hand every pending event to `port`, oldest first, and drain them.
    ///
    /// Returns the number of events delivered.
    pub fn flush_events(&mut self, port: &mut impl VisualizationPort) -> usize {
        let events = std::mem::take(&mut self.events);
        for event in &events {
            port.player_moved(event);
        }
        events.len()
    }

    // === Internal ===

    fn require(&self, phase: EnginePhase, operation: &'static str) -> Result<(), EngineError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    fn require_not(&self, phase: EnginePhase, operation: &'static str) -> Result<(), EngineError> {
        if self.phase == phase {
            Err(EngineError::InvalidState {
                operation,
                phase: self.phase,
            })
        } else {
            Ok(())
        }
    }

    fn player_or_err(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.player(id).ok_or(EngineError::UnknownPlayer(id))
    }
}

fn roster_index(players: &[Player], id: PlayerId) -> Result<usize, EngineError> {
    players
        .iter()
        .position(|p| p.id == id)
        .ok_or(EngineError::UnknownPlayer(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::LayoutOptions;
    use crate::core::ChipColor;

    fn players(n: i64) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(PlayerId::new(i), format!("P{}", i), ChipColor::ALL[i as usize]))
            .collect()
    }

    fn engine_with(def: BoardDefinition) -> GameEngine {
        let mut engine = GameEngine::new();
        engine.set_board(def, "board.png").unwrap();
        engine
    }

    fn plain_engine() -> GameEngine {
        engine_with(BoardDefinition::new(LayoutOptions::grid(10, 10)))
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(EnginePhase::Idle.to_string(), "idle");
        assert_eq!(EnginePhase::Finished.to_string(), "finished");
    }

    #[test]
    fn test_start_rejects_duplicate_ids() {
        let mut engine = plain_engine();
        let twins = vec![
            Player::new(PlayerId::new(1), "A", ChipColor::Red),
            Player::new(PlayerId::new(2), "B", ChipColor::Green),
            Player::new(PlayerId::new(1), "A again", ChipColor::Blue),
        ];
        let err = engine.start(twins).unwrap_err();
        assert!(matches!(err, EngineError::DuplicatePlayer(id) if id == PlayerId::new(1)));

        assert_eq!(engine.phase(), EnginePhase::Idle);
        assert!(engine.players().is_empty());
        assert!(engine.queue().is_empty());
        assert!(!engine.has_finished());

        // A clean roster still starts afterwards.
        assert!(engine.start(players(2)).unwrap().is_some());
    }

    #[test]
    fn test_start_drops_undrained_events() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();
        engine.dice(3).unwrap();
        engine.stop();
        assert_eq!(engine.pending_events().count(), 1);

        engine.start(players(2)).unwrap();
        assert_eq!(engine.pending_events().count(), 0);
        engine.dice(2).unwrap();
        assert_eq!(engine.take_events()[0].turn, 1);
    }

    #[test]
    fn test_start_places_players() {
        let mut engine = plain_engine();
        let first = engine.start(players(3)).unwrap().unwrap().id;
        assert_eq!(first, PlayerId::new(1));
        assert!(engine.is_started());

        for player in engine.players() {
            assert_eq!(player.status, PlayerStatus::Playing);
            assert_eq!(player.position, 1);
            assert_eq!(player.previous_position, 1);
        }
        let order: Vec<_> = engine.queue().iter().map(|id| id.raw()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_start_without_board() {
        let mut engine = GameEngine::new();
        let err = engine.start(players(2)).unwrap_err();
        assert!(matches!(err, EngineError::BoardNotSet));
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();
        let err = engine.start(players(2)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidState { operation: "start", phase: EnginePhase::Started }
        ));
    }

    #[test]
    fn test_invalid_roll_leaves_state_untouched() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();

        for value in [0, 7, 255] {
            let err = engine.dice(value).unwrap_err();
            assert!(matches!(err, EngineError::InvalidRoll(v) if v == value));
        }
        let head = engine.current_player().unwrap();
        assert_eq!(head.position, 1);
        assert_eq!(head.moving_sum(), 0);
        assert_eq!(engine.rolls(), 0);
        assert_eq!(engine.pending_events().count(), 0);
    }

    #[test]
    fn test_set_board_rejected_while_started() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();
        let err = engine.set_board(BoardDefinition::classic(), "other.png").unwrap_err();
        assert!(matches!(err, EngineError::InvalidState { operation: "set_board", .. }));
        assert_eq!(engine.asset_ref(), Some("board.png"));
    }

    #[test]
    fn test_bad_board_keeps_previous() {
        let mut engine = plain_engine();
        let bad = BoardDefinition::new(LayoutOptions::grid(2, 2)).with_snake(9, 1);
        let err = engine.set_board(bad, "bad.png").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert_eq!(engine.board().unwrap().size(), 100);
        assert_eq!(engine.asset_ref(), Some("board.png"));
    }

    #[test]
    fn test_retire_removes_all_slots() {
        let mut engine = plain_engine();
        engine.start(players(3)).unwrap();
        for _ in 0..3 {
            engine.dice(6).unwrap();
        }
        // Player 1 now holds two slots.
        assert_eq!(engine.queue().len(), 4);

        let head = engine.retire(PlayerId::new(1)).unwrap().unwrap();
        assert_eq!(head.id, PlayerId::new(2));
        assert_eq!(engine.queue().len(), 2);
        assert_eq!(engine.remaining_players(), 2);
    }

    #[test]
    fn test_retire_unknown_player() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();
        let err = engine.retire(PlayerId::new(99)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownPlayer(_)));
    }

    #[test]
    fn test_finalize_requires_single_player() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();
        let err = engine.finalize_last_player().unwrap_err();
        assert!(matches!(err, EngineError::NotFinished { remaining: 2 }));
    }

    #[test]
    fn test_flush_events_into_port() {
        let mut engine = plain_engine();
        engine.start(players(2)).unwrap();
        engine.dice(2).unwrap();
        engine.next_player().unwrap();
        engine.dice(5).unwrap();

        let mut port: Vec<MoveEvent> = Vec::new();
        assert_eq!(engine.flush_events(&mut port), 2);
        assert_eq!(port[0].player, PlayerId::new(1));
        assert_eq!(port[0].new_position, 3);
        assert_eq!(port[0].turn, 1);
        assert_eq!(port[1].player, PlayerId::new(2));
        assert_eq!(port[1].new_position, 6);
        assert_eq!(port[1].turn, 2);
        assert_eq!(engine.flush_events(&mut port), 0);
    }
}
