//! Movement resolution for a single roll.
//!
//! The rules form a strict priority chain and must be applied in this order:
//!
//! 1. **Triple-sum**: the last three rolls sum to 18 → back to cell 1.
//! 2. **Win**: the move lands exactly on the last cell.
//! 3. **Overshoot**: past the last cell → bounce back.
//! 4. **Redirects**: follow snakes and ladders to the end of the chain.
//!
//! Rules 1 and 2 short-circuit: neither bounce nor redirects apply.

use crate::board::{Board, Cell, RedirectPath};
use crate::core::{Player, PlayerStatus};

use super::event::MoveKind;

/// Moving sum that triggers the triple-sum reset.
pub const TRIPLE_SUM: u16 = 18;

/// Cell every player starts on and returns to after a triple-sum reset.
pub const START_CELL: Cell = 1;

/// Result of resolving one roll for one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub kind: MoveKind,
    pub bounced: bool,
    pub path: RedirectPath,
}

/// Position after overshooting a board of `size` cells.
///
/// The piece reflects off the end as `size - (position mod size)`, so on a
/// 100-cell board a raw 104 becomes 96.
///
/// ```
/// use rust_snl::engine::bounce;
///
/// assert_eq!(bounce(104, 100), 96);
/// assert_eq!(bounce(101, 100), 99);
/// assert_eq!(bounce(105, 100), 95);
/// ```
#[must_use]
pub fn bounce(position: u32, size: Cell) -> Cell {
    let size = u32::from(size);
    // `position % size < size`, so the result is in 1..=size and fits.
    (size - position % size) as Cell
}

/// Apply one roll to `player` on `board`.
///
/// Registers the roll, records the previous position, and updates position
/// and status. Queue bookkeeping (re-enqueueing after a triple-sum reset)
/// is the caller's job.
pub fn resolve_move(board: &Board, player: &mut Player, value: u8) -> Resolution {
    player.register_roll(value);
    player.previous_position = player.position;

    if player.moving_sum() == TRIPLE_SUM {
        player.position = START_CELL;
        return Resolution {
            kind: MoveKind::TripleSumReset,
            bounced: false,
            path: RedirectPath::new(),
        };
    }

    let size = board.size();
    let raw = u32::from(player.position) + u32::from(value);

    if raw == u32::from(size) {
        player.position = size;
        player.status = PlayerStatus::Won;
        return Resolution {
            kind: MoveKind::Won,
            bounced: false,
            path: RedirectPath::new(),
        };
    }

    let bounced = raw > u32::from(size);
    let landed = if bounced { bounce(raw, size) } else { raw as Cell };

    let path = board.resolve_path(landed);
    player.position = path.last().copied().unwrap_or(landed);

    Resolution {
        kind: MoveKind::Moved,
        bounced,
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardDefinition, LayoutOptions};
    use crate::core::{ChipColor, PlayerId};

    fn board(def: BoardDefinition) -> Board {
        Board::build(def).unwrap()
    }

    fn player_at(position: Cell) -> Player {
        let mut player = Player::new(PlayerId::new(1), "A", ChipColor::Red);
        player.place_at_start();
        player.position = position;
        player
    }

    #[test]
    fn test_plain_move() {
        let board = board(BoardDefinition::new(LayoutOptions::grid(10, 10)));
        let mut player = player_at(1);

        let res = resolve_move(&board, &mut player, 4);
        assert_eq!(res.kind, MoveKind::Moved);
        assert!(!res.bounced);
        assert_eq!(player.previous_position, 1);
        assert_eq!(player.position, 5);
    }

    #[test]
    fn test_overshoot_bounces() {
        let board = board(BoardDefinition::new(LayoutOptions::grid(10, 10)));
        let mut player = player_at(98);

        let res = resolve_move(&board, &mut player, 6);
        assert!(res.bounced);
        assert_eq!(player.position, 96);
        assert_eq!(player.status, PlayerStatus::Playing);
    }

    #[test]
    fn test_bounce_then_redirect() {
        let def = BoardDefinition::new(LayoutOptions::grid(10, 10)).with_snake(97, 41);
        let board = board(def);
        let mut player = player_at(97);

        // 97 + 6 = 103 -> 97 -> snake to 41
        let res = resolve_move(&board, &mut player, 6);
        assert!(res.bounced);
        assert_eq!(res.path.as_slice(), &[41]);
        assert_eq!(player.position, 41);
    }

    #[test]
    fn test_exact_win_skips_redirect() {
        let def = BoardDefinition::new(LayoutOptions::grid(10, 10)).with_snake(100, 3);
        let board = board(def);
        let mut player = player_at(97);

        let res = resolve_move(&board, &mut player, 3);
        assert_eq!(res.kind, MoveKind::Won);
        assert_eq!(player.position, 100);
        assert_eq!(player.status, PlayerStatus::Won);
    }

    #[test]
    fn test_triple_sum_beats_win() {
        let board = board(BoardDefinition::new(LayoutOptions::grid(10, 10)));
        let mut player = player_at(94);
        player.register_roll(6);
        player.register_roll(6);

        // 94 + 6 would win, but the moving sum reaches 18 first.
        let res = resolve_move(&board, &mut player, 6);
        assert_eq!(res.kind, MoveKind::TripleSumReset);
        assert_eq!(player.previous_position, 94);
        assert_eq!(player.position, START_CELL);
        assert_eq!(player.status, PlayerStatus::Playing);
    }

    #[test]
    fn test_bounce_on_tiny_board() {
        // 2x3 board: 5 + 6 = 11 -> 6 - (11 % 6) = 1
        assert_eq!(bounce(11, 6), 1);
        assert_eq!(bounce(7, 6), 5);
    }
}
