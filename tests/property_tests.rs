//! Property-based tests for geometry, movement and full games.

use std::collections::VecDeque;

use proptest::prelude::*;
use rust_snl::board::{cell_at, grid_position, Board, BoardDefinition};
use rust_snl::core::{ChipColor, Dice, Player, PlayerId, PlayerStatus};
use rust_snl::engine::{bounce, resolve_move, MoveKind, TRIPLE_SUM};
use rust_snl::session::{Session, SessionConfig};
use rust_snl::turns::TurnQueue;

#[derive(Clone, Debug)]
enum QueueOp {
    Enqueue(u8),
    Dequeue,
    Rotate,
}

fn queue_op() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        any::<u8>().prop_map(QueueOp::Enqueue),
        Just(QueueOp::Dequeue),
        Just(QueueOp::Rotate),
    ]
}

proptest! {
    /// Every cell maps to a distinct in-bounds square and back.
    #[test]
    fn prop_geometry_is_bijective(rows in 1u16..=20, cols in 1u16..=20) {
        let size = rows * cols;
        let mut seen = std::collections::HashSet::new();
        for cell in 1..=size {
            let pos = grid_position(rows, cols, cell).unwrap();
            prop_assert!(pos.row < rows && pos.col < cols);
            prop_assert!(seen.insert(pos));
            prop_assert_eq!(cell_at(rows, cols, pos), Some(cell));
        }
        prop_assert!(grid_position(rows, cols, 0).is_none());
        prop_assert!(grid_position(rows, cols, size + 1).is_none());
    }

    /// An overshoot by one die roll always reflects back onto the board.
    #[test]
    fn prop_bounce_stays_on_board(size in 7u16..=1000, over in 1u32..=6) {
        let landed = bounce(u32::from(size) + over, size);
        prop_assert!((1..size).contains(&landed));
        prop_assert_eq!(u32::from(landed), u32::from(size) - over);
    }

    /// The turn queue behaves like a plain FIFO.
    #[test]
    fn prop_queue_matches_vecdeque(ops in prop::collection::vec(queue_op(), 0..64)) {
        let mut queue = TurnQueue::new();
        let mut model = VecDeque::new();
        for op in ops {
            match op {
                QueueOp::Enqueue(v) => {
                    queue.enqueue(v);
                    model.push_back(v);
                }
                QueueOp::Dequeue => {
                    prop_assert_eq!(queue.dequeue().ok(), model.pop_front());
                }
                QueueOp::Rotate => {
                    if let Some(head) = model.pop_front() {
                        model.push_back(head);
                    }
                    prop_assert_eq!(queue.rotate().ok().copied(), model.front().copied());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.peek().ok().copied(), model.front().copied());
        }
    }

    /// Moves stay on the board and the triple-sum rule fires exactly when
    /// the last three rolls add up to 18.
    #[test]
    fn prop_moves_stay_on_board(rolls in prop::collection::vec(1u8..=6, 1..200)) {
        let board = Board::build(BoardDefinition::classic()).unwrap();
        let mut player = Player::new(PlayerId::new(1), "P", ChipColor::Red);
        player.position = 1;

        let mut history: Vec<u8> = Vec::new();
        for roll in rolls {
            if player.status == PlayerStatus::Won {
                break;
            }
            history.push(roll);
            let tail: u16 = history.iter().rev().take(3).map(|&r| u16::from(r)).sum();

            let resolution = resolve_move(&board, &mut player, roll);
            prop_assert_eq!(player.moving_sum(), tail);
            prop_assert!((1..=board.size()).contains(&player.position));
            prop_assert_eq!(resolution.kind == MoveKind::TripleSumReset, tail == TRIPLE_SUM);
            if resolution.kind == MoveKind::Won {
                prop_assert_eq!(player.position, board.size());
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Seeded games finish and rank every player exactly once.
    #[test]
    fn prop_seeded_games_rank_everyone(seed in any::<u64>(), players in 2usize..=9) {
        let mut session = Session::new(SessionConfig::new()).unwrap();
        let ids: Vec<_> = (1..=players as i64).map(PlayerId::new).collect();
        for (&id, color) in ids.iter().zip(ChipColor::ALL) {
            session.select_color(id, id.to_string(), color).unwrap();
        }
        session.start().unwrap();

        let mut dice = Dice::new(seed);
        let mut summary = None;
        for _ in 0..100_000 {
            let current = session.current_player().unwrap().id;
            if let Some(done) = session.roll(current, dice.roll()).unwrap().summary {
                summary = Some(done);
                break;
            }
        }

        let summary = summary.unwrap();
        prop_assert_eq!(summary.winners.len(), players - 1);
        let mut ranked: Vec<_> = summary.winners.iter().map(|p| p.id).collect();
        ranked.push(summary.loser.unwrap().id);
        ranked.sort();
        prop_assert_eq!(ranked, ids);
        prop_assert!(!session.is_started());
    }
}
