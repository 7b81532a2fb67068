//! Property tests over positions reached by random playouts.

use crate::describe::{describe_move, MoveDescription};
use crate::history::History;
use crate::move_gen::generate_successors;
use crate::outcome::{classify, Outcome};
use crate::position::Position;
use crate::types::{Color, Square};
use proptest::prelude::*;

/// Plays from the initial position, picking successors by the given choices.
/// Stops early when the side to move has no successor or the game is decided.
fn playout(choices: &[usize]) -> (Position, Color) {
    let mut position = Position::initial();
    let mut side = Color::White;
    let history = History::default();

    for &choice in choices {
        if classify(&position).is_some() {
            break;
        }
        let successors = generate_successors(&position, side, &history);
        if successors.is_empty() {
            break;
        }
        position = successors[choice % successors.len()].clone();
        side = side.opponent();
    }

    (position, side)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn successors_never_leave_mover_in_check(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let (position, side) = playout(&choices);
        for next in generate_successors(&position, side, &History::default()) {
            prop_assert!(!next.is_in_check(side));
            prop_assert!(next.is_consistent());
        }
    }

    #[test]
    fn king_cache_matches_board(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (position, _) = playout(&choices);
        prop_assert!(position.is_consistent());
    }

    #[test]
    fn every_successor_has_a_description(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let (position, side) = playout(&choices);
        for next in generate_successors(&position, side, &History::default()) {
            let arrivals = Square::all()
                .filter(|&square| {
                    next.board.piece_at(square).is_some()
                        && next.board.piece_at(square) != position.board.piece_at(square)
                })
                .count();
            match describe_move(&position, &next) {
                Some(MoveDescription::Placement { piece, square }) => {
                    prop_assert_eq!(piece.color, side);
                    prop_assert_eq!(next.board.piece_at(square), Some(piece));
                    prop_assert_eq!(arrivals, 1);
                }
                Some(MoveDescription::Castle { color, .. }) => prop_assert_eq!(color, side),
                None => prop_assert!(false, "successor without a description"),
            }
        }
    }

    #[test]
    fn legal_play_never_captures_a_king(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (position, _) = playout(&choices);
        let outcome = classify(&position);
        prop_assert!(outcome.is_none() || outcome == Some(Outcome::Draw));
    }

    #[test]
    fn history_excludes_played_boards(choices in prop::collection::vec(any::<usize>(), 1..30)) {
        let (position, side) = playout(&choices);
        let all = generate_successors(&position, side, &History::default());
        if let Some(first) = all.first() {
            let mut history = History::default();
            history.push(&first.board);
            let filtered = generate_successors(&position, side, &history);
            prop_assert!(filtered.iter().all(|next| !next.same_board(first)));
            prop_assert!(filtered.len() < all.len());
        }
    }
}
