//! Property tests for evaluators and search over randomly played positions.

use crate::evaluation::{EvalContext, Evaluator};
use crate::search::{search, SearchContext, INFINITY};
use minmax_core::{classify, generate_successors, Color, History, Position, WIN_SCORE};
use proptest::prelude::*;

fn playout(choices: &[usize]) -> (Position, Color) {
    let mut position = Position::initial();
    let mut side = Color::White;
    let history = History::default();

    for &choice in choices {
        let successors = generate_successors(&position, side, &history);
        if successors.is_empty() || classify(&position).is_some() {
            break;
        }
        position = successors[choice % successors.len()].clone();
        side = side.opponent();
    }

    (position, side)
}

fn minimax(position: &Position, side: Color, depth: u32, evaluator: Evaluator, ctx: &EvalContext) -> i32 {
    if let Some(outcome) = classify(position) {
        return outcome.score();
    }
    if depth == 0 {
        return evaluator.evaluate(position, ctx);
    }
    let scores = generate_successors(position, side, &History::default())
        .into_iter()
        .map(|next| minimax(&next, side.opponent(), depth - 1, evaluator, ctx));
    let best = match side {
        Color::White => scores.max(),
        Color::Black => scores.min(),
    };
    best.unwrap_or(-side.sign() * WIN_SCORE)
}

fn evaluator_strategy() -> impl Strategy<Value = Evaluator> {
    prop::sample::select(Evaluator::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn evaluators_stay_in_band(
        choices in prop::collection::vec(any::<usize>(), 0..60),
        move_number in 0u32..60,
        seed in any::<u64>(),
    ) {
        let (position, _) = playout(&choices);
        let ctx = EvalContext { move_number, seed };
        for evaluator in Evaluator::ALL {
            let score = evaluator.evaluate(&position, &ctx);
            prop_assert!(score.abs() <= evaluator.band());
            prop_assert!(score.abs() < WIN_SCORE);
        }
    }

    #[test]
    fn depth_zero_equals_evaluator(
        choices in prop::collection::vec(any::<usize>(), 0..40),
        evaluator in evaluator_strategy(),
        seed in any::<u64>(),
    ) {
        let (position, side) = playout(&choices);
        prop_assume!(classify(&position).is_none());
        let history = History::default();
        let eval = EvalContext { move_number: choices.len() as u32, seed };
        let mut ctx = SearchContext::new(evaluator, eval, &history, None);
        let score = search(&mut ctx, &position, side, 0, -INFINITY, INFINITY);
        prop_assert_eq!(score, evaluator.evaluate(&position, &eval));
    }

    #[test]
    fn full_width_search_equals_minimax(
        choices in prop::collection::vec(any::<usize>(), 0..30),
        evaluator in evaluator_strategy(),
    ) {
        let (position, side) = playout(&choices);
        let history = History::default();
        let eval = EvalContext::default();
        let mut ctx = SearchContext::new(evaluator, eval, &history, None);
        let score = search(&mut ctx, &position, side, 2, -INFINITY, INFINITY);
        prop_assert_eq!(score, minimax(&position, side, 2, evaluator, &eval));
    }

    #[test]
    fn search_scores_are_bounded(
        choices in prop::collection::vec(any::<usize>(), 0..30),
        width in 1usize..6,
    ) {
        let (position, side) = playout(&choices);
        let history = History::default();
        let mut ctx = SearchContext::new(Evaluator::Aggressive, EvalContext::default(), &history, Some(width));
        let score = search(&mut ctx, &position, side, 2, -INFINITY, INFINITY);
        prop_assert!(score.abs() <= WIN_SCORE);
    }
}
