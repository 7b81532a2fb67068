use crate::evaluation::{EvalContext, Evaluator};
use minmax_core::{classify, generate_successors, Color, History, Position, WIN_SCORE};
use std::cmp::Reverse;

/// Initial window bound, larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Counters gathered while searching. Reset once per root decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited by `search`
    pub nodes: u64,
    /// Cutoffs at Black (minimizing) nodes
    pub alpha_cutoffs: u64,
    /// Cutoffs at White (maximizing) nodes
    pub beta_cutoffs: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn cutoffs(&self) -> u64 {
        self.alpha_cutoffs + self.beta_cutoffs
    }
}

/// Everything the recursion needs besides the position and window.
#[derive(Debug)]
pub struct SearchContext<'a> {
    /// Evaluator used at the frontier and for ordering
    pub evaluator: Evaluator,
    pub eval: EvalContext,
    /// Played boards the generator must avoid
    pub history: &'a History,
    /// Maximum successors explored per node; None explores all of them
    pub width: Option<usize>,
    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    /// A width of zero means no limit.
    pub fn new(
        evaluator: Evaluator,
        eval: EvalContext,
        history: &'a History,
        width: Option<usize>,
    ) -> Self {
        Self {
            evaluator,
            eval,
            history,
            width: width.filter(|&width| width > 0),
            stats: SearchStats::default(),
        }
    }

    /// Static score of a position under the configured evaluator.
    pub fn evaluate(&self, position: &Position) -> i32 {
        self.evaluator.evaluate(position, &self.eval)
    }
}

/// Sorts successors best-first for `side` by their `value` (stable).
pub fn sort_best_first(successors: &mut [Position], side: Color) {
    match side {
        Color::White => successors.sort_by_key(|next| Reverse(next.value)),
        Color::Black => successors.sort_by_key(|next| next.value),
    }
}

/// Scores `position` with `side` to move, looking `depth` plies ahead.
///
/// Fail-hard alpha-beta: a White node returns `beta` on a cutoff and a
/// Black node returns `alpha`. A node without successors keeps its initial
/// bound, which is a loss for the mover when that bound is infinite; such a
/// result is reported as the definite loss score.
pub fn search(
    ctx: &mut SearchContext<'_>,
    position: &Position,
    side: Color,
    depth: u32,
    alpha: i32,
    beta: i32,
) -> i32 {
    ctx.stats.nodes += 1;

    if let Some(outcome) = classify(position) {
        return outcome.score();
    }

    if depth == 0 {
        return ctx.evaluate(position);
    }

    let mut successors = generate_successors(position, side, ctx.history);

    if let Some(width) = ctx.width {
        for next in successors.iter_mut() {
            next.value = ctx.evaluate(next);
        }
        sort_best_first(&mut successors, side);
        successors.truncate(width);
    }

    let score = match side {
        Color::White => {
            let mut best = alpha;
            for next in &successors {
                let score = search(ctx, next, Color::Black, depth - 1, best, beta);
                best = best.max(score);
                if best >= beta {
                    ctx.stats.beta_cutoffs += 1;
                    return beta;
                }
            }
            best
        }
        Color::Black => {
            let mut best = beta;
            for next in &successors {
                let score = search(ctx, next, Color::White, depth - 1, alpha, best);
                best = best.min(score);
                if best <= alpha {
                    ctx.stats.alpha_cutoffs += 1;
                    return alpha;
                }
            }
            best
        }
    };

    match score {
        INFINITY => WIN_SCORE,
        s if s == -INFINITY => -WIN_SCORE,
        s => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minmax_core::{parse_fen, positions};

    /// Exhaustive minimax without pruning or width limit.
    fn minimax(
        position: &Position,
        side: Color,
        depth: u32,
        evaluator: Evaluator,
        history: &History,
    ) -> i32 {
        if let Some(outcome) = classify(position) {
            return outcome.score();
        }
        if depth == 0 {
            return evaluator.evaluate(position, &EvalContext::default());
        }
        let scores = generate_successors(position, side, history)
            .into_iter()
            .map(|next| minimax(&next, side.opponent(), depth - 1, evaluator, history));
        let best = match side {
            Color::White => scores.max(),
            Color::Black => scores.min(),
        };
        best.unwrap_or(-side.sign() * WIN_SCORE)
    }

    fn full_window(
        evaluator: Evaluator,
        position: &Position,
        side: Color,
        depth: u32,
        width: Option<usize>,
    ) -> (i32, SearchStats) {
        let history = History::default();
        let mut ctx = SearchContext::new(evaluator, EvalContext::default(), &history, width);
        let score = search(&mut ctx, position, side, depth, -INFINITY, INFINITY);
        (score, ctx.stats)
    }

    #[test]
    fn test_depth_zero_is_static_score() {
        let (position, side) = parse_fen("4k3/8/8/3q4/8/8/4P3/3QK3 b - -").unwrap();
        for evaluator in Evaluator::ALL {
            let (score, stats) = full_window(evaluator, &position, side, 0, None);
            assert_eq!(score, evaluator.evaluate(&position, &EvalContext::default()));
            assert_eq!(stats.nodes, 1);
        }
    }

    #[test]
    fn test_matches_exhaustive_minimax() {
        let cases = [
            (positions::STARTING, 2),
            ("4k3/8/8/3q4/8/8/4P3/3QK3 w - -", 2),
            ("r3k2r/8/8/8/8/8/8/R3K2R b KQkq -", 2),
            ("7k/8/8/8/8/8/5q2/K7 b - -", 3),
        ];
        for (fen, depth) in cases {
            let (position, side) = parse_fen(fen).unwrap();
            for evaluator in [Evaluator::Material, Evaluator::Positional] {
                let (score, _) = full_window(evaluator, &position, side, depth, None);
                let expected = minimax(&position, side, depth, evaluator, &History::default());
                assert_eq!(score, expected, "{fen} with {evaluator}");
            }
        }
    }

    #[test]
    fn test_pruning_happens() {
        let (_, stats) = full_window(Evaluator::Material, &Position::initial(), Color::White, 3, None);
        assert!(stats.cutoffs() > 0);
        // Fewer than 1 + 20 + 400 + 8902 visits
        assert!(stats.nodes < 9323);
    }

    #[test]
    fn test_king_capture_is_definite() {
        // White king already captured: decided whatever the depth
        let (position, _) = parse_fen("4k3/8/8/8/8/8/8/8 w - -").unwrap();
        let (score, stats) = full_window(Evaluator::Material, &position, Color::White, 3, None);
        assert_eq!(score, -WIN_SCORE);
        assert_eq!(stats.nodes, 1);

        // Black left its king en prise: taking it wins outright
        let (position, side) = parse_fen("4k3/8/8/8/8/8/8/4RK2 w - -").unwrap();
        let (score, _) = full_window(Evaluator::Material, &position, side, 1, None);
        assert_eq!(score, WIN_SCORE);
    }

    #[test]
    fn test_mated_side_scores_a_loss() {
        // Back-rank mate: White to move has no legal successor
        let (position, side) = parse_fen("6k1/8/8/8/8/8/5PPP/r5K1 w - -").unwrap();
        assert!(generate_successors(&position, side, &History::default()).is_empty());
        let (score, _) = full_window(Evaluator::Positional, &position, side, 2, None);
        assert_eq!(score, -WIN_SCORE);

        // Black finds the mate from one ply earlier
        let (position, side) = parse_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - -").unwrap();
        let (score, _) = full_window(Evaluator::Material, &position, side, 2, None);
        assert_eq!(score, -WIN_SCORE);
    }

    #[test]
    fn test_bare_kings_stay_in_band() {
        let (position, side) = parse_fen(positions::BARE_KINGS).unwrap();
        for evaluator in Evaluator::ALL {
            let (score, _) = full_window(evaluator, &position, side, 3, None);
            assert!(score.abs() <= evaluator.band(), "{evaluator}: {score}");
        }
    }

    #[test]
    fn test_width_limits_exploration() {
        let position = Position::initial();
        let (_, full) = full_window(Evaluator::Material, &position, Color::White, 2, None);
        let (score, narrow) = full_window(Evaluator::Material, &position, Color::White, 2, Some(3));
        assert!(narrow.nodes < full.nodes);
        // 1 root + at most 3 children + at most 3 grandchildren each
        assert!(narrow.nodes <= 1 + 3 + 9);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_zero_width_is_unbounded() {
        let position = Position::initial();
        let (full_score, full) = full_window(Evaluator::Material, &position, Color::White, 2, None);
        let (score, zero) = full_window(Evaluator::Material, &position, Color::White, 2, Some(0));
        assert_eq!(score, full_score);
        assert_eq!(zero, full);
    }

    #[test]
    fn test_sort_best_first() {
        let mut successors: Vec<Position> = [3, -1, 7, 3]
            .into_iter()
            .map(|value| {
                let mut position = Position::initial();
                position.value = value;
                position
            })
            .collect();

        sort_best_first(&mut successors, Color::White);
        let values: Vec<i32> = successors.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![7, 3, 3, -1]);

        sort_best_first(&mut successors, Color::Black);
        let values: Vec<i32> = successors.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![-1, 3, 3, 7]);
    }
}
