use crate::evaluation::{EvalContext, Evaluator};
use crate::search::{search, sort_best_first, SearchContext, SearchStats, INFINITY};
use crate::Agent;
use minmax_core::{describe_move, generate_successors, Color, History, Position};
use tracing::{debug, info};

/// Tunables of the root driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimaxConfig {
    /// Plies searched below each root candidate
    pub depth: u32,
    /// Successors kept per node and at the root; None or zero keeps all of them
    pub width: Option<usize>,
    pub evaluator: Evaluator,
    /// Depth of the ordering pass when White decides
    pub white_ordering_depth: u32,
    /// Depth of the ordering pass when Black decides
    pub black_ordering_depth: u32,
}

impl MinimaxConfig {
    pub fn ordering_depth(&self, side: Color) -> u32 {
        match side {
            Color::White => self.white_ordering_depth,
            Color::Black => self.black_ordering_depth,
        }
    }
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            width: None,
            evaluator: Evaluator::default(),
            white_ordering_depth: 2,
            black_ordering_depth: 3,
        }
    }
}

/// Outcome of one root decision.
#[derive(Clone, Debug)]
pub struct Decision {
    /// The chosen successor
    pub position: Position,
    /// Its full-depth score from White's point of view
    pub score: i32,
    pub stats: SearchStats,
    /// Number of root candidates searched at full depth
    pub candidates: usize,
}

/// Engine player: an ordering pass at shallow depth, then a full-depth
/// alpha-beta search over the best candidates with a narrowing window.
pub struct MinimaxAgent {
    name: String,
    config: MinimaxConfig,
    seed: u64,
}

impl MinimaxAgent {
    pub fn new(config: MinimaxConfig) -> Self {
        MinimaxAgent {
            name: format!(
                "Minimax(depth={}, eval={})",
                config.depth,
                config.evaluator.name()
            ),
            config,
            seed: 0,
        }
    }

    /// Sets the jitter seed shared by every decision of this agent.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Picks a successor for `side`, or None when it has no legal move.
    pub fn decide(
        &self,
        position: &Position,
        side: Color,
        history: &History,
        move_number: u32,
    ) -> Option<Decision> {
        let eval = EvalContext {
            move_number,
            seed: self.seed,
        };
        let mut ctx = SearchContext::new(self.config.evaluator, eval, history, self.config.width);
        ctx.stats.reset();

        let mut candidates = generate_successors(position, side, history);
        if candidates.is_empty() {
            info!(%side, "no legal move");
            return None;
        }

        // Ordering pass
        let ordering_depth = self.config.ordering_depth(side);
        for candidate in candidates.iter_mut() {
            candidate.value = search(
                &mut ctx,
                candidate,
                side.opponent(),
                ordering_depth,
                -INFINITY,
                INFINITY,
            );
        }
        sort_best_first(&mut candidates, side);
        if let Some(width) = ctx.width {
            candidates.truncate(width);
        }

        // Full-depth pass, narrowing the window on the mover's edge
        let mut best: Option<(usize, i32)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let (alpha, beta) = match (side, best) {
                (Color::White, Some((_, score))) => (score, INFINITY),
                (Color::Black, Some((_, score))) => (-INFINITY, score),
                (_, None) => (-INFINITY, INFINITY),
            };
            let score = search(
                &mut ctx,
                candidate,
                side.opponent(),
                self.config.depth,
                alpha,
                beta,
            );

            debug!(
                candidate = index,
                ordering = candidate.value,
                score,
                mv = %describe_move(position, candidate).map(|d| d.to_string()).unwrap_or_default(),
                "root candidate"
            );

            let improves = match best {
                None => true,
                Some((_, best_score)) => match side {
                    Color::White => score > best_score,
                    Color::Black => score < best_score,
                },
            };
            if improves {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        let count = candidates.len();
        let chosen = candidates.swap_remove(index);

        info!(
            %side,
            mv = %describe_move(position, &chosen).map(|d| d.to_string()).unwrap_or_default(),
            score,
            nodes = ctx.stats.nodes,
            alpha_cutoffs = ctx.stats.alpha_cutoffs,
            beta_cutoffs = ctx.stats.beta_cutoffs,
            "decision"
        );

        Some(Decision {
            position: chosen,
            score,
            stats: ctx.stats,
            candidates: count,
        })
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(MinimaxConfig::default())
    }
}

impl Agent for MinimaxAgent {
    fn choose(
        &mut self,
        position: &Position,
        side: Color,
        history: &History,
        move_number: u32,
    ) -> Option<Position> {
        self.decide(position, side, history, move_number)
            .map(|decision| decision.position)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
