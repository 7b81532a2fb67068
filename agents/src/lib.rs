pub mod evaluation;
pub mod features;
pub mod minimax;
pub mod search;

#[cfg(test)]
mod proptests;

use minmax_core::{Color, History, Position};

/// Core trait for players that pick the next position.
pub trait Agent {
    /// Chooses a successor of `position` for `side`, or None if it has no move.
    fn choose(
        &mut self,
        position: &Position,
        side: Color,
        history: &History,
        move_number: u32,
    ) -> Option<Position>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::{EvalContext, Evaluator};
pub use minimax::{Decision, MinimaxAgent, MinimaxConfig};
pub use search::*;
