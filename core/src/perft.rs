use crate::history::History;
use crate::move_gen::generate_successors;
use crate::outcome::classify;
use crate::position::Position;
use crate::types::{CastlingStatus, Color};

/// Perft (performance test) results at the leaves of a tree walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub castles: u64,
    pub checks: u64,
    pub terminals: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.castles += other.castles;
        self.checks += other.checks;
        self.terminals += other.terminals;
    }
}

/// Counts the leaf positions reachable in exactly `depth` plies.
///
/// The history is consulted by the generator but never extended.
pub fn perft(position: &Position, side: Color, depth: u8, history: &History) -> u64 {
    if depth == 0 {
        return 1;
    }

    let successors = generate_successors(position, side, history);

    if depth == 1 {
        return successors.len() as u64;
    }

    successors
        .iter()
        .map(|next| perft(next, side.opponent(), depth - 1, history))
        .sum()
}

/// Performs a perft with a per-successor breakdown.
/// Depth 0 has no successor to break down and yields an empty list.
pub fn perft_divide(
    position: &Position,
    side: Color,
    depth: u8,
    history: &History,
) -> Vec<(Position, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    generate_successors(position, side, history)
        .into_iter()
        .map(|next| {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(&next, side.opponent(), depth - 1, history)
            };
            (next, nodes)
        })
        .collect()
}

/// Performs a perft collecting statistics about the leaf moves.
pub fn perft_detailed(position: &Position, side: Color, depth: u8, history: &History) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for next in generate_successors(position, side, history) {
        if depth == 1 {
            results.nodes += 1;

            let before = position.board.pieces().count();
            if next.board.pieces().count() < before {
                results.captures += 1;
            }
            if next.castling(side) == CastlingStatus::Done
                && position.castling(side) != CastlingStatus::Done
            {
                results.castles += 1;
            }
            if next.is_in_check(side.opponent()) {
                results.checks += 1;
            }
            if classify(&next).is_some() {
                results.terminals += 1;
            }
        } else {
            results.add(&perft_detailed(&next, side.opponent(), depth - 1, history));
        }
    }

    results
}

/// Known node counts for the standard starting position.
pub const STARTING_POSITION_PERFT: &[(u8, u64)] = &[(1, 20), (2, 400), (3, 8902), (4, 197_281)];
