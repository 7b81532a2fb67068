use crate::position::Position;
use crate::types::{CastlingStatus, Color, File, Piece, Square, Wing};
use std::fmt;

/// Human-readable summary of the move between two positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveDescription {
    /// A side castled on a wing.
    Castle { color: Color, wing: Wing },
    /// A piece arrived on a square (including promotions and captures).
    Placement { piece: Piece, square: Square },
}

impl fmt::Display for MoveDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDescription::Castle { color, wing } => write!(f, "{color} castles {wing}"),
            MoveDescription::Placement { piece, square } => write!(f, "{piece} to {square}"),
        }
    }
}

/// Describes the move that turned `old` into `new`.
///
/// Castling is recognised by a status that became `Done`. Otherwise the
/// first differing cell (rank-major) that is occupied in `new` names the
/// moved piece. Returns None if nothing arrived anywhere.
pub fn describe_move(old: &Position, new: &Position) -> Option<MoveDescription> {
    for color in Color::ALL {
        if new.castling(color) == CastlingStatus::Done && old.castling(color) != CastlingStatus::Done
        {
            let wing = match new.king(color).map(|square| square.file()) {
                Some(File::C) => Wing::Queenside,
                _ => Wing::Kingside,
            };
            return Some(MoveDescription::Castle { color, wing });
        }
    }

    Square::all().find_map(|square| {
        let after = new.board.piece_at(square)?;
        (old.board.piece_at(square) != Some(after))
            .then_some(MoveDescription::Placement { piece: after, square })
    })
}
