use crate::position::Position;
use crate::types::Color;
use std::fmt;

/// Score of a decided game from White's point of view.
pub const WIN_SCORE: i32 = 100;

/// A definite game result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    /// Returns the definite score: +100, -100 or 0.
    pub const fn score(self) -> i32 {
        match self {
            Outcome::WhiteWins => WIN_SCORE,
            Outcome::BlackWins => -WIN_SCORE,
            Outcome::Draw => 0,
        }
    }

    /// Returns the outcome in which the given side has won.
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => Outcome::WhiteWins,
            Color::Black => Outcome::BlackWins,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::WhiteWins => write!(f, "White wins"),
            Outcome::BlackWins => write!(f, "Black wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Classifies a position as decided or still in play.
///
/// A game is decided only once a king has been captured. White's king is
/// checked first, so a board with both kings absent counts as a Black win.
pub fn classify(position: &Position) -> Option<Outcome> {
    if position.king(Color::White).is_none() {
        return Some(Outcome::BlackWins);
    }
    if position.king(Color::Black).is_none() {
        return Some(Outcome::WhiteWins);
    }
    if is_draw(position) {
        return Some(Outcome::Draw);
    }
    None
}

/// Draw detection hook. Stalemate and repetition are never positively
/// detected: a side without successors simply loses inside the search.
fn is_draw(_position: &Position) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceType, Square};

    fn king(color: Color, square: &str) -> (Square, Piece) {
        (
            Square::parse(square).unwrap(),
            Piece::new(PieceType::King, color),
        )
    }

    #[test]
    fn test_initial_is_not_terminal() {
        assert_eq!(classify(&Position::initial()), None);
    }

    #[test]
    fn test_king_capture_decides() {
        let (sq, piece) = king(Color::White, "e1");
        let white_only = Position::empty().with_piece(sq, piece);
        assert_eq!(classify(&white_only), Some(Outcome::WhiteWins));
        assert_eq!(classify(&white_only).map(Outcome::score), Some(100));

        let (sq, piece) = king(Color::Black, "e8");
        let black_only = Position::empty().with_piece(sq, piece);
        assert_eq!(classify(&black_only), Some(Outcome::BlackWins));
        assert_eq!(classify(&black_only).map(Outcome::score), Some(-100));
    }

    #[test]
    fn test_both_kings_absent_favours_black() {
        assert_eq!(classify(&Position::empty()), Some(Outcome::BlackWins));
    }

    #[test]
    fn test_bare_kings_are_not_drawn() {
        let (w, wk) = king(Color::White, "e1");
        let (b, bk) = king(Color::Black, "e8");
        let position = Position::empty().with_piece(w, wk).with_piece(b, bk);
        assert_eq!(classify(&position), None);
    }

    #[test]
    fn test_score_signs() {
        assert_eq!(Outcome::win_for(Color::White).score(), WIN_SCORE);
        assert_eq!(Outcome::win_for(Color::Black).score(), -WIN_SCORE);
        assert_eq!(Outcome::Draw.score(), 0);
    }
}
