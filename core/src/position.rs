/// A position snapshot: board contents, cached king locations and castling status.
/// Successors are built by cloning a parent and mutating the clone.
use crate::attacks::is_square_threatened_by;
use crate::board::Board;
use crate::types::*;

/// Complete state needed by the search: no side to move is stored here,
/// callers pass the mover explicitly.
#[derive(Clone, Debug)]
pub struct Position {
    /// The board grid
    pub board: Board,
    /// Cached king squares by color; `None` means the king was captured
    pub kings: [Option<Square>; 2],
    /// Castling status by color
    pub castling: [CastlingStatus; 2],
    /// Transient ordering key written by sorting steps; carries no meaning elsewhere
    pub value: i32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn initial() -> Self {
        Self {
            board: Board::starting_position(),
            kings: [
                Some(Square::new(File::E, Rank::First)),
                Some(Square::new(File::E, Rank::Eighth)),
            ],
            castling: [CastlingStatus::Realizable; 2],
            value: 0,
        }
    }

    /// Creates a position with an empty board, both kings absent and no castling.
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            kings: [None, None],
            castling: [CastlingStatus::BothBlocked; 2],
            value: 0,
        }
    }

    /// Places a piece, keeping the king cache in sync.
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.put(square, Some(piece));
        self
    }

    /// Sets the castling status of one side.
    pub fn with_castling(mut self, color: Color, status: CastlingStatus) -> Self {
        self.castling[color.index()] = status;
        self
    }

    /// Writes a cell, keeping the king cache in sync.
    /// A king overwritten by another piece becomes absent.
    pub(crate) fn put(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(previous) = self.board.piece_at(square) {
            if previous.piece_type == PieceType::King
                && self.kings[previous.color.index()] == Some(square)
            {
                self.kings[previous.color.index()] = None;
            }
        }
        if let Some(placed) = piece {
            if placed.piece_type == PieceType::King {
                self.kings[placed.color.index()] = Some(square);
            }
        }
        self.board.set_piece(square, piece);
    }

    /// Returns the square of the given side's king, or None if it was captured.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Returns the castling status of the given side.
    pub fn castling(&self, color: Color) -> CastlingStatus {
        self.castling[color.index()]
    }

    /// Returns true if both positions hold exactly the same board.
    pub fn same_board(&self, other: &Position) -> bool {
        self.board == other.board
    }

    /// Returns true if the given side's king is threatened.
    /// An absent king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king(color)
            .is_some_and(|square| is_square_threatened_by(self, square, color.opponent()))
    }

    /// Returns true if the given square is threatened by the given side.
    pub fn is_threatened_by(&self, square: Square, side: Color) -> bool {
        is_square_threatened_by(self, square, side)
    }

    /// Returns true if the king cache agrees with the board contents.
    pub fn is_consistent(&self) -> bool {
        Color::ALL.iter().all(|&color| {
            let on_board = self.board.king_squares(color);
            match self.king(color) {
                Some(square) => on_board == [square],
                None => on_board.is_empty(),
            }
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let position = Position::initial();
        assert_eq!(position.king(Color::White), Square::parse("e1"));
        assert_eq!(position.king(Color::Black), Square::parse("e8"));
        assert_eq!(position.castling(Color::White), CastlingStatus::Realizable);
        assert_eq!(position.castling(Color::Black), CastlingStatus::Realizable);
        assert!(position.is_consistent());
        assert!(!position.is_in_check(Color::White));
        assert!(!position.is_in_check(Color::Black));
    }

    #[test]
    fn test_with_piece_tracks_kings() {
        let e1 = Square::parse("e1").unwrap();
        let position =
            Position::empty().with_piece(e1, Piece::new(PieceType::King, Color::White));
        assert_eq!(position.king(Color::White), Some(e1));
        assert_eq!(position.king(Color::Black), None);
        assert!(position.is_consistent());

        // Overwriting the king removes it from the cache
        let position = position.with_piece(e1, Piece::new(PieceType::Rook, Color::Black));
        assert_eq!(position.king(Color::White), None);
        assert!(position.is_consistent());
    }

    #[test]
    fn test_same_board_ignores_value() {
        let a = Position::initial();
        let mut b = Position::initial();
        b.value = 42;
        assert!(a.same_board(&b));
    }

    #[test]
    fn test_is_in_check() {
        let position = Position::empty()
            .with_piece(Square::parse("e1").unwrap(), Piece::new(PieceType::King, Color::White))
            .with_piece(Square::parse("e8").unwrap(), Piece::new(PieceType::King, Color::Black))
            .with_piece(Square::parse("e5").unwrap(), Piece::new(PieceType::Rook, Color::Black));
        assert!(position.is_in_check(Color::White));
        assert!(!position.is_in_check(Color::Black));
    }
}
