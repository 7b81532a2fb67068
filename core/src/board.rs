/// Board representation: a fully populated 8x8 grid.
use crate::types::*;

/// Array-based board representation.
/// Every cell is either empty or holds exactly one piece.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// 64 squares, indexed by Square::index()
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting position.
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut board = Self::empty();
        for color in Color::ALL {
            let home = color.home_rank();
            let pawns = color.pawn_rank();
            for (index, &piece_type) in BACK_RANK.iter().enumerate() {
                if let Some(file) = File::new(index as u8) {
                    board.set_piece(
                        Square::new(file, home),
                        Some(Piece::new(piece_type, color)),
                    );
                    board.set_piece(
                        Square::new(file, pawns),
                        Some(Piece::new(PieceType::Pawn, color)),
                    );
                }
            }
        }

        board
    }

    /// Gets the piece at the given square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    /// Sets the piece at the given square.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index() as usize] = piece;
    }

    /// Moves a piece from one square to another.
    /// Returns the captured piece, if any.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.squares[from.index() as usize];
        let captured = self.squares[to.index() as usize];

        self.squares[from.index() as usize] = None;
        self.squares[to.index() as usize] = piece;

        captured
    }

    /// Returns true if the given square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns true if the given square contains a piece of the given color.
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    /// Returns true if the given square contains an enemy piece.
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.is_color(square, color.opponent())
    }

    /// Returns true if the given square holds exactly this piece.
    pub fn holds(&self, square: Square, piece: Piece) -> bool {
        self.piece_at(square) == Some(piece)
    }

    /// Iterates over occupied squares in rank-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Returns every square holding a king of the given color.
    pub fn king_squares(&self, color: Color) -> Vec<Square> {
        let king = Piece::new(PieceType::King, color);
        self.pieces()
            .filter(|&(_, piece)| piece == king)
            .map(|(square, _)| square)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = Board::starting_position();

        assert!(board.holds(sq("a1"), Piece::new(PieceType::Rook, Color::White)));
        assert!(board.holds(sq("d1"), Piece::new(PieceType::Queen, Color::White)));
        assert!(board.holds(sq("e8"), Piece::new(PieceType::King, Color::Black)));
        assert!(board.holds(sq("e7"), Piece::new(PieceType::Pawn, Color::Black)));
        assert!(board.is_empty(sq("d5")));
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn test_move_piece_reports_capture() {
        let mut board = Board::starting_position();

        assert_eq!(board.move_piece(sq("e2"), sq("e4")), None);
        assert!(board.is_empty(sq("e2")));
        assert!(board.is_color(sq("e4"), Color::White));

        let captured = board.move_piece(sq("d1"), sq("d7"));
        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert!(board.is_enemy(sq("d7"), Color::Black));
        assert_ne!(board, Board::starting_position());
    }

    #[test]
    fn test_pieces_are_rank_major() {
        let squares: Vec<Square> = Board::starting_position()
            .pieces()
            .map(|(square, _)| square)
            .collect();
        assert_eq!(squares.first(), Some(&sq("a1")));
        assert_eq!(squares[16], sq("a7"));
        assert_eq!(squares.last(), Some(&sq("h8")));
    }

    #[test]
    fn test_king_squares() {
        let mut board = Board::starting_position();
        assert_eq!(board.king_squares(Color::White), vec![sq("e1")]);
        assert_eq!(board.king_squares(Color::Black), vec![sq("e8")]);

        board.set_piece(sq("e8"), None);
        assert!(board.king_squares(Color::Black).is_empty());
    }
}
