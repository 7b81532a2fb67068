use crate::board::Board;
use crate::types::{Piece, PieceType, Square};

/// Zobrist hashing for board contents.
/// Uses pre-computed random numbers for each piece-square combination.
///
/// Only the grid is hashed: castling status and the side to move are not
/// part of the key, matching the board-only comparison used by the history.
#[derive(Debug, Clone)]
pub struct ZobristKeys {
    /// Random values for each color, piece type and square
    piece_square: [[[u64; 64]; 6]; 2],
}

impl ZobristKeys {
    /// Creates a new set of Zobrist keys with deterministic random values.
    /// Uses a fixed seed for reproducibility.
    pub fn new() -> Self {
        // Xorshift generator for deterministic randomness
        let mut rng = 0x123456789ABCDEFu64;
        let mut next_random = || {
            rng ^= rng << 13;
            rng ^= rng >> 7;
            rng ^= rng << 17;
            rng
        };

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for by_type in piece_square.iter_mut() {
            for by_square in by_type.iter_mut() {
                for key in by_square.iter_mut() {
                    *key = next_random();
                }
            }
        }

        Self { piece_square }
    }

    /// Gets the Zobrist key for a piece on a square.
    pub fn piece_square_key(&self, piece: Piece, square: Square) -> u64 {
        let piece_idx = match piece.piece_type {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        };
        self.piece_square[piece.color.index()][piece_idx][square.index() as usize]
    }

    /// Hashes every occupied square of the board.
    pub fn hash(&self, board: &Board) -> u64 {
        board
            .pieces()
            .fold(0, |hash, (square, piece)| hash ^ self.piece_square_key(piece, square))
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global Zobrist keys instance.
/// Initialized once and shared across the application.
pub static ZOBRIST: std::sync::LazyLock<ZobristKeys> = std::sync::LazyLock::new(ZobristKeys::new);

/// Returns the Zobrist hash of the board contents.
pub fn board_hash(board: &Board) -> u64 {
    ZOBRIST.hash(board)
}
