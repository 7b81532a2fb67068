use crate::board::Board;
use crate::position::Position;
use crate::types::{CastlingStatus, Color, File, Piece, PieceType, Rank, Square, Wing};
use thiserror::Error;

/// FEN (Forsyth-Edwards Notation) parsing and serialization.
///
/// Only the board, side-to-move and castling fields are meaningful here;
/// the en-passant and clock fields are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("invalid FEN format: {0}")]
    InvalidFormat(String),
    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),
    #[error("invalid side to move: {0}")]
    InvalidColor(String),
    #[error("invalid castling rights: {0}")]
    InvalidCastling(String),
    #[error("{color} has {count} kings, expected at most one")]
    KingCount { color: Color, count: usize },
}

/// Parses a FEN string into a position and the side to move.
///
/// Missing side and castling fields default to White and "-".
/// Standard starting position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
pub fn parse_fen(fen: &str) -> Result<(Position, Color), FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();

    if parts.is_empty() || parts.len() > 6 {
        return Err(FenError::InvalidFormat(format!(
            "expected 1 to 6 fields, got {}",
            parts.len()
        )));
    }

    let board = parse_board(parts[0])?;

    let side = match parts.get(1).copied().unwrap_or("w") {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidColor(other.to_string())),
    };

    let castling = parse_castling(parts.get(2).copied().unwrap_or("-"))?;

    let mut position = Position::empty();
    for (square, piece) in board.pieces() {
        position.put(square, Some(piece));
    }
    position.castling = castling;

    for color in Color::ALL {
        let count = position.board.king_squares(color).len();
        if count > 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok((position, side))
}

impl Position {
    /// Parses a FEN string, discarding the side to move.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen).map(|(position, _)| position)
    }

    /// Converts the position to a FEN string with the given side to move.
    pub fn to_fen(&self, side: Color) -> String {
        format!(
            "{} {} {} - 0 1",
            board_to_fen(&self.board),
            if side == Color::White { "w" } else { "b" },
            castling_to_fen(self.castling)
        )
    }
}

/// Parses the board portion of a FEN string.
fn parse_board(board_str: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let ranks: Vec<&str> = board_str.split('/').collect();

    if ranks.len() != 8 {
        return Err(FenError::InvalidFormat(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        // FEN starts from rank 8 down to rank 1
        let rank = Rank::new(7 - rank_idx as u8)
            .ok_or_else(|| FenError::InvalidFormat(board_str.to_string()))?;
        let mut file_idx = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                let filled = u32::from(file_idx) + empty_count;
                if filled > 8 {
                    return Err(FenError::InvalidFormat(format!(
                        "too many squares in rank {}",
                        8 - rank_idx
                    )));
                }
                file_idx = filled as u8;
            } else {
                let file = File::new(file_idx).ok_or_else(|| {
                    FenError::InvalidFormat(format!("too many squares in rank {}", 8 - rank_idx))
                })?;
                board.set_piece(Square::new(file, rank), Some(piece_from_char(ch)?));
                file_idx += 1;
            }
        }

        if file_idx != 8 {
            return Err(FenError::InvalidFormat(format!(
                "rank {} has {} squares, expected 8",
                8 - rank_idx,
                file_idx
            )));
        }
    }

    Ok(board)
}

/// Converts a board to FEN notation.
pub fn board_to_fen(board: &Board) -> String {
    let mut fen = String::new();

    for rank_idx in (0..8).rev() {
        let mut empty_count = 0;

        for file_idx in 0..8 {
            let square = Square::from_index(rank_idx * 8 + file_idx);
            match square.and_then(|square| board.piece_at(square)) {
                Some(piece) => {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if rank_idx > 0 {
            fen.push('/');
        }
    }

    fen
}

/// Parses a FEN character into a piece.
fn piece_from_char(ch: char) -> Result<Piece, FenError> {
    let color = if ch.is_uppercase() {
        Color::White
    } else {
        Color::Black
    };

    let piece_type = match ch.to_ascii_lowercase() {
        'p' => PieceType::Pawn,
        'n' => PieceType::Knight,
        'b' => PieceType::Bishop,
        'r' => PieceType::Rook,
        'q' => PieceType::Queen,
        'k' => PieceType::King,
        _ => return Err(FenError::InvalidPiece(ch)),
    };

    Ok(Piece::new(piece_type, color))
}

/// Parses castling letters into per-side statuses.
/// A side with no letter gets `BothBlocked`, one letter blocks the other wing.
fn parse_castling(castling_str: &str) -> Result<[CastlingStatus; 2], FenError> {
    let mut wings = [[false; 2]; 2];

    if castling_str != "-" {
        for ch in castling_str.chars() {
            let (color, wing) = match ch {
                'K' => (Color::White, 0),
                'Q' => (Color::White, 1),
                'k' => (Color::Black, 0),
                'q' => (Color::Black, 1),
                _ => return Err(FenError::InvalidCastling(castling_str.to_string())),
            };
            wings[color.index()][wing] = true;
        }
    }

    Ok(wings.map(|[kingside, queenside]| match (kingside, queenside) {
        (true, true) => CastlingStatus::Realizable,
        (true, false) => CastlingStatus::QueensideBlocked,
        (false, true) => CastlingStatus::KingsideBlocked,
        (false, false) => CastlingStatus::BothBlocked,
    }))
}

/// Converts castling statuses to FEN letters. `Done` is written as "no rights".
fn castling_to_fen(castling: [CastlingStatus; 2]) -> String {
    let mut s = String::new();

    for color in Color::ALL {
        let status = castling[color.index()];
        for (wing, letter) in [(Wing::Kingside, 'k'), (Wing::Queenside, 'q')] {
            if status.allows(wing) {
                s.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
    }

    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}

/// Standard FEN positions for testing.
pub mod positions {
    /// Starting position.
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Bare kings, nothing else to play for.
    pub const BARE_KINGS: &str = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";

    /// Both sides ready to castle on either wing.
    pub const CASTLING: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
}
