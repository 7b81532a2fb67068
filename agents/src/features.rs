//! Board features combined by the static evaluators.
//!
//! Every feature is a White-minus-Black difference, so positive values
//! favour White.

use minmax_core::{
    board_hash, is_square_threatened_by, CastlingStatus, Color, PieceType, Position, Square,
    DIRECTIONS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest possible material difference.
pub const MATERIAL_MAX: i32 = 76;
/// Largest possible center occupation difference.
pub const CENTER_MAX: i32 = 42;
/// Largest possible attacking-zone occupation difference.
pub const ZONE_MAX: i32 = 46;
/// Largest possible king shield difference.
pub const SHIELD_MAX: i32 = 8;
/// Largest possible castling bonus difference.
pub const CASTLING_MAX: i32 = 24;
/// Largest possible hanging pressure difference.
pub const HANGING_MAX: i32 = 31;
/// Largest possible dispersion difference.
pub const DISPERSION_MAX: i32 = 15;
/// Jitter values lie in `0..JITTER_RANGE`.
pub const JITTER_RANGE: i32 = 10;

/// Signed contribution of one side.
fn signed(color: Color, amount: i32) -> i32 {
    color.sign() * amount
}

/// Weighted piece count difference.
pub fn material(position: &Position) -> i32 {
    position
        .board
        .pieces()
        .map(|(_, piece)| signed(piece.color, piece.piece_type.material_weight()))
        .sum()
}

/// Occupation multiplier: pawns take the cell bonus, knights, bishops and
/// queens four times it, rooks and kings nothing.
fn occupation_weight(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => 1,
        PieceType::Knight | PieceType::Bishop | PieceType::Queen => 4,
        PieceType::Rook | PieceType::King => 0,
    }
}

/// Center cell bonus: 2 on c4-f5, 1 elsewhere on ranks 3 to 6.
fn center_bonus(square: Square) -> i32 {
    let rank = square.rank().index();
    let file = square.file().index();
    if (3..=4).contains(&rank) && (2..=5).contains(&file) {
        2
    } else if (2..=5).contains(&rank) {
        1
    } else {
        0
    }
}

/// Attacking-zone bonus: 1 or 2 as a piece advances into the opponent's half.
fn zone_bonus(square: Square, color: Color) -> i32 {
    let rank = square.rank().index();
    let advance = match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    };
    match advance {
        4 | 5 => 1,
        6 | 7 => 2,
        _ => 0,
    }
}

/// Center occupation difference.
pub fn center(position: &Position) -> i32 {
    position
        .board
        .pieces()
        .map(|(square, piece)| {
            signed(
                piece.color,
                occupation_weight(piece.piece_type) * center_bonus(square),
            )
        })
        .sum()
}

/// Attacking-zone occupation difference.
pub fn zone(position: &Position) -> i32 {
    position
        .board
        .pieces()
        .map(|(square, piece)| {
            signed(
                piece.color,
                occupation_weight(piece.piece_type) * zone_bonus(square, piece.color),
            )
        })
        .sum()
}

/// Number of rays from the king whose first occupied cell is friendly.
fn shield_of(position: &Position, color: Color) -> i32 {
    let Some(king) = position.king(color) else {
        return 0;
    };

    let mut shield = 0;
    for &(df, dr) in &DIRECTIONS {
        let mut current = king.offset(df, dr);
        while let Some(cell) = current {
            if let Some(piece) = position.board.piece_at(cell) {
                if piece.color == color {
                    shield += 1;
                }
                break;
            }
            current = cell.offset(df, dr);
        }
    }
    shield
}

/// King shield difference.
pub fn shield(position: &Position) -> i32 {
    shield_of(position, Color::White) - shield_of(position, Color::Black)
}

fn castling_bonus(status: CastlingStatus) -> i32 {
    match status {
        CastlingStatus::Done => 24,
        CastlingStatus::Realizable => 12,
        CastlingStatus::KingsideBlocked | CastlingStatus::QueensideBlocked => 10,
        CastlingStatus::BothBlocked => 0,
    }
}

/// Castling bonus difference.
pub fn castling(position: &Position) -> i32 {
    castling_bonus(position.castling(Color::White)) - castling_bonus(position.castling(Color::Black))
}

fn hanging_weight(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => 1,
        PieceType::Knight | PieceType::Bishop => 2,
        PieceType::Rook | PieceType::Queen => 3,
        PieceType::King => 6,
    }
}

/// Hanging pressure difference: each side scores the enemy pieces it threatens.
pub fn hanging(position: &Position) -> i32 {
    position
        .board
        .pieces()
        .filter(|&(square, piece)| {
            is_square_threatened_by(position, square, piece.color.opponent())
        })
        .map(|(_, piece)| signed(piece.color.opponent(), hanging_weight(piece.piece_type)))
        .sum()
}

/// Imbalance between one side's non-king pieces on files a-d and e-h.
fn dispersion_of(position: &Position, color: Color) -> i32 {
    let (queenside, kingside) = position
        .board
        .pieces()
        .filter(|(_, piece)| piece.color == color && piece.piece_type != PieceType::King)
        .fold((0i32, 0i32), |(left, right), (square, _)| {
            if square.file().index() < 4 {
                (left + 1, right)
            } else {
                (left, right + 1)
            }
        });
    (kingside - queenside).abs()
}

/// Dispersion difference (a penalty when positive).
pub fn dispersion(position: &Position) -> i32 {
    dispersion_of(position, Color::White) - dispersion_of(position, Color::Black)
}

/// Deterministic small perturbation in `0..JITTER_RANGE`, reproducible for a
/// given board and seed.
pub fn jitter(position: &Position, seed: u64) -> i32 {
    let mut rng = StdRng::seed_from_u64(seed ^ board_hash(&position.board));
    rng.gen_range(0..JITTER_RANGE)
}
