use crate::position::Position;
use crate::types::{Color, Piece, PieceType, Square, DIRECTIONS, KNIGHT_JUMPS};

/// Returns true if `side` threatens `square` in the given position.
///
/// Checks, in order: an adjacent king, a knight jump, a pawn on either
/// diagonal behind the square (from `side`'s point of view), then the first
/// piece met along each of the eight rays.
pub fn is_square_threatened_by(position: &Position, square: Square, side: Color) -> bool {
    let board = &position.board;

    let king = Piece::new(PieceType::King, side);
    if DIRECTIONS
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .any(|from| board.holds(from, king))
    {
        return true;
    }

    let knight = Piece::new(PieceType::Knight, side);
    if KNIGHT_JUMPS
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .any(|from| board.holds(from, knight))
    {
        return true;
    }

    let pawn = Piece::new(PieceType::Pawn, side);
    let behind = -side.pawn_direction();
    if [-1, 1]
        .iter()
        .filter_map(|&df| square.offset(df, behind))
        .any(|from| board.holds(from, pawn))
    {
        return true;
    }

    for (ray, &(df, dr)) in DIRECTIONS.iter().enumerate() {
        let mut current = square.offset(df, dr);
        while let Some(cell) = current {
            if let Some(piece) = board.piece_at(cell) {
                if piece.color == side && piece.piece_type.slides_along(ray) {
                    return true;
                }
                break;
            }
            current = cell.offset(df, dr);
        }
    }

    false
}
