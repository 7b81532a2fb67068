use crate::attacks::is_square_threatened_by;
use crate::history::History;
use crate::position::Position;
use crate::types::*;

/// Generates every legal successor position for `side`.
///
/// Successors that leave the mover's own king threatened, or that reproduce
/// a board from the played history, are discarded. The order of the
/// returned list carries no meaning.
pub fn generate_successors(position: &Position, side: Color, history: &History) -> Vec<Position> {
    let mut successors = generate_pseudo_successors(position, side);
    filter_successors(side, history, &mut successors);
    successors
}

/// Generates all pseudo-legal successors (not checking for king safety).
pub fn generate_pseudo_successors(position: &Position, side: Color) -> Vec<Position> {
    let mut successors = Vec::with_capacity(48);

    for (from, piece) in position.board.pieces() {
        if piece.color != side {
            continue;
        }
        match piece.piece_type {
            PieceType::Pawn => generate_pawn_successors(position, from, side, &mut successors),
            PieceType::Knight => {
                generate_knight_successors(position, from, piece, &mut successors)
            }
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                generate_sliding_successors(position, from, piece, &mut successors)
            }
            PieceType::King => {
                generate_castling_successors(position, from, side, &mut successors);
                generate_king_successors(position, from, piece, &mut successors);
            }
        }
    }

    successors
}

/// Filters out successors that leave the king in check or repeat a played board.
fn filter_successors(side: Color, history: &History, successors: &mut Vec<Position>) {
    successors.retain(|next| !next.is_in_check(side) && !history.contains(&next.board));
}

/// Copies the position with `piece` moved from `from` to `to`.
/// A king standing on `to` is captured and its cache becomes absent.
fn relocate(position: &Position, from: Square, to: Square, piece: Piece) -> Position {
    let mut next = position.clone();
    next.value = 0;
    next.put(from, None);
    next.put(to, Some(piece));
    next
}

/// Generates pawn advances, captures and promotions.
fn generate_pawn_successors(
    position: &Position,
    from: Square,
    side: Color,
    successors: &mut Vec<Position>,
) {
    let board = &position.board;
    let direction = side.pawn_direction();

    // Single and double push
    if let Some(ahead) = from.offset(0, direction) {
        if board.is_empty(ahead) {
            push_pawn_arrival(position, from, ahead, side, successors);

            if from.rank() == side.pawn_rank() {
                if let Some(double) = ahead.offset(0, direction) {
                    if board.is_empty(double) {
                        successors.push(relocate(
                            position,
                            from,
                            double,
                            Piece::new(PieceType::Pawn, side),
                        ));
                    }
                }
            }
        }
    }

    // Diagonal captures
    for file_delta in [-1, 1] {
        if let Some(target) = from.offset(file_delta, direction) {
            if board.is_enemy(target, side) {
                push_pawn_arrival(position, from, target, side, successors);
            }
        }
    }
}

/// Pushes a pawn arriving on `to`, expanding into the four promotions on the last rank.
fn push_pawn_arrival(
    position: &Position,
    from: Square,
    to: Square,
    side: Color,
    successors: &mut Vec<Position>,
) {
    if to.rank() == side.promotion_rank() {
        for promoted in PieceType::PROMOTIONS {
            successors.push(relocate(position, from, to, Piece::new(promoted, side)));
        }
    } else {
        successors.push(relocate(position, from, to, Piece::new(PieceType::Pawn, side)));
    }
}

/// Generates knight jumps onto empty or enemy squares.
fn generate_knight_successors(
    position: &Position,
    from: Square,
    piece: Piece,
    successors: &mut Vec<Position>,
) {
    for &(df, dr) in &KNIGHT_JUMPS {
        if let Some(to) = from.offset(df, dr) {
            if !position.board.is_color(to, piece.color) {
                successors.push(relocate(position, from, to, piece));
            }
        }
    }
}

/// Generates bishop, rook and queen moves along their rays.
///
/// A rook or queen leaving its own corner blocks castling on that wing.
fn generate_sliding_successors(
    position: &Position,
    from: Square,
    piece: Piece,
    successors: &mut Vec<Position>,
) {
    let side = piece.color.index();
    let corner_wing = match piece.piece_type {
        PieceType::Rook | PieceType::Queen if from.rank() == piece.color.home_rank() => {
            Wing::of_corner(from.file())
        }
        _ => None,
    };

    for (ray, &(df, dr)) in DIRECTIONS.iter().enumerate() {
        if !piece.piece_type.slides_along(ray) {
            continue;
        }

        let mut current = from.offset(df, dr);
        while let Some(to) = current {
            if position.board.is_color(to, piece.color) {
                break;
            }

            let mut next = relocate(position, from, to, piece);
            if let Some(wing) = corner_wing {
                next.castling[side] = next.castling[side].block(wing);
            }
            successors.push(next);

            if !position.board.is_empty(to) {
                break; // Can't move past a captured piece
            }
            current = to.offset(df, dr);
        }
    }
}

/// Generates one-step king moves (excluding castling).
fn generate_king_successors(
    position: &Position,
    from: Square,
    piece: Piece,
    successors: &mut Vec<Position>,
) {
    let side = piece.color.index();
    for &(df, dr) in &DIRECTIONS {
        if let Some(to) = from.offset(df, dr) {
            if !position.board.is_color(to, piece.color) {
                let mut next = relocate(position, from, to, piece);
                next.castling[side] = next.castling[side].revoke();
                successors.push(next);
            }
        }
    }
}

/// Generates castling moves for the king standing on `from`.
///
/// Requires the status to allow the wing, king and rook on their home
/// squares, empty cells in between, and no threatened square among the
/// king's start, its path and the queenside knight square.
fn generate_castling_successors(
    position: &Position,
    from: Square,
    side: Color,
    successors: &mut Vec<Position>,
) {
    let status = position.castling(side);
    let home = side.home_rank();
    if !status.any() || from != Square::new(File::E, home) {
        return;
    }

    let board = &position.board;
    let opponent = side.opponent();
    let king = Piece::new(PieceType::King, side);
    let rook = Piece::new(PieceType::Rook, side);

    for wing in [Wing::Kingside, Wing::Queenside] {
        if !status.allows(wing) {
            continue;
        }

        let corner = Square::new(wing.rook_file(), home);
        if !board.holds(corner, rook) {
            continue;
        }

        let (between, guarded): (&[File], &[File]) = match wing {
            Wing::Kingside => (&[File::F, File::G], &[File::E, File::F, File::G]),
            Wing::Queenside => (
                &[File::B, File::C, File::D],
                &[File::B, File::C, File::D, File::E],
            ),
        };

        if between
            .iter()
            .any(|&file| !board.is_empty(Square::new(file, home)))
        {
            continue;
        }
        if guarded
            .iter()
            .any(|&file| is_square_threatened_by(position, Square::new(file, home), opponent))
        {
            continue;
        }

        let mut next = position.clone();
        next.value = 0;
        next.put(from, None);
        next.put(corner, None);
        next.put(Square::new(wing.king_target(), home), Some(king));
        next.put(Square::new(wing.rook_target(), home), Some(rook));
        next.castling[side.index()] = CastlingStatus::Done;
        successors.push(next);
    }
}
