use minmax_agents::Agent;
use minmax_core::{
    describe_move, generate_successors, Color, File, History, Piece, PieceType, Position, Square,
};
use std::io::{BufRead, Write};
use thiserror::Error;

/// Why a typed move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveInputError {
    #[error("expected a move like e2e4 or e7e8q, got '{0}'")]
    InvalidFormat(String),
    #[error("invalid promotion piece '{0}', use q, n, b or r")]
    InvalidPromotion(char),
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("the piece on {0} is not yours")]
    NotYourPiece(Square),
    #[error("illegal move: {0}")]
    Illegal(String),
}

/// A move in coordinate notation, e.g. `e2e4` or `e7e8n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl MoveText {
    pub fn parse(text: &str) -> Result<Self, MoveInputError> {
        let text = text.trim();
        let invalid = || MoveInputError::InvalidFormat(text.to_string());

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }

        let from = Square::parse(&text[0..2]).ok_or_else(invalid)?;
        let to = Square::parse(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => Some(match c.to_ascii_lowercase() {
                'q' => PieceType::Queen,
                'n' => PieceType::Knight,
                'b' => PieceType::Bishop,
                'r' => PieceType::Rook,
                _ => return Err(MoveInputError::InvalidPromotion(c)),
            }),
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// Applies the move to a copy of the board without any legality check.
    ///
    /// A pawn reaching the last rank becomes the requested piece (queen by
    /// default) and a two-file king move from the e-file brings the rook along.
    pub fn apply(&self, position: &Position, side: Color) -> Result<Position, MoveInputError> {
        let piece = position
            .board
            .piece_at(self.from)
            .ok_or(MoveInputError::EmptySquare(self.from))?;
        if piece.color != side {
            return Err(MoveInputError::NotYourPiece(self.from));
        }

        let mut board = position.board.clone();
        board.move_piece(self.from, self.to);

        if piece.piece_type == PieceType::Pawn && self.to.rank() == side.promotion_rank() {
            let promoted = self.promotion.unwrap_or(PieceType::Queen);
            board.set_piece(self.to, Some(Piece::new(promoted, side)));
        }

        let home = side.home_rank();
        if piece.piece_type == PieceType::King
            && self.from == Square::new(File::E, home)
            && self.to.rank() == home
        {
            let rook_move = match self.to.file() {
                File::G => Some((File::H, File::F)),
                File::C => Some((File::A, File::D)),
                _ => None,
            };
            if let Some((corner, target)) = rook_move {
                board.move_piece(Square::new(corner, home), Square::new(target, home));
            }
        }

        let mut next = position.clone();
        next.board = board;
        Ok(next)
    }
}

/// Resolves typed text into one of the legal successors.
///
/// The move is legal iff its mechanically applied board matches a generated
/// successor exactly.
pub fn resolve_move(
    position: &Position,
    side: Color,
    history: &History,
    text: &str,
) -> Result<Position, MoveInputError> {
    let typed = MoveText::parse(text)?;
    let applied = typed.apply(position, side)?;

    generate_successors(position, side, history)
        .into_iter()
        .find(|next| next.same_board(&applied))
        .ok_or_else(|| MoveInputError::Illegal(text.trim().to_string()))
}

/// A player typing moves on a line-oriented input.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanPlayer<R, W> {
    /// Prompts until a legal move is typed. End of input or `quit` resigns.
    fn choose(
        &mut self,
        position: &Position,
        side: Color,
        history: &History,
        _move_number: u32,
    ) -> Option<Position> {
        if generate_successors(position, side, history).is_empty() {
            return None;
        }

        loop {
            write!(self.output, "{side} to move (e.g. e2e4, quit): ").ok()?;
            self.output.flush().ok()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).ok()? == 0 {
                return None;
            }

            match line.trim() {
                "" => continue,
                "quit" | "resign" => return None,
                text => match resolve_move(position, side, history, text) {
                    Ok(next) => {
                        if let Some(description) = describe_move(position, &next) {
                            writeln!(self.output, "{description}").ok()?;
                        }
                        return Some(next);
                    }
                    Err(error) => {
                        writeln!(self.output, "{error}, try again").ok()?;
                    }
                },
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minmax_core::{parse_fen, positions, CastlingStatus};
    use std::io::Cursor;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn test_parse_move_text() {
        assert_eq!(
            MoveText::parse("e2e4"),
            Ok(MoveText {
                from: sq("e2"),
                to: sq("e4"),
                promotion: None
            })
        );
        assert_eq!(
            MoveText::parse(" a7a8N\n").map(|m| m.promotion),
            Ok(Some(PieceType::Knight))
        );
        assert!(matches!(
            MoveText::parse("e2"),
            Err(MoveInputError::InvalidFormat(_))
        ));
        assert!(matches!(
            MoveText::parse("z2e4"),
            Err(MoveInputError::InvalidFormat(_))
        ));
        assert_eq!(
            MoveText::parse("a7a8k"),
            Err(MoveInputError::InvalidPromotion('k'))
        );
    }

    #[test]
    fn test_resolve_legal_move() {
        let position = Position::initial();
        let next = resolve_move(&position, Color::White, &History::default(), "g1f3").unwrap();
        assert_eq!(
            next.board.piece_at(sq("f3")),
            Some(Piece::new(PieceType::Knight, Color::White))
        );
    }

    #[test]
    fn test_resolve_rejects_illegal_moves() {
        let position = Position::initial();
        let history = History::default();
        assert_eq!(
            resolve_move(&position, Color::White, &history, "e2e5").err(),
            Some(MoveInputError::Illegal("e2e5".to_string()))
        );
        assert_eq!(
            resolve_move(&position, Color::White, &history, "e4e5").err(),
            Some(MoveInputError::EmptySquare(sq("e4")))
        );
        assert_eq!(
            resolve_move(&position, Color::White, &history, "e7e5").err(),
            Some(MoveInputError::NotYourPiece(sq("e7")))
        );
    }

    #[test]
    fn test_resolve_castling() {
        let (position, side) = parse_fen(positions::CASTLING).unwrap();
        let next = resolve_move(&position, side, &History::default(), "e1c1").unwrap();
        assert_eq!(next.castling(Color::White), CastlingStatus::Done);
        assert_eq!(
            next.board.piece_at(sq("d1")),
            Some(Piece::new(PieceType::Rook, Color::White))
        );
    }

    #[test]
    fn test_resolve_promotion_defaults_to_queen() {
        let (position, side) = parse_fen("7k/P7/8/8/8/8/8/K7 w - -").unwrap();
        let history = History::default();

        let queen = resolve_move(&position, side, &history, "a7a8").unwrap();
        assert_eq!(
            queen.board.piece_at(sq("a8")),
            Some(Piece::new(PieceType::Queen, Color::White))
        );

        let rook = resolve_move(&position, side, &history, "a7a8r").unwrap();
        assert_eq!(
            rook.board.piece_at(sq("a8")),
            Some(Piece::new(PieceType::Rook, Color::White))
        );
    }

    #[test]
    fn test_human_player_retries_then_moves() {
        let input = Cursor::new("e2e5\n\ne2e4\n");
        let mut output = Vec::new();
        let mut player = HumanPlayer::new("Human", input, &mut output);

        let next = player
            .choose(&Position::initial(), Color::White, &History::default(), 0)
            .unwrap();
        assert!(next.board.piece_at(sq("e4")).is_some());

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("illegal move: e2e5"));
        assert!(transcript.contains("White pawn to e4"));
    }

    #[test]
    fn test_human_player_quits() {
        let mut player = HumanPlayer::new("Human", Cursor::new("quit\n"), Vec::new());
        assert!(player
            .choose(&Position::initial(), Color::White, &History::default(), 0)
            .is_none());

        let mut silent = HumanPlayer::new("Human", Cursor::new(""), Vec::new());
        assert!(silent
            .choose(&Position::initial(), Color::White, &History::default(), 0)
            .is_none());
    }
}
