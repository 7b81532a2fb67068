use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use minmax_core::{Color, File, PieceType, Position, Rank, Square};
use std::io::{self, Write};

fn symbol(piece_type: PieceType, color: Color) -> char {
    match (piece_type, color) {
        (PieceType::King, Color::White) => '♔',
        (PieceType::Queen, Color::White) => '♕',
        (PieceType::Rook, Color::White) => '♖',
        (PieceType::Bishop, Color::White) => '♗',
        (PieceType::Knight, Color::White) => '♘',
        (PieceType::Pawn, Color::White) => '♙',
        (PieceType::King, Color::Black) => '♚',
        (PieceType::Queen, Color::Black) => '♛',
        (PieceType::Rook, Color::Black) => '♜',
        (PieceType::Bishop, Color::Black) => '♝',
        (PieceType::Knight, Color::Black) => '♞',
        (PieceType::Pawn, Color::Black) => '♟',
    }
}

/// Draws the board with rank 8 on top.
///
/// With `colored` set, squares get a checkered background and Black pieces
/// are drawn in magenta; otherwise plain text is written.
pub fn render_board<W: Write>(out: &mut W, position: &Position, colored: bool) -> io::Result<()> {
    writeln!(out, "   a b c d e f g h")?;
    writeln!(out, " ┌─────────────────┐")?;

    for rank_idx in (0..8u8).rev() {
        write!(out, "{}│ ", rank_idx + 1)?;

        for file_idx in 0..8u8 {
            let (Some(file), Some(rank)) = (File::new(file_idx), Rank::new(rank_idx)) else {
                continue;
            };
            let square = Square::new(file, rank);

            if colored {
                let background = if (file_idx + rank_idx) % 2 == 0 {
                    TermColor::DarkGrey
                } else {
                    TermColor::Black
                };
                queue!(out, SetBackgroundColor(background))?;
            }

            match position.board.piece_at(square) {
                Some(piece) => {
                    if colored {
                        let foreground = match piece.color {
                            Color::White => TermColor::White,
                            Color::Black => TermColor::Magenta,
                        };
                        queue!(out, SetForegroundColor(foreground))?;
                    }
                    queue!(out, Print(symbol(piece.piece_type, piece.color)), Print(' '))?;
                }
                None if colored => queue!(out, Print("  "))?,
                None => queue!(out, Print(". "))?,
            }

            if colored {
                queue!(out, ResetColor)?;
            }
        }

        writeln!(out, "│{}", rank_idx + 1)?;
    }

    writeln!(out, " └─────────────────┘")?;
    writeln!(out, "   a b c d e f g h")?;
    out.flush()
}

/// Prints the board to stdout, colored.
pub fn print_board(position: &Position) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    render_board(&mut stdout, position, true)
}
