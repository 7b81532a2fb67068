use anyhow::{Context, Result};
use minmax_core::{Color, File, Position, Rank, Square};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formats a board as eight lines, rank 8 first.
///
/// Each cell takes two characters: `+X` for a White piece, `-x` for a Black
/// one and two spaces for an empty square.
pub fn format_board(position: &Position) -> String {
    let mut text = String::with_capacity(8 * 17);
    for rank_idx in (0..8u8).rev() {
        for file_idx in 0..8u8 {
            let (Some(file), Some(rank)) = (File::new(file_idx), Rank::new(rank_idx)) else {
                continue;
            };
            match position.board.piece_at(Square::new(file, rank)) {
                Some(piece) => {
                    text.push(match piece.color {
                        Color::White => '+',
                        Color::Black => '-',
                    });
                    text.push(piece.to_char());
                }
                None => text.push_str("  "),
            }
        }
        text.push('\n');
    }
    text
}

/// Appends every played position of a game to a text sink.
pub struct GameRecord {
    writer: Box<dyn Write>,
}

impl GameRecord {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }

    /// Creates (or truncates) the record file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = fs::File::create(path)
            .with_context(|| format!("failed to create record file {}", path.display()))?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    /// Names both players; engine names carry their evaluator.
    pub fn write_header(&mut self, white: &str, black: &str) -> Result<()> {
        writeln!(self.writer, "--- White: {white} / Black: {black} ---")
            .context("failed to write record header")
    }

    pub fn write_move(&mut self, move_number: u32, position: &Position) -> Result<()> {
        write!(
            self.writer,
            "--- move {move_number} ---\n{}",
            format_board(position)
        )
        .context("failed to write move to record")
    }

    pub fn write_result(&mut self, result: &str) -> Result<()> {
        writeln!(self.writer, "{result}").context("failed to write result to record")?;
        self.writer.flush().context("failed to flush record")
    }
}
