pub mod attacks;
pub mod board;
pub mod describe;
pub mod fen;
pub mod history;
pub mod move_gen;
pub mod outcome;
pub mod perft;
pub mod position;
pub mod types;
pub mod zobrist;

#[cfg(test)]
mod proptests;

pub use attacks::is_square_threatened_by;
pub use board::*;
pub use describe::{describe_move, MoveDescription};
pub use fen::{parse_fen, positions, FenError};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use move_gen::{generate_pseudo_successors, generate_successors};
pub use outcome::{classify, Outcome, WIN_SCORE};
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use position::Position;
pub use types::*;
pub use zobrist::board_hash;
