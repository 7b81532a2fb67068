use crate::board::Board;

/// Default number of played boards remembered.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Ring buffer of the last boards actually played in the game.
///
/// The generator rejects any successor whose board matches an entry, which
/// deters the engine from walking back into recently played positions.
/// Search never writes to it.
#[derive(Clone, Debug)]
pub struct History {
    boards: Vec<Board>,
    capacity: usize,
    next: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` boards.
    pub fn new(capacity: usize) -> Self {
        Self {
            boards: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Records a played board, overwriting the oldest one when full.
    pub fn push(&mut self, board: &Board) {
        if self.capacity == 0 {
            return;
        }
        if self.boards.len() < self.capacity {
            self.boards.push(board.clone());
        } else {
            self.boards[self.next] = board.clone();
        }
        self.next = (self.next + 1) % self.capacity;
    }

    /// Returns true if the board was played recently.
    pub fn contains(&self, board: &Board) -> bool {
        self.boards.iter().any(|played| played == board)
    }

    /// Number of boards currently remembered.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Maximum number of boards remembered.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forgets every recorded board.
    pub fn clear(&mut self) {
        self.boards.clear();
        self.next = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn board_with_moved_pawn(from: u8, to: u8) -> Board {
        let mut board = Board::starting_position();
        board.move_piece(
            Square::from_index(from).unwrap(),
            Square::from_index(to).unwrap(),
        );
        board
    }

    #[test]
    fn test_contains_after_push() {
        let mut history = History::default();
        let board = Board::starting_position();
        assert!(!history.contains(&board));
        history.push(&board);
        assert!(history.contains(&board));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_oldest_entry_is_overwritten() {
        let mut history = History::new(2);
        let first = board_with_moved_pawn(8, 16);
        let second = board_with_moved_pawn(9, 17);
        let third = board_with_moved_pawn(10, 18);

        history.push(&first);
        history.push(&second);
        history.push(&third);

        assert_eq!(history.len(), 2);
        assert!(!history.contains(&first));
        assert!(history.contains(&second));
        assert!(history.contains(&third));
    }

    #[test]
    fn test_zero_capacity_remembers_nothing() {
        let mut history = History::new(0);
        history.push(&Board::starting_position());
        assert!(history.is_empty());
    }
}
