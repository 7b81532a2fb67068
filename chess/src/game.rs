use crate::record::GameRecord;
use anyhow::Result;
use minmax_agents::Agent;
use minmax_core::{classify, describe_move, Color, History, MoveDescription, Outcome, Position};
use std::fmt;
use tracing::info;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    /// A king was captured.
    Decided(Outcome),
    /// The side to move had no move (or resigned) and loses.
    NoMove { side: Color },
    /// The move limit was reached before a decision.
    MoveLimit,
}

impl GameEnd {
    /// The game result, None when the limit stopped the game.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameEnd::Decided(outcome) => Some(outcome),
            GameEnd::NoMove { side } => Some(Outcome::win_for(side.opponent())),
            GameEnd::MoveLimit => None,
        }
    }
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnd::Decided(outcome) => write!(f, "{outcome}"),
            GameEnd::NoMove { side } => {
                write!(f, "{side} has no move: {}", Outcome::win_for(side.opponent()))
            }
            GameEnd::MoveLimit => write!(f, "Move limit reached"),
        }
    }
}

/// A move as reported to observers.
#[derive(Debug)]
pub struct PlayedMove<'p> {
    /// 1-based count of moves played so far
    pub number: u32,
    pub description: Option<MoveDescription>,
    pub position: &'p Position,
    pub side_to_move: Color,
}

/// Called after every played move.
pub type MoveObserver<'a> = Box<dyn FnMut(&PlayedMove<'_>) + 'a>;

/// Alternates two players from a start position until the game ends.
pub struct Game<'a> {
    position: Position,
    side: Color,
    history: History,
    move_number: u32,
    max_moves: Option<u32>,
    players: [Box<dyn Agent + 'a>; 2],
    record: Option<GameRecord>,
    observer: Option<MoveObserver<'a>>,
}

impl<'a> Game<'a> {
    pub fn new(
        position: Position,
        side: Color,
        white: Box<dyn Agent + 'a>,
        black: Box<dyn Agent + 'a>,
        history_capacity: usize,
    ) -> Self {
        let mut history = History::new(history_capacity);
        history.push(&position.board);
        Self {
            position,
            side,
            history,
            move_number: 0,
            max_moves: None,
            players: [white, black],
            record: None,
            observer: None,
        }
    }

    pub fn with_max_moves(mut self, max_moves: Option<u32>) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_record(mut self, record: GameRecord) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_observer(mut self, observer: MoveObserver<'a>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Plays until a king is captured, a side cannot move, or the limit hits.
    pub fn run(&mut self) -> Result<GameEnd> {
        if let Some(record) = self.record.as_mut() {
            let [white, black] = &self.players;
            record.write_header(white.name(), black.name())?;
            record.write_move(self.move_number, &self.position)?;
        }

        let end = loop {
            if let Some(outcome) = classify(&self.position) {
                break GameEnd::Decided(outcome);
            }
            if self.max_moves.is_some_and(|max| self.move_number >= max) {
                break GameEnd::MoveLimit;
            }

            let side = self.side;
            let player = &mut self.players[side.index()];
            let Some(next) = player.choose(&self.position, side, &self.history, self.move_number)
            else {
                break GameEnd::NoMove { side };
            };

            let description = describe_move(&self.position, &next);
            info!(
                player = player.name(),
                move_number = self.move_number + 1,
                mv = %description.map(|d| d.to_string()).unwrap_or_default(),
                "move played"
            );

            self.history.push(&next.board);
            self.position = next;
            self.move_number += 1;
            self.side = side.opponent();

            if let Some(record) = self.record.as_mut() {
                record.write_move(self.move_number, &self.position)?;
            }
            if let Some(observer) = self.observer.as_mut() {
                observer(&PlayedMove {
                    number: self.move_number,
                    description,
                    position: &self.position,
                    side_to_move: self.side,
                });
            }
        };

        info!(result = %end, moves = self.move_number, "game over");

        if let Some(record) = self.record.as_mut() {
            record.write_result(&end.to_string())?;
        }

        Ok(end)
    }
}
