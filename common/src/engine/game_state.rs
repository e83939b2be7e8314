use std::fmt;

use super::board::{Board, Mark, Position};
use super::win_detector::check_win;

/// Why a move was rejected. Every variant leaves the game untouched.
///
/// The engine itself only produces `OutOfRange` and `CellOccupied`;
/// `WrongTurn` and `GameAlreadyOver` belong to whoever orchestrates a
/// session, since the engine does not know which party a move came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    OutOfRange { row: usize, col: usize },
    CellOccupied { row: usize, col: usize },
    WrongTurn,
    GameAlreadyOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange { row, col } => {
                write!(f, "Position ({}, {}) is out of bounds", row, col)
            }
            MoveError::CellOccupied { row, col } => {
                write!(f, "Cell ({}, {}) is already marked", row, col)
            }
            MoveError::WrongTurn => write!(f, "Not your turn"),
            MoveError::GameAlreadyOver => write!(f, "Game is already over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// The board plus whose turn it is. Terminal status, winner, draw and
/// legal moves are derived on demand, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
}

impl GameState {
    /// Empty board, X to move. X always moves first.
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            current_mark: Mark::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// Places the current mover's mark and flips the turn. Rejects
    /// out-of-range and occupied cells without mutating anything.
    ///
    /// Does not check whether the game is already over; callers that
    /// accept moves from outside must check `is_terminal` first.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        if !Board::in_bounds(row, col) {
            return Err(MoveError::OutOfRange { row, col });
        }
        let position = Position::new(row, col);
        if self.board.mark_at(row, col) != Some(Mark::Empty) {
            return Err(MoveError::CellOccupied { row, col });
        }

        self.board.set(position, self.current_mark);
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            _ => Mark::X,
        };
        Ok(())
    }

    pub fn winner(&self) -> Option<Mark> {
        check_win(&self.board)
    }

    pub fn is_draw(&self) -> bool {
        self.board.is_full() && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_draw()
    }

    pub fn available_moves(&self) -> Vec<Position> {
        self.board.available_moves()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
