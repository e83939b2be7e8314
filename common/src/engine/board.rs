use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Mark {
    type Err = String;

    /// Parses a player symbol. `Empty` is not a symbol a player can claim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(format!("Unknown player symbol: {:?}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// 3x3 grid with value semantics. `Copy` keeps search exploration on the
/// stack; no caller ever observes a half-searched shared board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }

    pub fn mark_at(&self, row: usize, col: usize) -> Option<Mark> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        Some(self.cells[row][col])
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub(crate) fn set(&mut self, position: Position, mark: Mark) {
        self.cells[position.row][position.col] = mark;
    }

    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_nine_moves_in_row_major_order() {
        let board = Board::empty();
        let moves = board.available_moves();
        assert_eq!(moves.len(), 9);
        for (i, position) in moves.iter().enumerate() {
            assert_eq!(position.row, i / 3);
            assert_eq!(position.col, i % 3);
        }
    }

    #[test]
    fn test_set_removes_cell_from_available_moves() {
        let mut board = Board::empty();
        board.set(Position::new(1, 2), Mark::X);
        let moves = board.available_moves();
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Position::new(1, 2)));
        assert_eq!(board.mark_at(1, 2), Some(Mark::X));
    }

    #[test]
    fn test_mark_at_out_of_bounds() {
        let board = Board::empty();
        assert_eq!(board.mark_at(3, 0), None);
        assert_eq!(board.mark_at(0, 3), None);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::empty();
        assert!(!board.is_full());
        for position in Board::empty().available_moves() {
            board.set(position, Mark::X);
        }
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_mark_parsing() {
        assert_eq!("X".parse::<Mark>(), Ok(Mark::X));
        assert_eq!("o".parse::<Mark>(), Ok(Mark::O));
        assert!("empty".parse::<Mark>().is_err());
        assert!("".parse::<Mark>().is_err());
    }
}
