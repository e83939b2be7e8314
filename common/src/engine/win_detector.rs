use super::board::{BOARD_SIZE, Board, Mark};

/// Returns the winning mark, if any. Scan order is fixed: rows top to
/// bottom, then columns left to right, then the main diagonal, then the
/// anti-diagonal. Legal alternating play cannot produce two winners, so
/// the order only pins down which line reports first.
pub fn check_win(board: &Board) -> Option<Mark> {
    let cells = board.rows();

    for row in cells {
        if row[0] != Mark::Empty && row[0] == row[1] && row[1] == row[2] {
            return Some(row[0]);
        }
    }

    for col in 0..BOARD_SIZE {
        if cells[0][col] != Mark::Empty
            && cells[0][col] == cells[1][col]
            && cells[1][col] == cells[2][col]
        {
            return Some(cells[0][col]);
        }
    }

    if cells[0][0] != Mark::Empty && cells[0][0] == cells[1][1] && cells[1][1] == cells[2][2] {
        return Some(cells[0][0]);
    }

    if cells[0][2] != Mark::Empty && cells[0][2] == cells[1][1] && cells[1][1] == cells[2][0] {
        return Some(cells[0][2]);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameState;

    fn play(moves: &[(usize, usize)]) -> GameState {
        let mut state = GameState::new();
        for &(row, col) in moves {
            state.apply_move(row, col).unwrap();
        }
        state
    }

    #[test]
    fn test_no_winner_on_empty_board() {
        assert_eq!(check_win(&Board::empty()), None);
    }

    #[test]
    fn test_no_winner_mid_game() {
        let state = play(&[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(check_win(state.board()), None);
    }

    #[test]
    fn test_row_win() {
        // X takes the top row.
        let state = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(check_win(state.board()), Some(Mark::X));
    }

    #[test]
    fn test_column_win() {
        // O takes the middle column.
        let state = play(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 1)]);
        assert_eq!(check_win(state.board()), Some(Mark::O));
    }

    #[test]
    fn test_main_diagonal_win() {
        let state = play(&[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
        assert_eq!(check_win(state.board()), Some(Mark::X));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let state = play(&[(0, 2), (0, 0), (1, 1), (0, 1), (2, 0)]);
        assert_eq!(check_win(state.board()), Some(Mark::X));
    }
}
