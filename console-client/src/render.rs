use common::engine::{BOARD_SIZE, Board};

/// Human-readable grid with row and column indices:
///
/// ```text
///   0 1 2
/// 0 X |   | O
///   ---------
/// 1   | X |
///   ---------
/// 2   |   | O
/// ```
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("\n  0 1 2\n");
    for (i, row) in board.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|mark| mark.to_char().to_string()).collect();
        out.push_str(&format!("{} {}\n", i, cells.join(" | ")));
        if i < BOARD_SIZE - 1 {
            out.push_str("  ---------\n");
        }
    }
    out
}
