use std::fmt;
use std::str::FromStr;

use super::board::{Board, Mark, Position};
use super::session_rng::SessionRng;
use super::win_detector::check_win;

/// Bot strength. `Medium` is a coin flip between the other two per move,
/// not a calibrated skill level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {:?}", other)),
        }
    }
}

/// A move together with its backed-up minimax score: +1 when the
/// maximizer forces a win, -1 when the opponent does, 0 for a draw under
/// optimal play on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Position,
    pub score: i32,
}

/// Picks the next move for `mover` at the given strength. `None` only on
/// a terminal board, which callers are expected to rule out first.
pub fn choose_move(
    difficulty: Difficulty,
    board: &Board,
    mover: Mark,
    rng: &mut SessionRng,
) -> Option<Position> {
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => {
            if rng.random_bool() {
                random_move(board, rng)
            } else {
                best_move(board, mover).map(|result| result.position)
            }
        }
        Difficulty::Hard => best_move(board, mover).map(|result| result.position),
    }
}

/// Uniform choice over the legal moves.
pub fn random_move(board: &Board, rng: &mut SessionRng) -> Option<Position> {
    let moves = board.available_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

/// Exhaustive minimax over every legal continuation, scoring from the
/// perspective of `maximizer` (the mover). The maximizer is an explicit
/// parameter: the bot may be playing either symbol, so the score must
/// follow its assigned mark rather than a fixed one.
///
/// Ties keep the first-encountered move in row-major order. Returns
/// `None` on a terminal board.
pub fn best_move(board: &Board, maximizer: Mark) -> Option<SearchResult> {
    let opponent = maximizer.opponent()?;
    if check_win(board).is_some() {
        return None;
    }

    let mut scratch = *board;
    let mut best: Option<SearchResult> = None;

    for position in board.available_moves() {
        scratch.set(position, maximizer);
        let score = minimax(&mut scratch, opponent, maximizer);
        scratch.set(position, Mark::Empty);

        match best {
            Some(current) if score <= current.score => {}
            _ => best = Some(SearchResult { position, score }),
        }
    }

    best
}

fn minimax(board: &mut Board, to_move: Mark, maximizer: Mark) -> i32 {
    if let Some(winner) = check_win(board) {
        return if winner == maximizer { 1 } else { -1 };
    }
    if board.is_full() {
        return 0;
    }

    // X and O alternate all the way down, so `to_move` is never Empty here.
    let next = to_move.opponent().unwrap_or(Mark::Empty);
    let maximizing = to_move == maximizer;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for position in board.available_moves() {
        board.set(position, to_move);
        let score = minimax(board, next, maximizer);
        board.set(position, Mark::Empty);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
