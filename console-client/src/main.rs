mod render;

use std::io::{self, BufRead, Write};

use clap::Parser;
use common::engine::{Difficulty, GameState, Mark, SessionRng, choose_move};

use render::render_board;

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    /// Symbol the human plays; X always moves first.
    #[arg(long, default_value = "X")]
    symbol: String,

    /// Bot strength: easy, medium or hard.
    #[arg(long, default_value = "hard")]
    difficulty: String,

    /// Fixed RNG seed for reproducible bot play.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    let human_mark: Mark = args.symbol.parse()?;
    let difficulty: Difficulty = args.difficulty.parse()?;
    let bot_mark = human_mark
        .opponent()
        .ok_or_else(|| "Human mark must be X or O".to_string())?;

    println!("Welcome to Tic Tac Toe!");
    println!("You are {}, AI is {} ({})", human_mark, bot_mark, difficulty);
    println!("Enter moves as row column (e.g., '1 2')");

    let mut rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let mut state = GameState::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render_board(state.board()));

        if let Some(winner) = state.winner() {
            if winner == human_mark {
                println!("Congratulations! You won!");
            } else {
                println!("AI won! Better luck next time.");
            }
            break;
        }
        if state.is_draw() {
            println!("It's a draw!");
            break;
        }

        if state.current_mark() == human_mark {
            print!("Your move ({}): ", human_mark);
            io::stdout().flush().map_err(|e| e.to_string())?;

            let line = match lines.next() {
                Some(line) => line.map_err(|e| e.to_string())?,
                None => break,
            };

            let Some((row, col)) = parse_move(&line) else {
                println!("Please enter row and column as two numbers (0-2).");
                continue;
            };

            if let Err(err) = state.apply_move(row, col) {
                println!("Invalid move: {}", err);
            }
        } else {
            println!("AI ({}) is thinking...", bot_mark);
            let position = choose_move(difficulty, state.board(), bot_mark, &mut rng)
                .expect("a running game always has a legal move");
            state
                .apply_move(position.row, position.col)
                .expect("the chosen bot move is always legal");
            println!("AI placed at: {} {}", position.row, position.col);
        }
    }

    Ok(())
}

fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_accepts_two_numbers() {
        assert_eq!(parse_move("1 2"), Some((1, 2)));
        assert_eq!(parse_move("  0   0 "), Some((0, 0)));
    }

    #[test]
    fn test_parse_move_rejects_garbage() {
        assert_eq!(parse_move(""), None);
        assert_eq!(parse_move("1"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
        assert_eq!(parse_move("-1 0"), None);
    }
}
