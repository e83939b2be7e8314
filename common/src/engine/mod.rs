mod board;
mod bot;
mod game_state;
mod session_rng;
mod win_detector;

pub use board::{BOARD_SIZE, Board, Mark, Position};
pub use bot::{Difficulty, SearchResult, best_move, choose_move, random_move};
pub use game_state::{GameState, MoveError};
pub use session_rng::SessionRng;
pub use win_detector::check_win;
