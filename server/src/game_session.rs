use std::time::{Duration, Instant};

use common::engine::{
    Difficulty, GameState, Mark, MoveError, Position, SessionRng, choose_move,
};
use serde::Serialize;

/// One live game: the human on one mark, the bot on the other. The bot
/// answers synchronously inside the same call, so between requests the
/// session always rests on the human's turn (or on a finished game).
pub struct GameSession {
    state: GameState,
    human_mark: Mark,
    bot_mark: Mark,
    difficulty: Difficulty,
    rng: SessionRng,
    last_activity: Instant,
}

/// Read-only view handed to the transport layer.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<char>>,
    pub current_player: char,
    pub game_over: bool,
    pub winner: Option<char>,
    pub is_draw: bool,
    pub available_moves: Vec<Position>,
}

impl GameSession {
    pub fn new(
        human_mark: Mark,
        difficulty: Difficulty,
        rng: SessionRng,
    ) -> Result<Self, String> {
        let bot_mark = human_mark
            .opponent()
            .ok_or_else(|| "Human mark must be X or O".to_string())?;

        let mut session = Self {
            state: GameState::new(),
            human_mark,
            bot_mark,
            difficulty,
            rng,
            last_activity: Instant::now(),
        };

        // X opens, so a bot playing X moves before the first request.
        session.play_bot_turn_if_due();
        Ok(session)
    }

    /// Seed of this session's RNG. Recreating a session with the same
    /// seed and difficulty replays the same bot moves.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Applies one human move, then the bot reply when the game is still
    /// running. Rejections leave the game untouched.
    pub fn human_move(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        self.touch();

        if self.state.is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }
        if self.state.current_mark() != self.human_mark {
            return Err(MoveError::WrongTurn);
        }

        self.state.apply_move(row, col)?;
        self.play_bot_turn_if_due();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.touch();
        self.state.reset();
        self.play_bot_turn_if_due();
    }

    fn play_bot_turn_if_due(&mut self) {
        if self.state.is_terminal() || self.state.current_mark() != self.bot_mark {
            return;
        }

        if let Some(position) =
            choose_move(self.difficulty, self.state.board(), self.bot_mark, &mut self.rng)
        {
            let applied = self.state.apply_move(position.row, position.col);
            debug_assert!(applied.is_ok(), "bot chose an illegal move: {:?}", applied);
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let board = self
            .state
            .board()
            .rows()
            .iter()
            .map(|row| row.iter().map(|&mark| mark.to_char()).collect())
            .collect();

        GameSnapshot {
            board,
            current_player: self.state.current_mark().to_char(),
            game_over: self.state.is_terminal(),
            winner: self.state.winner().map(Mark::to_char),
            is_draw: self.state.is_draw(),
            available_moves: self.state.available_moves(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    #[cfg(test)]
    fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::engine::best_move;

    fn session(human_mark: Mark, difficulty: Difficulty) -> GameSession {
        GameSession::new(human_mark, difficulty, SessionRng::new(42)).unwrap()
    }

    #[test]
    fn test_human_plays_x_bot_waits() {
        let session = session(Mark::X, Difficulty::Hard);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_player, 'X');
        assert_eq!(snapshot.available_moves.len(), 9);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_bot_playing_x_opens_immediately() {
        let session = session(Mark::O, Difficulty::Hard);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_player, 'O');
        assert_eq!(snapshot.available_moves.len(), 8);
    }

    #[test]
    fn test_bot_replies_within_the_same_move() {
        let mut session = session(Mark::X, Difficulty::Hard);
        session.human_move(1, 1).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_player, 'X');
        assert_eq!(snapshot.available_moves.len(), 7);
    }

    #[test]
    fn test_rejected_move_reports_occupied_cell() {
        let mut session = session(Mark::X, Difficulty::Hard);
        session.human_move(1, 1).unwrap();
        let before = session.snapshot();
        // (1, 1) is the human's own earlier mark.
        assert_eq!(
            session.human_move(1, 1),
            Err(MoveError::CellOccupied { row: 1, col: 1 })
        );
        assert_eq!(session.snapshot().board, before.board);
    }

    #[test]
    fn test_out_of_range_move_rejected() {
        let mut session = session(Mark::X, Difficulty::Easy);
        assert_eq!(
            session.human_move(5, 0),
            Err(MoveError::OutOfRange { row: 5, col: 0 })
        );
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let mut session = session(Mark::X, Difficulty::Hard);
        // Hand the turn to the bot without letting it reply.
        session.state_mut().apply_move(0, 0).unwrap();
        assert_eq!(session.human_move(1, 1), Err(MoveError::WrongTurn));
    }

    #[test]
    fn test_no_moves_accepted_after_game_over() {
        let mut session = session(Mark::X, Difficulty::Hard);
        while !session.state().is_terminal() {
            let result = best_move(session.state().board(), Mark::X).unwrap();
            session
                .human_move(result.position.row, result.position.col)
                .unwrap();
        }
        assert_eq!(session.human_move(0, 0), Err(MoveError::GameAlreadyOver));
    }

    #[test]
    fn test_optimal_bot_never_loses_the_seeded_game() {
        let mut session = session(Mark::X, Difficulty::Hard);
        while !session.state().is_terminal() {
            let result = best_move(session.state().board(), Mark::X).unwrap();
            session
                .human_move(result.position.row, result.position.col)
                .unwrap();
        }
        let snapshot = session.snapshot();
        assert_ne!(snapshot.winner, Some('X'));
    }

    #[test]
    fn test_reset_replays_bot_opening_for_bot_as_x() {
        let mut session = session(Mark::O, Difficulty::Hard);
        let _ = session.human_move(0, 1);
        session.reset();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_player, 'O');
        assert_eq!(snapshot.available_moves.len(), 8);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_same_seed_replays_the_same_bot_game() {
        let play_seeded_game = |seed: u64| {
            let mut session =
                GameSession::new(Mark::O, Difficulty::Easy, SessionRng::new(seed)).unwrap();
            assert_eq!(session.seed(), seed);
            for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)] {
                if session.state().is_terminal() {
                    break;
                }
                let _ = session.human_move(row, col);
            }
            session.snapshot().board
        };
        assert_eq!(play_seeded_game(7), play_seeded_game(7));
    }

    #[test]
    fn test_snapshot_board_matches_moves() {
        let mut session = session(Mark::X, Difficulty::Easy);
        session.human_move(2, 0).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.board[2][0], 'X');
        let bot_cells = snapshot
            .board
            .iter()
            .flatten()
            .filter(|&&c| c == 'O')
            .count();
        assert_eq!(bot_cells, 1);
        assert_eq!(snapshot.available_moves.len(), 7);
    }
}
