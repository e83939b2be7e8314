use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::engine::{Difficulty, Mark, SessionRng};
use common::id_generator::generate_game_id;
use common::{GameId, log};
use tokio::sync::Mutex;

use crate::game_session::{GameSession, GameSnapshot};

/// Process-wide registry of live games, injected wherever sessions are
/// needed. Each session sits behind its own lock, so requests against
/// different games never serialize on each other.
#[derive(Clone, Default)]
pub struct GameRegistry {
    sessions: Arc<Mutex<HashMap<GameId, Arc<Mutex<GameSession>>>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create_game(
        &self,
        human_mark: Mark,
        difficulty: Difficulty,
    ) -> Result<(GameId, GameSnapshot), String> {
        let session = GameSession::new(human_mark, difficulty, SessionRng::from_random())?;
        let snapshot = session.snapshot();
        let seed = session.seed();

        let mut sessions = self.sessions.lock().await;
        let game_id = loop {
            let candidate = generate_game_id();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(game_id.clone(), Arc::new(Mutex::new(session)));

        log!(
            "Game session created: {} (human: {}, difficulty: {}, seed: {})",
            game_id,
            human_mark,
            difficulty,
            seed
        );
        Ok((game_id, snapshot))
    }

    pub async fn get(&self, game_id: &GameId) -> Option<Arc<Mutex<GameSession>>> {
        self.sessions.lock().await.get(game_id).cloned()
    }

    pub async fn remove(&self, game_id: &GameId) -> bool {
        let removed = self.sessions.lock().await.remove(game_id).is_some();
        if removed {
            log!("Game session removed: {}", game_id);
        }
        removed
    }

    /// Drops every session idle longer than `timeout` and returns their ids.
    pub async fn remove_inactive(&self, timeout: Duration) -> Vec<GameId> {
        let mut sessions = self.sessions.lock().await;

        let mut expired = Vec::new();
        for (game_id, session) in sessions.iter() {
            if session.lock().await.idle_for() >= timeout {
                expired.push(game_id.clone());
            }
        }

        for game_id in &expired {
            sessions.remove(game_id);
        }
        expired
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
