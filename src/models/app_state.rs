use actix::Addr;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::session::GameSession;

/// Application state shared between connections
pub struct AppState {
    pub games: Mutex<HashMap<String, Addr<GameSession>>>,
    pub tick_interval: Duration,
}

impl AppState {
    pub fn new(tick_interval: Duration) -> Self {
        AppState {
            games: Mutex::new(HashMap::new()),
            tick_interval,
        }
    }

    fn games(&self) -> MutexGuard<'_, HashMap<String, Addr<GameSession>>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, game_id: &str, session: Addr<GameSession>) {
        self.games().insert(game_id.to_string(), session);
    }

    /// Looks up a live session. Sessions whose actor has stopped are dropped
    /// from the registry on the way.
    pub fn find(&self, game_id: &str) -> Option<Addr<GameSession>> {
        let mut games = self.games();
        let live = games.get(game_id).filter(|addr| addr.connected()).cloned();
        if live.is_none() {
            games.remove(game_id);
        }
        live
    }

    pub fn remove(&self, game_id: &str) {
        self.games().remove(game_id);
    }

    pub fn game_count(&self) -> usize {
        self.games().len()
    }
}
