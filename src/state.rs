use crate::clock::Clock;
use crate::engine::StreakEngine;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<StreakEngine>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(engine: StreakEngine, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            clock,
        }
    }
}
