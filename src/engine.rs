use crate::clock::Clock;
use crate::config::ExperimentConfig;
use crate::errors::TrackerError;
use crate::models::{StoredState, StreakState};
use crate::storage::Store;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{error, warn};

pub struct StreakEngine {
    config: ExperimentConfig,
    state: StreakState,
    store: Box<dyn Store>,
}

impl StreakEngine {
    // Never fails: an unreadable or corrupt stored blob takes the same path
    // as a first run, and the fresh state is persisted right away.
    pub fn initialize(config: ExperimentConfig, clock: &dyn Clock, store: Box<dyn Store>) -> Self {
        let loaded = store.load(&config.key).and_then(|stored| {
            let state = stored.into_state(config.total_days);
            if state.is_none() {
                warn!("stored state for {} is unusable, starting fresh", config.key);
            }
            state
        });

        match loaded {
            Some(state) => Self {
                config,
                state,
                store,
            },
            None => {
                let mut engine = Self {
                    state: StreakState::fresh(clock.today()),
                    config,
                    store,
                };
                engine.persist();
                engine
            }
        }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn start_date(&self) -> NaiveDate {
        self.state.start_date
    }

    pub fn completed(&self) -> &BTreeSet<u32> {
        &self.state.completed
    }

    pub fn missed(&self) -> &BTreeSet<u32> {
        &self.state.missed
    }

    pub fn notes(&self) -> &BTreeMap<u32, String> {
        &self.state.notes
    }

    // Day 1 is the start date. Clamped to [0, total_days]: a start date in
    // the future reads as 0, a long-finished experiment stays at total_days.
    pub fn current_day_number(&self, clock: &dyn Clock) -> u32 {
        let elapsed = (clock.today() - self.state.start_date).num_days() + 1;
        elapsed.clamp(0, i64::from(self.config.total_days)) as u32
    }

    pub fn current_streak(&self, clock: &dyn Clock) -> u32 {
        let mut streak = 0;
        let mut day = self.current_day_number(clock);
        while day >= 1 && self.state.completed.contains(&day) {
            streak += 1;
            day -= 1;
        }
        streak
    }

    pub fn longest_streak(&self) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        for day in 1..=self.config.total_days {
            if self.state.completed.contains(&day) {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }
        longest
    }

    pub fn percent_complete(&self) -> u32 {
        let completed = self.state.completed.len() as f64;
        ((completed / f64::from(self.config.total_days)) * 100.0).round() as u32
    }

    // Cycles unmarked -> completed -> missed -> unmarked. Future days are
    // rejected here, not just in the page.
    pub fn toggle_day(&mut self, day: u32, clock: &dyn Clock) -> Result<(), TrackerError> {
        let limit = self.current_day_number(clock);
        if day < 1 || day > limit {
            return Err(TrackerError::InvalidDay { day, limit });
        }

        if self.state.completed.remove(&day) {
            self.state.missed.insert(day);
        } else if !self.state.missed.remove(&day) {
            self.state.completed.insert(day);
        }

        self.persist();
        Ok(())
    }

    // A note that trims to nothing removes the entry rather than storing "".
    pub fn set_note(&mut self, day: u32, text: &str) -> Result<(), TrackerError> {
        if day < 1 || day > self.config.total_days {
            return Err(TrackerError::InvalidDay {
                day,
                limit: self.config.total_days,
            });
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.state.notes.remove(&day);
        } else {
            self.state.notes.insert(day, trimmed.to_string());
        }

        self.persist();
        Ok(())
    }

    pub fn reset(&mut self, clock: &dyn Clock) {
        if let Err(err) = self.store.clear(&self.config.key) {
            error!("failed to clear stored state for {}: {err}", self.config.key);
        }
        self.state = StreakState::fresh(clock.today());
        self.persist();
    }

    // Save failures are logged and swallowed: the in-memory state stays
    // authoritative for the session and the next successful save reconciles.
    fn persist(&mut self) {
        let stored = StoredState::from_state(&self.state);
        if let Err(err) = self.store.save(&self.config.key, &stored) {
            error!("failed to persist state for {}: {err}", self.config.key);
        }
    }
}
