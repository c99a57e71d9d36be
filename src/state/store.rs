//! Settings and run-state store
//!
//! The single source of truth for configuration and run status. Every action
//! mutates one [`TimerSnapshot`] under a lock and publishes the result, so no
//! subscriber ever observes a half-applied change.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{RunState, Settings};
use crate::error::TimerError;

/// Everything the store holds, published as one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub settings: Settings,
    pub run: RunState,
}

impl TimerSnapshot {
    /// Configured duration for the period currently in effect
    pub fn governing_duration(&self) -> u32 {
        self.settings.duration_for(self.run.period_kind)
    }

    /// Check if the current repetition is the last one of the run
    pub fn on_final_repetition(&self) -> bool {
        self.run.current_repetition >= self.settings.repetition_count
    }
}

/// Owned store handle; share it through `Arc`
#[derive(Debug)]
pub struct TimerStore {
    snapshot: Mutex<TimerSnapshot>,
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    state_change_tx: watch::Sender<TimerSnapshot>,
}

impl TimerStore {
    /// Create a store with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a store with the given settings and a fresh run state
    pub fn with_settings(settings: Settings) -> Self {
        let initial = TimerSnapshot {
            settings,
            run: RunState::new(),
        };
        let (state_change_tx, _) = watch::channel(initial);

        Self {
            snapshot: Mutex::new(initial),
            last_action: Mutex::new(None),
            state_change_tx,
        }
    }

    /// Apply `updater` atomically, record the action and notify subscribers
    pub fn update_state<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, TimerError>
    where
        F: FnOnce(&mut TimerSnapshot),
    {
        self.update_state_with(action, updater).map(|(snapshot, ())| snapshot)
    }

    /// Like [`TimerStore::update_state`], but hands back whatever `updater`
    /// decided while it held the lock
    pub fn update_state_with<F, R>(&self, action: &str, updater: F) -> Result<(TimerSnapshot, R), TimerError>
    where
        F: FnOnce(&mut TimerSnapshot) -> R,
    {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|e| TimerError::lock("timer snapshot", e))?;

        let decided = updater(&mut *snapshot);
        let new_snapshot = *snapshot;

        // Publish while still holding the lock so subscribers see actions in order
        self.state_change_tx.send_replace(new_snapshot);
        drop(snapshot);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }

        debug!("Action {} applied: {:?}", action, new_snapshot.run);
        Ok((new_snapshot, decided))
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.state_change_tx.subscribe()
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.snapshot
            .lock()
            .map(|s| *s)
            .map_err(|e| TimerError::lock("timer snapshot", e))
    }

    /// Get last action information
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((name, at)) => (Some(name), Some(at)),
            None => (None, None),
        }
    }

    pub fn set_workout_duration(&self, seconds: u32) -> Result<TimerSnapshot, TimerError> {
        info!("Setting workout duration to {}s", seconds);
        self.update_state("set-workout-duration", |s| s.settings.workout_duration = seconds)
    }

    pub fn set_rest_duration(&self, seconds: u32) -> Result<TimerSnapshot, TimerError> {
        info!("Setting rest duration to {}s", seconds);
        self.update_state("set-rest-duration", |s| s.settings.rest_duration = seconds)
    }

    pub fn set_repetition_count(&self, count: u32) -> Result<TimerSnapshot, TimerError> {
        info!("Setting repetition count to {}", count);
        self.update_state("set-repetition-count", |s| s.settings.repetition_count = count)
    }

    /// Start ticking; harmless when already running
    pub fn start(&self) -> Result<TimerSnapshot, TimerError> {
        self.update_state("start", |s| s.run.is_running = true)
    }

    /// Stop ticking; the countdown keeps its remaining time
    pub fn pause(&self) -> Result<TimerSnapshot, TimerError> {
        self.update_state("pause", |s| s.run.is_running = false)
    }

    /// Same as [`TimerStore::start`]
    pub fn resume(&self) -> Result<TimerSnapshot, TimerError> {
        self.update_state("resume", |s| s.run.is_running = true)
    }

    /// Stop and return to the first workout, forcing the countdown to reseed
    pub fn reset(&self) -> Result<TimerSnapshot, TimerError> {
        self.update_state("reset", |s| s.run.reset())
    }

    /// Leave a rest period for the next workout
    pub fn next_repetition(&self) -> Result<TimerSnapshot, TimerError> {
        self.update_state("next-repetition", |s| s.run.next_repetition())
    }

    /// Leave a workout for a rest period
    pub fn enter_rest_period(&self) -> Result<TimerSnapshot, TimerError> {
        self.update_state("enter-rest-period", |s| s.run.enter_rest_period())
    }
}

impl Default for TimerStore {
    fn default() -> Self {
        Self::new()
    }
}
