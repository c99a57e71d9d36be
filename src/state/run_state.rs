//! Live run state of the interval timer

use serde::{Deserialize, Serialize};

/// Which duration currently governs the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Workout,
    Rest,
}

impl PeriodKind {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            PeriodKind::Workout => "Workout",
            PeriodKind::Rest => "Rest",
        }
    }
}

/// Run status, reset to defaults by the `reset` action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub is_running: bool,
    pub period_kind: PeriodKind,
    /// 1-indexed
    pub current_repetition: u32,
    /// Bumped on every reset so the countdown reseeds even when nothing else moved
    pub reset_generation: u64,
}

impl RunState {
    /// Create a stopped run state at the first workout
    pub fn new() -> Self {
        Self {
            is_running: false,
            period_kind: PeriodKind::Workout,
            current_repetition: 1,
            reset_generation: 0,
        }
    }

    /// Stop and return to the first workout, bumping the reset generation
    pub fn reset(&mut self) {
        self.is_running = false;
        self.period_kind = PeriodKind::Workout;
        self.current_repetition = 1;
        self.reset_generation += 1;
    }

    /// Move from a rest period into the next workout
    pub fn next_repetition(&mut self) {
        self.current_repetition += 1;
        self.period_kind = PeriodKind::Workout;
    }

    /// Move from a workout into a rest period
    pub fn enter_rest_period(&mut self) {
        self.period_kind = PeriodKind::Rest;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
