//! Presentation of the countdown for clients

use serde::{Deserialize, Serialize};

use crate::{engine::CountdownView, state::TimerSnapshot};

/// Format seconds as zero-padded "MM:SS"; minutes are not wrapped into hours
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Everything a client needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDisplay {
    /// Remaining time, "MM:SS"
    pub time: String,
    /// "Workout" or "Rest"
    pub label: String,
    /// "Rep X of N"
    pub repetition: String,
    pub warning: bool,
    /// "workout" / "rest" while running, empty otherwise
    pub period_class: String,
}

impl TimerDisplay {
    pub fn new(snapshot: &TimerSnapshot, countdown: &CountdownView) -> Self {
        let period_class = if snapshot.run.is_running {
            snapshot.run.period_kind.label().to_lowercase()
        } else {
            String::new()
        };

        Self {
            time: format_clock(countdown.remaining_seconds),
            label: snapshot.run.period_kind.label().to_string(),
            repetition: format!(
                "Rep {} of {}",
                snapshot.run.current_repetition, snapshot.settings.repetition_count
            ),
            warning: countdown.warning,
            period_class,
        }
    }
}
