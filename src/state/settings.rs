//! User-configured timer settings

use serde::{Deserialize, Serialize};

use super::PeriodKind;

/// Durations and repetition count chosen by the user.
///
/// Values are trusted as-is; range checks live in [`crate::validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Length of a workout period in seconds
    pub workout_duration: u32,
    /// Length of a rest period in seconds
    pub rest_duration: u32,
    /// Number of workout periods in a run
    pub repetition_count: u32,
}

impl Settings {
    pub const DEFAULT_WORKOUT_SECONDS: u32 = 120;
    pub const DEFAULT_REST_SECONDS: u32 = 30;
    pub const DEFAULT_REPETITIONS: u32 = 8;

    /// Create settings with explicit values
    pub fn new(workout_duration: u32, rest_duration: u32, repetition_count: u32) -> Self {
        Self {
            workout_duration,
            rest_duration,
            repetition_count,
        }
    }

    /// Duration that governs a countdown in the given period
    pub fn duration_for(&self, period: PeriodKind) -> u32 {
        match period {
            PeriodKind::Workout => self.workout_duration,
            PeriodKind::Rest => self.rest_duration,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WORKOUT_SECONDS,
            Self::DEFAULT_REST_SECONDS,
            Self::DEFAULT_REPETITIONS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.workout_duration, 120);
        assert_eq!(settings.rest_duration, 30);
        assert_eq!(settings.repetition_count, 8);
    }

    #[test]
    fn test_duration_for() {
        let settings = Settings::new(45, 15, 3);
        assert_eq!(settings.duration_for(PeriodKind::Workout), 45);
        assert_eq!(settings.duration_for(PeriodKind::Rest), 15);
    }
}
