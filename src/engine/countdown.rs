//! Engine-local countdown

use serde::{Deserialize, Serialize};

use crate::state::{PeriodKind, TimerSnapshot};

/// Seconds at or below which (but above zero) the display warns
pub const WARNING_THRESHOLD_SECONDS: u32 = 5;

/// True iff `remaining` is in the final few seconds of a period
pub fn is_warning(remaining: u32) -> bool {
    remaining > 0 && remaining <= WARNING_THRESHOLD_SECONDS
}

/// Published countdown for readers outside the ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownView {
    pub remaining_seconds: u32,
    pub warning: bool,
}

impl CountdownView {
    pub fn seeded(remaining_seconds: u32) -> Self {
        Self {
            remaining_seconds,
            warning: is_warning(remaining_seconds),
        }
    }
}

/// What a countdown was last seeded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SeedKey {
    period: PeriodKind,
    duration: u32,
    generation: u64,
}

impl SeedKey {
    fn of(snapshot: &TimerSnapshot) -> Self {
        Self {
            period: snapshot.run.period_kind,
            duration: snapshot.governing_duration(),
            generation: snapshot.run.reset_generation,
        }
    }
}

/// Remaining time in the current period.
///
/// Reseeds whenever the period, its configured duration or the reset
/// generation differs from what it was seeded from. Changing the duration of
/// the period not in effect leaves it alone.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_seconds: u32,
    seeded_from: SeedKey,
}

impl Countdown {
    /// Create a countdown seeded from `snapshot`
    pub fn new(snapshot: &TimerSnapshot) -> Self {
        let seeded_from = SeedKey::of(snapshot);
        Self {
            remaining_seconds: seeded_from.duration,
            seeded_from,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_warning(&self) -> bool {
        is_warning(self.remaining_seconds)
    }

    pub fn view(&self) -> CountdownView {
        CountdownView::seeded(self.remaining_seconds)
    }

    /// Reseed from `snapshot` if it governs a different countdown.
    /// Returns whether a reseed happened.
    pub fn sync(&mut self, snapshot: &TimerSnapshot) -> bool {
        let key = SeedKey::of(snapshot);
        if key == self.seeded_from {
            return false;
        }
        self.remaining_seconds = key.duration;
        self.seeded_from = key;
        true
    }

    /// Consume one second. Returns true when the period has run out, in
    /// which case the countdown sits at zero until the next reseed.
    pub(crate) fn decrement(&mut self) -> bool {
        if self.remaining_seconds <= 1 {
            self.remaining_seconds = 0;
            true
        } else {
            self.remaining_seconds -= 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Settings;

    fn snapshot(workout: u32, rest: u32, reps: u32) -> TimerSnapshot {
        TimerSnapshot {
            settings: Settings::new(workout, rest, reps),
            ..TimerSnapshot::default()
        }
    }

    #[test]
    fn test_warning_window() {
        assert!(!is_warning(0));
        for s in 1..=5 {
            assert!(is_warning(s), "{} should warn", s);
        }
        assert!(!is_warning(6));
        assert!(!is_warning(120));
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut cd = Countdown::new(&snapshot(3, 1, 1));
        assert!(!cd.decrement());
        assert_eq!(cd.remaining_seconds(), 2);
        assert!(!cd.decrement());
        assert!(cd.decrement());
        assert_eq!(cd.remaining_seconds(), 0);
        assert!(cd.decrement());
        assert_eq!(cd.remaining_seconds(), 0);
    }

    #[test]
    fn test_sync_reseeds_on_period_change() {
        let mut snap = snapshot(10, 4, 2);
        let mut cd = Countdown::new(&snap);
        cd.decrement();
        assert!(!cd.sync(&snap));
        assert_eq!(cd.remaining_seconds(), 9);

        snap.run.period_kind = PeriodKind::Rest;
        assert!(cd.sync(&snap));
        assert_eq!(cd.remaining_seconds(), 4);
    }

    #[test]
    fn test_sync_ignores_duration_of_other_period() {
        let mut snap = snapshot(10, 4, 2);
        snap.run.period_kind = PeriodKind::Rest;
        let mut cd = Countdown::new(&snap);
        cd.decrement();

        snap.settings.workout_duration = 99;
        assert!(!cd.sync(&snap));
        assert_eq!(cd.remaining_seconds(), 3);

        snap.settings.rest_duration = 7;
        assert!(cd.sync(&snap));
        assert_eq!(cd.remaining_seconds(), 7);
    }

    #[test]
    fn test_sync_reseeds_on_reset_generation() {
        let mut snap = snapshot(10, 4, 2);
        let mut cd = Countdown::new(&snap);
        cd.decrement();
        cd.decrement();

        snap.run.reset_generation += 1;
        assert!(cd.sync(&snap));
        assert_eq!(cd.remaining_seconds(), 10);
    }
}
