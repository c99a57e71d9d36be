//! Period transitions driven by one tick at a time

use tracing::{debug, info};

use super::Countdown;
use crate::{
    error::TimerError,
    state::{PeriodKind, TimerSnapshot, TimerStore},
};

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Countdown moved, nothing was running, or the expiry went stale
    None,
    /// A non-final workout ended
    EnterRest,
    /// A rest ended and the next workout began
    NextRepetition,
    /// The final workout ended; the run was paused and reset
    Complete,
}

/// Transition to take when the current period of `snapshot` runs out
pub fn expiry_transition(snapshot: &TimerSnapshot) -> Transition {
    if snapshot.on_final_repetition() {
        // A rest only reaches this when the count was lowered mid-run
        return Transition::Complete;
    }
    match snapshot.run.period_kind {
        PeriodKind::Workout => Transition::EnterRest,
        PeriodKind::Rest => Transition::NextRepetition,
    }
}

/// End the period that ran out in `seen`, as one store action.
///
/// The decision is made on the locked snapshot. If the run was stopped, reset
/// or moved to another period after `seen` was taken, nothing changes and
/// [`Transition::None`] comes back.
pub fn expire_period(
    store: &TimerStore,
    seen: &TimerSnapshot,
) -> Result<(TimerSnapshot, Transition), TimerError> {
    store.update_state_with("expire-period", |s| {
        let same_period = s.run.is_running
            && s.run.period_kind == seen.run.period_kind
            && s.run.current_repetition == seen.run.current_repetition
            && s.run.reset_generation == seen.run.reset_generation;
        if !same_period {
            return Transition::None;
        }

        let transition = expiry_transition(s);
        match transition {
            Transition::EnterRest => s.run.enter_rest_period(),
            Transition::NextRepetition => s.run.next_repetition(),
            Transition::Complete => s.run.reset(),
            Transition::None => {}
        }
        transition
    })
}

/// Advance the run by one tick.
///
/// Reads the authoritative snapshot, reseeds the countdown first if the store
/// moved underneath it, then decrements. When the period runs out the
/// transition is applied through [`expire_period`] and the countdown is
/// reseeded before returning, so the next tick starts from the new period.
pub fn advance(store: &TimerStore, countdown: &mut Countdown) -> Result<Transition, TimerError> {
    let snapshot = store.snapshot()?;
    countdown.sync(&snapshot);

    if !snapshot.run.is_running {
        return Ok(Transition::None);
    }

    if !countdown.decrement() {
        return Ok(Transition::None);
    }

    let (after, transition) = expire_period(store, &snapshot)?;
    match transition {
        Transition::EnterRest => info!(
            "Workout {} of {} finished, resting",
            snapshot.run.current_repetition, after.settings.repetition_count
        ),
        Transition::NextRepetition => info!(
            "Rest finished, starting workout {} of {}",
            after.run.current_repetition, after.settings.repetition_count
        ),
        Transition::Complete => info!(
            "All {} repetitions complete, stopping",
            after.settings.repetition_count
        ),
        Transition::None => debug!("Period expiry superseded by {:?}", after.run),
    }

    countdown.sync(&after);
    debug!("Countdown reseeded to {}s", countdown.remaining_seconds());
    Ok(transition)
}
