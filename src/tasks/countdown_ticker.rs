//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    engine::{advance, Countdown, Transition},
    state::{AppState, TimerSnapshot},
};

/// Real time between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that owns the countdown and the single tick source.
///
/// Waits for store changes while idle. While the store says running, one
/// interval drives [`advance`]; the interval is dropped the moment running
/// turns false, so a stale tick source can never overlap a fresh one. Returns
/// once `shutdown` changes or its sender is dropped.
pub async fn countdown_ticker_task(state: Arc<AppState>, mut shutdown: watch::Receiver<bool>) {
    info!("Starting countdown ticker task");

    let mut state_rx = state.store.subscribe();
    let initial = *state_rx.borrow_and_update();
    let mut countdown = Countdown::new(&initial);
    state.publish_countdown(countdown.view());

    let mut current = initial;
    loop {
        if current.run.is_running {
            info!(
                "Timer running: {} {} of {}, {}s left",
                current.run.period_kind.label(),
                current.run.current_repetition,
                current.settings.repetition_count,
                countdown.remaining_seconds()
            );
            if run_tick_source(&state, &mut countdown, &mut state_rx, &mut shutdown).await
                == TickSourceEnd::Shutdown
            {
                break;
            }
        }

        // Wait for the next store change
        tokio::select! {
            Ok(()) = state_rx.changed() => {
                current = *state_rx.borrow_and_update();
                if countdown.sync(&current) {
                    debug!("Countdown reseeded to {}s while idle", countdown.remaining_seconds());
                    state.publish_countdown(countdown.view());
                }
            }

            _ = shutdown.changed() => break,
        }
    }

    info!("Countdown ticker stopped");
}

#[derive(Debug, PartialEq, Eq)]
enum TickSourceEnd {
    Stopped,
    Shutdown,
}

/// Tick once per second until the store stops running
async fn run_tick_source(
    state: &AppState,
    countdown: &mut Countdown,
    state_rx: &mut watch::Receiver<TimerSnapshot>,
    shutdown: &mut watch::Receiver<bool>,
) -> TickSourceEnd {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Tick - advance the run and apply any transition before the next tick
            _ = interval.tick() => {
                match advance(&state.store, countdown) {
                    Ok(Transition::None) => {}
                    Ok(transition) => debug!("Tick produced {:?}", transition),
                    Err(e) => error!("Failed to advance countdown: {}", e),
                }
                state.publish_countdown(countdown.view());

                match state.store.snapshot() {
                    Ok(snapshot) if snapshot.run.is_running => {}
                    Ok(_) => {
                        debug!("Run finished, releasing tick source");
                        return TickSourceEnd::Stopped;
                    }
                    Err(e) => {
                        error!("Failed to read timer state: {}", e);
                        return TickSourceEnd::Stopped;
                    }
                }
            }

            // Store change - reseed, and stop ticking if paused or reset
            Ok(()) = state_rx.changed() => {
                let snapshot = *state_rx.borrow_and_update();
                if countdown.sync(&snapshot) {
                    state.publish_countdown(countdown.view());
                }
                if !snapshot.run.is_running {
                    info!("Timer stopped, releasing tick source");
                    return TickSourceEnd::Stopped;
                }
            }

            _ = shutdown.changed() => return TickSourceEnd::Shutdown,
        }
    }
}
