//! Screen-wake background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::{services::WakeLock, state::AppState};

/// Background task that holds the wake lock exactly while the timer runs.
///
/// Re-acquires on every `check_every` tick if the lock was lost while still
/// wanted. Lock failures are logged and otherwise ignored. When `shutdown`
/// changes or its sender is dropped, the lock is released before returning.
pub async fn screen_wake_task(
    state: Arc<AppState>,
    mut lock: Box<dyn WakeLock>,
    check_every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Starting screen wake task");

    let mut state_rx = state.store.subscribe();
    let mut wanted = state_rx.borrow_and_update().run.is_running;
    apply(lock.as_mut(), wanted);

    let mut check = interval(check_every);
    check.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            Ok(()) = state_rx.changed() => {
                let running = state_rx.borrow_and_update().run.is_running;
                if running != wanted {
                    wanted = running;
                    apply(lock.as_mut(), wanted);
                }
            }

            _ = check.tick() => {
                if wanted && !lock.is_held() {
                    info!("Wake lock lost while running, re-acquiring");
                    apply(lock.as_mut(), true);
                }
            }

            _ = shutdown.changed() => {
                info!("Releasing wake lock for shutdown");
                apply(lock.as_mut(), false);
                break;
            }
        }
    }

    info!("Screen wake task stopped");
}

fn apply(lock: &mut dyn WakeLock, wanted: bool) {
    let result = if wanted { lock.acquire() } else { lock.release() };
    if let Err(e) = result {
        warn!("Wake lock {} failed: {}", if wanted { "acquire" } else { "release" }, e);
    }
}
