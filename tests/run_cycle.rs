//! Full runs driven by the ticker task on a paused clock

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;

use interval_timer::{
    engine::CountdownView,
    state::{PeriodKind, Settings},
    tasks::countdown_ticker_task,
    validation::{apply_update, SettingValue, SettingsUpdate},
    AppState,
};

/// Keep the returned sender alive; dropping it stops the ticker
async fn running_app(settings: Settings) -> (Arc<AppState>, watch::Sender<bool>) {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), settings));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(countdown_ticker_task(Arc::clone(&state), shutdown_rx));
    tokio::task::yield_now().await;
    (state, shutdown_tx)
}

/// Sample the run once per second, offset half a second from the ticks
async fn record(state: &AppState, seconds: u32) -> Vec<(PeriodKind, u32, CountdownView)> {
    let mut samples = Vec::new();
    tokio::time::sleep(Duration::from_millis(500)).await;
    for _ in 0..seconds {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let snap = state.store.snapshot().unwrap();
        samples.push((snap.run.period_kind, snap.run.current_repetition, state.countdown()));
    }
    samples
}

#[tokio::test(start_paused = true)]
async fn test_three_rep_run_enters_two_rests() {
    let (state, _shutdown) = running_app(Settings::new(3, 2, 3)).await;
    state.store.start().unwrap();

    // 3 workouts of 3s and 2 rests of 2s
    let samples = record(&state, 13).await;
    let rest_entries = samples
        .windows(2)
        .filter(|w| w[0].0 == PeriodKind::Workout && w[1].0 == PeriodKind::Rest)
        .count();
    assert_eq!(rest_entries, 2);

    let max_rep = samples.iter().map(|s| s.1).max().unwrap();
    assert_eq!(max_rep, 3);

    let snap = state.store.snapshot().unwrap();
    assert!(!snap.run.is_running);
    assert_eq!(snap.run.period_kind, PeriodKind::Workout);
    assert_eq!(snap.run.current_repetition, 1);
    assert_eq!(state.countdown().remaining_seconds, 3);
}

#[tokio::test(start_paused = true)]
async fn test_warning_in_last_five_seconds() {
    let (state, _shutdown) = running_app(Settings::new(8, 1, 1)).await;
    state.store.start().unwrap();

    let samples = record(&state, 7).await;
    let remaining: Vec<u32> = samples.iter().map(|s| s.2.remaining_seconds).collect();
    let warnings: Vec<bool> = samples.iter().map(|s| s.2.warning).collect();
    assert_eq!(remaining, vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(warnings, vec![false, false, true, true, true, true, true]);
}

#[tokio::test(start_paused = true)]
async fn test_workout_edit_during_rest_waits_for_next_workout() {
    let (state, _shutdown) = running_app(Settings::new(2, 4, 2)).await;
    state.store.start().unwrap();

    // Into the rest period with 3s left
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(state.store.snapshot().unwrap().run.period_kind, PeriodKind::Rest);
    assert_eq!(state.countdown().remaining_seconds, 3);

    let update = SettingsUpdate {
        workout_duration: Some(SettingValue::Number(10)),
        ..SettingsUpdate::default()
    };
    assert!(apply_update(&state.store, &update).unwrap().is_empty());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(state.countdown().remaining_seconds, 3);

    tokio::time::sleep(Duration::from_secs(3)).await;
    let snap = state.store.snapshot().unwrap();
    assert_eq!(snap.run.period_kind, PeriodKind::Workout);
    assert_eq!(snap.run.current_repetition, 2);
    assert_eq!(state.countdown().remaining_seconds, 10);
}

#[tokio::test(start_paused = true)]
async fn test_reset_mid_run_stops_ticking() {
    let (state, _shutdown) = running_app(Settings::new(20, 5, 2)).await;
    state.store.start().unwrap();
    tokio::time::sleep(Duration::from_millis(4500)).await;
    assert_eq!(state.countdown().remaining_seconds, 16);

    state.store.reset().unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(state.countdown().remaining_seconds, 20);
    assert!(!state.store.snapshot().unwrap().run.is_running);
}
