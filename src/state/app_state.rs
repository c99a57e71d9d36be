//! Main application state management

use std::{sync::Arc, time::Instant};

use tokio::sync::watch;

use super::{Settings, TimerStore};
use crate::engine::CountdownView;

/// Server-level state: the timer session plus what the HTTP layer reports
#[derive(Debug)]
pub struct AppState {
    /// The one timer session this process drives
    pub store: Arc<TimerStore>,
    /// Latest countdown published by the ticker task
    pub countdown_tx: watch::Sender<CountdownView>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create a new AppState around a fresh store
    pub fn new(port: u16, host: String, settings: Settings) -> Self {
        let store = Arc::new(TimerStore::with_settings(settings));
        let (countdown_tx, _) = watch::channel(CountdownView::seeded(settings.workout_duration));

        Self {
            store,
            countdown_tx,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Publish the countdown as the ticker currently sees it
    pub fn publish_countdown(&self, view: CountdownView) {
        self.countdown_tx.send_replace(view);
    }

    /// Get the most recently published countdown
    pub fn countdown(&self) -> CountdownView {
        *self.countdown_tx.borrow()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
