//! Interval Timer - A state-managed HTTP server driving workout/rest cycles
//!
//! This is the main entry point for the interval-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};
use tracing::{error, info, warn};

use interval_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_inhibitor_available, DisabledWakeLock, InhibitorLock, WakeLock},
    tasks::{countdown_ticker_task, screen_wake_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    let settings = config.settings()?;

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, workout={}s, rest={}s, repetitions={}",
        config.host, config.port, settings.workout_duration, settings.rest_duration, settings.repetition_count
    );

    // Pick the wake lock; a missing inhibitor only costs the feature
    let wake_lock: Box<dyn WakeLock> = if config.no_wake_lock {
        info!("Screen wake lock disabled");
        Box::new(DisabledWakeLock::default())
    } else if let Err(e) = check_inhibitor_available().await {
        warn!("{}; running without a screen wake lock", e);
        Box::new(DisabledWakeLock::default())
    } else {
        Box::new(InhibitorLock::new())
    };

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), settings));

    // Start the countdown ticker and the screen wake background tasks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = tokio::spawn(countdown_ticker_task(Arc::clone(&state), shutdown_rx.clone()));
    let wake = tokio::spawn(screen_wake_task(
        Arc::clone(&state),
        wake_lock,
        config.wake_check_interval(),
        shutdown_rx,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start    - Start the run");
    info!("  POST /pause    - Pause the run");
    info!("  POST /resume   - Resume the run");
    info!("  POST /reset    - Stop and return to the first workout");
    info!("  POST /toggle   - Start or pause");
    info!("  PUT  /settings - Update workout, rest and repetitions");
    info!("  GET  /status   - Current period, repetition and countdown");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop the background tasks; the wake task releases the inhibitor first
    shutdown_tx.send_replace(true);
    if let Err(e) = ticker.await {
        error!("Countdown ticker task failed: {}", e);
    }
    if let Err(e) = wake.await {
        error!("Screen wake task failed: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
