//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    display::TimerDisplay,
    error::TimerError,
    state::{AppState, TimerSnapshot},
    validation::{apply_update, SettingsUpdate},
};
use super::responses::{ApiResponse, HealthResponse, SettingsResponse, StatusResponse};

fn respond(
    action: &str,
    result: Result<TimerSnapshot, TimerError>,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::from_snapshot(message.to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the run
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.store.start(), "Timer started")
}

/// Handle POST /pause - Pause the run, keeping the remaining time
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.store.pause(), "Timer paused")
}

/// Handle POST /resume - Resume a paused run
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("resume", state.store.resume(), "Timer resumed")
}

/// Handle POST /reset - Stop and return to the first workout
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.store.reset(), "Timer reset")
}

/// Handle POST /toggle - Start when stopped, pause when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let running = match state.store.snapshot() {
        Ok(s) => s.run.is_running,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if running {
        respond("toggle", state.store.pause(), "Timer paused")
    } else {
        respond("toggle", state.store.start(), "Timer started")
    }
}

/// Handle PUT /settings - Apply valid fields, report the rest
pub async fn settings_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<(StatusCode, Json<SettingsResponse>), StatusCode> {
    let rejected = match apply_update(&state.store, &update) {
        Ok(rejected) => rejected,
        Err(e) => {
            error!("Failed to apply settings: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let settings = match state.store.snapshot() {
        Ok(s) => s.settings,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let status = if rejected.is_empty() {
        info!("Settings updated: {:?}", settings);
        StatusCode::OK
    } else {
        warn!("Settings update rejected {} field(s)", rejected.len());
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((status, Json(SettingsResponse::new(settings, &rejected))))
}

/// Handle GET /status - Return run state, countdown and display
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.store.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let countdown = state.countdown();
    let (last_action, last_action_time) = state.store.last_action();

    Ok(Json(StatusResponse {
        snapshot,
        countdown,
        display: TimerDisplay::new(&snapshot, &countdown),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
