//! API response structures

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::TimerDisplay,
    engine::CountdownView,
    state::{Settings, TimerSnapshot},
    validation::ValidationError,
};

/// API response structure for run-control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, snapshot: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            snapshot,
        }
    }

    /// Create a response whose status reflects whether the timer is running
    pub fn from_snapshot(message: String, snapshot: TimerSnapshot) -> Self {
        let status = if snapshot.run.is_running { "running" } else { "stopped" };
        Self::new(status.to_string(), message, snapshot)
    }
}

/// Response to a settings edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub status: String,
    pub settings: Settings,
    /// Field name to message, for every rejected field
    pub errors: BTreeMap<String, String>,
}

impl SettingsResponse {
    pub fn new(settings: Settings, rejected: &[ValidationError]) -> Self {
        let errors: BTreeMap<String, String> = rejected
            .iter()
            .map(|e| (e.field.key().to_string(), e.message.to_string()))
            .collect();
        let status = if errors.is_empty() { "ok" } else { "invalid" };

        Self {
            status: status.to_string(),
            settings,
            errors,
        }
    }
}

/// Full status with countdown and presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub snapshot: TimerSnapshot,
    pub countdown: CountdownView,
    pub display: TimerDisplay,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
