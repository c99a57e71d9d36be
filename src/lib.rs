//! Interval Timer - A state-managed HTTP server driving workout/rest cycles
//!
//! This library provides the settings store, the countdown state machine that
//! moves a run through its workout and rest periods, and the HTTP surface and
//! background tasks that expose and drive it.

pub mod config;
pub mod error;
pub mod state;
pub mod engine;
pub mod validation;
pub mod display;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{TimerError, WakeLockError};
pub use state::{AppState, TimerStore};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
