//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_ticker;
pub mod screen_wake;

// Re-export main functions
pub use countdown_ticker::{countdown_ticker_task, TICK_PERIOD};
pub use screen_wake::screen_wake_task;
