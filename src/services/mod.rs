//! Platform service module
//!
//! This module wraps the operating-system resources the timer touches.

pub mod wake_lock;

// Re-export main types
pub use wake_lock::*;
