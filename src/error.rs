//! Error types shared across the crate

use thiserror::Error;

/// Errors surfaced by the timer store and its collaborators
#[derive(Debug, Error)]
pub enum TimerError {
    /// A mutex guarding shared state was poisoned by a panicking holder
    #[error("failed to lock {what}: {reason}")]
    Lock { what: &'static str, reason: String },
}

impl TimerError {
    pub(crate) fn lock<E: std::fmt::Display>(what: &'static str, err: E) -> Self {
        Self::Lock {
            what,
            reason: err.to_string(),
        }
    }
}

/// Failures of the platform screen-wake resource
#[derive(Debug, Error)]
pub enum WakeLockError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to release wake lock: {0}")]
    Release(#[source] std::io::Error),
}
