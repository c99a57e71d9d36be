//! Countdown engine
//!
//! Pure state machine over store snapshots. The tick source lives in
//! [`crate::tasks`]; everything here is synchronous and deterministic.

pub mod countdown;
pub mod transition;

pub use countdown::{is_warning, Countdown, CountdownView, WARNING_THRESHOLD_SECONDS};
pub use transition::{advance, expire_period, expiry_transition, Transition};
