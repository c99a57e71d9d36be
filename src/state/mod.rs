//! State management module
//!
//! Settings, live run state, the store that owns both, and the server-level
//! state wrapping it.

pub mod settings;
pub mod run_state;
pub mod store;
pub mod app_state;

// Re-export main types
pub use settings::Settings;
pub use run_state::{PeriodKind, RunState};
pub use store::{TimerSnapshot, TimerStore};
pub use app_state::AppState;
