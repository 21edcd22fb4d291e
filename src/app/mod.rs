//! App layer - central state management and command processing
//!
//! The App actor receives UI events and device events, dispatches actions
//! against the store, and emits render state.

pub mod actor;
pub mod commands;
pub mod state;
pub mod store;

pub use actor::AppActor;
pub use state::{AppState, UiState};
pub use store::{reduce, Action, Store};
