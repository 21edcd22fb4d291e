//! # Verdant TUI
//!
//! A terminal dashboard companion for hydroponic smart gardens: colonies,
//! their sensors and plants, care tasks with XP rewards, alerts and the
//! nutrient refill subscription.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (Store + reducer over an immutable snapshot)
//! - Device Layer (Tokio) - simulated pairing handshake

pub mod app;
pub mod constants;
pub mod device;
pub mod messages;
pub mod models;
pub mod seed;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{reduce, Action, AppActor, AppState, Store, UiState};
pub use device::DeviceActor;
pub use messages::{DeviceCommand, DeviceEvent, RenderState, UiEvent};
pub use models::{Colony, FamilyMember, Notification, Plant, Subscription, Task};
pub use storage::{Prefs, PrefsStore};
