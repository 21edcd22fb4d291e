//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Device layers.

pub mod device;
pub mod render;
pub mod ui_events;

pub use device::{DeviceCommand, DeviceEvent};
pub use render::RenderState;
pub use ui_events::UiEvent;
