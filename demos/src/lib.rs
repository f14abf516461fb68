//! # Pinewood Engine Demos
//!
//! Demo programs showcasing Pinewood Engine subsystems.
//!
//! ## Available Demos
//!
//! - `overlay_replay`: steers a box with controller input (recorded,
//!   gamepad or keyboard) and flushes the debug overlay into a display list
//!   every frame, headless

pub mod config;
pub mod overlay;

pub use config::{ConfigError, DemoConfig};
pub use overlay::{DemoError, FrameReport, OverlayDemo, Player};

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
