//! # Pinewood Engine Core
//!
//! Core crate for Pinewood Engine basic utilities: math helpers, packed
//! colours, physical key codes and the frame-generation arena shared by the
//! per-frame subsystems.

pub mod arena;
pub mod color;
pub mod input;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core version. Call once at startup.
pub fn init() {
    log::info!("Pinewood Core v{} initialized", VERSION);
}
