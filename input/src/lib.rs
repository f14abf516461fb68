//! # Pinewood Input
//!
//! Controller polling for Pinewood Engine.
//!
//! Game code reads controllers through three calls on a
//! [`ControllerRegistry`]: `init` at startup, then `start_read` and
//! `fetch_pads` every frame. Behind those calls any number of
//! [`ControllerBackend`]s merge their state into the pad:
//!
//! - [`RecordedPlayback`] replays `.m64` recordings (feature `recorded-playback`)
//! - [`GamepadBackend`] maps a host-fed platform gamepad (feature `native-gamepad`)
//! - [`KeyboardBackend`] emulates a controller with the keyboard (feature `keyboard`)
//!
//! ```
//! use pinewood_input::{ControllerRegistry, ControllerState, InputConfig, Pad};
//!
//! let config = InputConfig::default();
//! let (mut registry, _handles) = ControllerRegistry::with_builtin_backends(&config);
//! registry.init(&mut []);
//!
//! let mut pads = [Pad::default()];
//! let mut controller = ControllerState::default();
//! registry.start_read().unwrap();
//! registry.fetch_pads(&mut pads);
//! controller.update(&pads[0]);
//! ```

mod backend;
mod config;
mod error;
mod pad;
mod registry;

#[cfg(feature = "native-gamepad")]
pub mod gamepad;
#[cfg(feature = "keyboard")]
pub mod keyboard;
#[cfg(feature = "recorded-playback")]
pub mod recorded;

pub use backend::{BackendKind, ControllerBackend};
pub use config::{
    GamepadConfig, InputConfig, KeyBindings, RecordingConfig, DEFAULT_GAMEPAD_DEADZONE,
};
pub use error::InputError;
pub use pad::{
    Buttons, ControllerState, ControllerStatus, Pad, CONT_NO_RESPONSE_ERROR, CONT_TYPE_NORMAL,
    MAX_PORTS, STICK_MAX_MAGNITUDE,
};
pub use registry::{ControllerRegistry, InputHandles, CONNECTED_CONTROLLERS};

#[cfg(feature = "native-gamepad")]
pub use gamepad::{GamepadBackend, GamepadButtons, GamepadHandle, GamepadSnapshot, RumbleRequest};
#[cfg(feature = "keyboard")]
pub use keyboard::{KeyboardBackend, KeyboardHandle};
#[cfg(feature = "recorded-playback")]
pub use recorded::{InputRecorder, RecordedPlayback};
