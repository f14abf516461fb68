//! Platform gamepad support.
//!
//! The host owns the platform gamepad API and pushes a [`GamepadSnapshot`]
//! into a [`GamepadHandle`] whenever it polls the device. The
//! [`GamepadBackend`] maps the latest snapshot onto a pad.

use std::sync::Arc;

use bitflags::bitflags;
use parking_lot::Mutex;

use crate::backend::{merge_axis, BackendKind, ControllerBackend};
use crate::config::{GamepadConfig, InputConfig};
use crate::error::InputError;
use crate::pad::{Buttons, Pad};

bitflags! {
    /// Gamepad buttons by position, independent of vendor labels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GamepadButtons: u16 {
        const SOUTH = 1 << 0;
        const EAST = 1 << 1;
        const WEST = 1 << 2;
        const NORTH = 1 << 3;
        const BACK = 1 << 4;
        const START = 1 << 5;
        const LEFT_SHOULDER = 1 << 6;
        const RIGHT_SHOULDER = 1 << 7;
        const LEFT_STICK = 1 << 8;
        const RIGHT_STICK = 1 << 9;
        const DPAD_UP = 1 << 10;
        const DPAD_DOWN = 1 << 11;
        const DPAD_LEFT = 1 << 12;
        const DPAD_RIGHT = 1 << 13;
    }
}

/// Device state as reported by the platform. Axes span the full `i16`
/// range with +Y pointing down; triggers run from 0 to `i16::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GamepadSnapshot {
    pub connected: bool,
    pub buttons: GamepadButtons,
    pub left_x: i16,
    pub left_y: i16,
    pub right_x: i16,
    pub right_y: i16,
    pub left_trigger: i16,
    pub right_trigger: i16,
}

/// A rumble request waiting for the host to forward it to the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RumbleRequest {
    pub strength: f32,
    pub duration_ms: u32,
}

/// Triggers pressed further than this count as buttons.
const TRIGGER_THRESHOLD: i16 = 30 * 256;
/// Right stick deflection that presses a C button.
const C_STICK_THRESHOLD: i16 = 0x4000;
/// Raw axis units per pad stick unit.
const STICK_DIVISOR: i32 = 409;

const BUTTON_MAP: [(GamepadButtons, Buttons); 9] = [
    (GamepadButtons::SOUTH, Buttons::A),
    (GamepadButtons::WEST, Buttons::B),
    (GamepadButtons::START, Buttons::START),
    (GamepadButtons::LEFT_SHOULDER, Buttons::Z),
    (GamepadButtons::RIGHT_SHOULDER, Buttons::R_TRIG),
    (GamepadButtons::DPAD_UP, Buttons::U_JPAD),
    (GamepadButtons::DPAD_DOWN, Buttons::D_JPAD),
    (GamepadButtons::DPAD_LEFT, Buttons::L_JPAD),
    (GamepadButtons::DPAD_RIGHT, Buttons::R_JPAD),
];

#[derive(Default)]
struct GamepadState {
    snapshot: GamepadSnapshot,
    rumble: Option<RumbleRequest>,
}

/// Shared gamepad state. Cheap to clone.
#[derive(Clone, Default)]
pub struct GamepadHandle {
    state: Arc<Mutex<GamepadState>>,
}

impl GamepadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the device state with the latest poll.
    pub fn update(&self, snapshot: GamepadSnapshot) {
        self.state.lock().snapshot = snapshot;
    }

    /// Mark the device as unplugged.
    pub fn disconnect(&self) {
        self.state.lock().snapshot = GamepadSnapshot::default();
    }

    pub fn snapshot(&self) -> GamepadSnapshot {
        self.state.lock().snapshot
    }

    /// Take the pending rumble request, if any. An active rumble is
    /// stopped by a request with zero strength.
    pub fn take_rumble(&self) -> Option<RumbleRequest> {
        self.state.lock().rumble.take()
    }

    fn request_rumble(&self, request: RumbleRequest) {
        self.state.lock().rumble = Some(request);
    }
}

/// Map a snapshot onto a pad, applying the radial dead zone to the left
/// stick.
pub fn map_snapshot(snapshot: &GamepadSnapshot, deadzone: u16) -> Pad {
    let mut pad = Pad::default();
    if !snapshot.connected {
        return pad;
    }

    for (from, to) in BUTTON_MAP {
        if snapshot.buttons.contains(from) {
            pad.button |= to;
        }
    }

    if snapshot.left_trigger > TRIGGER_THRESHOLD {
        pad.button |= Buttons::Z;
    }
    if snapshot.right_trigger > TRIGGER_THRESHOLD {
        pad.button |= Buttons::R_TRIG;
    }

    if snapshot.right_x < -C_STICK_THRESHOLD {
        pad.button |= Buttons::L_CBUTTONS;
    }
    if snapshot.right_x > C_STICK_THRESHOLD {
        pad.button |= Buttons::R_CBUTTONS;
    }
    if snapshot.right_y < -C_STICK_THRESHOLD {
        pad.button |= Buttons::U_CBUTTONS;
    }
    if snapshot.right_y > C_STICK_THRESHOLD {
        pad.button |= Buttons::D_CBUTTONS;
    }

    let x = snapshot.left_x as i32;
    let y = snapshot.left_y as i32;
    let magnitude_sq = (x as i64).pow(2) + (y as i64).pow(2);
    if magnitude_sq > (deadzone as i64).pow(2) {
        pad.stick_x = (x / STICK_DIVISOR) as i8;
        pad.stick_y = (-y / STICK_DIVISOR) as i8;
    }
    pad
}

/// Controller backend reading a [`GamepadHandle`].
pub struct GamepadBackend {
    handle: GamepadHandle,
    config: GamepadConfig,
}

impl GamepadBackend {
    pub fn new(config: GamepadConfig) -> Self {
        Self::with_handle(GamepadHandle::new(), config)
    }

    pub fn with_handle(handle: GamepadHandle, config: GamepadConfig) -> Self {
        Self { handle, config }
    }

    pub fn handle(&self) -> GamepadHandle {
        self.handle.clone()
    }
}

impl ControllerBackend for GamepadBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::PlatformNative
    }

    fn name(&self) -> &str {
        "gamepad"
    }

    fn init(&mut self) -> Result<(), InputError> {
        if !self.handle.snapshot().connected {
            log::debug!("No gamepad connected yet");
        }
        Ok(())
    }

    fn read(&mut self, pad: &mut Pad) {
        let mapped = map_snapshot(&self.handle.snapshot(), self.config.deadzone);
        pad.button |= mapped.button;
        merge_axis(&mut pad.stick_x, mapped.stick_x);
        merge_axis(&mut pad.stick_y, mapped.stick_y);
    }

    fn rumble_play(&mut self, strength: f32, duration_ms: u32) {
        if self.config.rumble {
            self.handle.request_rumble(RumbleRequest {
                strength: strength.clamp(0.0, 1.0),
                duration_ms,
            });
        }
    }

    fn rumble_stop(&mut self) {
        if self.config.rumble {
            self.handle.request_rumble(RumbleRequest {
                strength: 0.0,
                duration_ms: 0,
            });
        }
    }

    fn reconfigure(&mut self, config: &InputConfig) {
        self.config = config.gamepad.clone();
    }

    fn shutdown(&mut self) {
        self.handle.disconnect();
    }
}
