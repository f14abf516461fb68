//! Keyboard emulation of a controller.
//!
//! The windowing layer forwards key events into a [`KeyboardHandle`]; the
//! [`KeyboardBackend`] turns the held keys into pad buttons and stick
//! deflection when polled.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use pinewood_core::input::KeyCode;

use crate::backend::{merge_axis, BackendKind, ControllerBackend};
use crate::config::{InputConfig, KeyBindings};
use crate::pad::{Buttons, Pad};

const STICK_POSITIVE: i8 = i8::MAX;
const STICK_NEGATIVE: i8 = i8::MIN;

struct KeyboardState {
    bindings: KeyBindings,
    held: HashSet<KeyCode>,
    last_pressed: Option<KeyCode>,
}

/// Shared keyboard state. Cheap to clone; every clone feeds the same
/// backend.
#[derive(Clone)]
pub struct KeyboardHandle {
    state: Arc<Mutex<KeyboardState>>,
}

impl KeyboardHandle {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            state: Arc::new(Mutex::new(KeyboardState {
                bindings,
                held: HashSet::new(),
                last_pressed: None,
            })),
        }
    }

    /// Record a key press. Returns `true` if the key drives the pad.
    pub fn key_down(&self, key: KeyCode) -> bool {
        let mut state = self.state.lock();
        state.last_pressed = Some(key);
        state.held.insert(key);
        state.bindings.is_bound(key)
    }

    /// Record a key release. Returns `true` if the key drives the pad.
    pub fn key_up(&self, key: KeyCode) -> bool {
        let mut state = self.state.lock();
        state.held.remove(&key);
        state.bindings.is_bound(key)
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn all_keys_up(&self) {
        self.state.lock().held.clear();
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.state.lock().held.contains(&key)
    }

    pub fn set_bindings(&self, bindings: KeyBindings) {
        self.state.lock().bindings = bindings;
    }

    /// Pad state produced by the held keys.
    pub fn pad(&self) -> Pad {
        let state = self.state.lock();
        let held = |keys: &[KeyCode]| keys.iter().any(|k| state.held.contains(k));
        let bindings = &state.bindings;

        let mut pad = Pad::default();
        for (button, keys) in bindings.buttons() {
            if held(keys) {
                pad.button |= button;
            }
        }

        if held(&bindings.stick_left) {
            pad.stick_x = STICK_NEGATIVE;
        }
        if held(&bindings.stick_right) {
            pad.stick_x = STICK_POSITIVE;
        }
        if held(&bindings.stick_down) {
            pad.stick_y = STICK_NEGATIVE;
        }
        if held(&bindings.stick_up) {
            pad.stick_y = STICK_POSITIVE;
        }
        pad
    }

    fn take_last_pressed(&self) -> Option<KeyCode> {
        self.state.lock().last_pressed.take()
    }
}

/// Controller backend reading a [`KeyboardHandle`].
pub struct KeyboardBackend {
    handle: KeyboardHandle,
}

impl KeyboardBackend {
    pub fn new(bindings: KeyBindings) -> Self {
        Self::with_handle(KeyboardHandle::new(bindings))
    }

    pub fn with_handle(handle: KeyboardHandle) -> Self {
        Self { handle }
    }

    /// Handle to feed key events into.
    pub fn handle(&self) -> KeyboardHandle {
        self.handle.clone()
    }
}

impl ControllerBackend for KeyboardBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::KeyboardEmulated
    }

    fn name(&self) -> &str {
        "keyboard"
    }

    fn read(&mut self, pad: &mut Pad) {
        let keys = self.handle.pad();
        pad.button |= keys.button;
        merge_axis(&mut pad.stick_x, keys.stick_x);
        merge_axis(&mut pad.stick_y, keys.stick_y);
    }

    /// Reports and clears the last pressed key.
    fn raw_key(&mut self) -> Option<KeyCode> {
        self.handle.take_last_pressed()
    }

    fn reconfigure(&mut self, config: &InputConfig) {
        self.handle.set_bindings(config.keyboard.clone());
    }

    fn shutdown(&mut self) {
        self.handle.all_keys_up();
    }
}

impl Default for KeyboardBackend {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
