use std::path::{Path, PathBuf};

use pinewood_core::input::KeyCode;
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::pad::Buttons;

/// Input configuration loaded from a TOML file.
///
/// ```toml
/// [keyboard]
/// a = ["L"]
/// stick_up = ["W", "ArrowUp"]
///
/// [gamepad]
/// deadzone = 6000
///
/// [recording]
/// path = "cont.m64"
/// ```
///
/// Missing sections and keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub keyboard: KeyBindings,
    pub gamepad: GamepadConfig,
    pub recording: RecordingConfig,
}

impl InputConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InputError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
            .map_err(|e| InputError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Load a config, falling back to defaults if the file is missing or
    /// invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded input config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default input config");
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Keys bound to each pad action. Any bound key triggers the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub a: Vec<KeyCode>,
    pub b: Vec<KeyCode>,
    pub z: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub l: Vec<KeyCode>,
    pub r: Vec<KeyCode>,
    pub c_up: Vec<KeyCode>,
    pub c_down: Vec<KeyCode>,
    pub c_left: Vec<KeyCode>,
    pub c_right: Vec<KeyCode>,
    pub stick_up: Vec<KeyCode>,
    pub stick_down: Vec<KeyCode>,
    pub stick_left: Vec<KeyCode>,
    pub stick_right: Vec<KeyCode>,
}

impl KeyBindings {
    /// Button actions paired with their keys.
    pub fn buttons(&self) -> [(Buttons, &[KeyCode]); 10] {
        [
            (Buttons::A, self.a.as_slice()),
            (Buttons::B, self.b.as_slice()),
            (Buttons::Z, self.z.as_slice()),
            (Buttons::START, self.start.as_slice()),
            (Buttons::L_TRIG, self.l.as_slice()),
            (Buttons::R_TRIG, self.r.as_slice()),
            (Buttons::U_CBUTTONS, self.c_up.as_slice()),
            (Buttons::D_CBUTTONS, self.c_down.as_slice()),
            (Buttons::L_CBUTTONS, self.c_left.as_slice()),
            (Buttons::R_CBUTTONS, self.c_right.as_slice()),
        ]
    }

    /// Whether `key` is bound to any action.
    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.buttons().iter().any(|(_, keys)| keys.contains(&key))
            || [
                &self.stick_up,
                &self.stick_down,
                &self.stick_left,
                &self.stick_right,
            ]
            .iter()
            .any(|keys| keys.contains(&key))
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            a: vec![KeyCode::L],
            b: vec![KeyCode::Comma],
            z: vec![KeyCode::K],
            start: vec![KeyCode::Space],
            l: vec![KeyCode::ShiftLeft],
            r: vec![KeyCode::ShiftRight],
            c_up: vec![KeyCode::ArrowUp],
            c_down: vec![KeyCode::ArrowDown],
            c_left: vec![KeyCode::ArrowLeft],
            c_right: vec![KeyCode::ArrowRight],
            stick_up: vec![KeyCode::W],
            stick_down: vec![KeyCode::S],
            stick_left: vec![KeyCode::A],
            stick_right: vec![KeyCode::D],
        }
    }
}

/// Left stick radial dead zone in raw axis units.
pub const DEFAULT_GAMEPAD_DEADZONE: u16 = 4960;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadConfig {
    pub deadzone: u16,
    pub rumble: bool,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_GAMEPAD_DEADZONE,
            rumble: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Recording played back by the recorded backend.
    pub path: PathBuf,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cont.m64"),
        }
    }
}
