use std::fmt;

use pinewood_core::input::KeyCode;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::pad::Pad;

/// Where a backend's input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Frames replayed from a recording file.
    RecordedPlayback,
    /// A physical gamepad reported by the host platform.
    PlatformNative,
    /// Keyboard keys mapped onto pad buttons and stick.
    KeyboardEmulated,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::RecordedPlayback => "recorded playback",
            BackendKind::PlatformNative => "platform native",
            BackendKind::KeyboardEmulated => "keyboard emulated",
        };
        f.write_str(name)
    }
}

/// A source of controller input.
///
/// Backends are polled in registration order. Each one merges its state
/// into the pad it is given, so several backends can drive the same port:
/// buttons are OR-ed in, and a backend only overwrites the stick when its
/// own stick is deflected.
///
/// Only [`kind`](Self::kind), [`name`](Self::name) and [`read`](Self::read)
/// are required. Backends without rumble, remapping or resources to release
/// keep the no-op defaults.
pub trait ControllerBackend: Send {
    fn kind(&self) -> BackendKind;

    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Prepare the backend. A backend that fails here is not polled.
    fn init(&mut self) -> Result<(), InputError> {
        Ok(())
    }

    /// Merge this backend's current state into `pad`. Must not block.
    fn read(&mut self, pad: &mut Pad);

    /// Last key pressed, for binding UIs. `None` if nothing was pressed or
    /// the backend has no keys.
    fn raw_key(&mut self) -> Option<KeyCode> {
        None
    }

    /// Start rumble at `strength` (0.0 to 1.0) for `duration_ms`.
    fn rumble_play(&mut self, _strength: f32, _duration_ms: u32) {}

    fn rumble_stop(&mut self) {}

    /// Apply changed bindings or tuning.
    fn reconfigure(&mut self, _config: &InputConfig) {}

    /// Release resources. Called once; the backend is not polled afterwards.
    fn shutdown(&mut self) {}
}

/// Merge a stick value into a pad axis unless the value is centered.
pub(crate) fn merge_axis(axis: &mut i8, value: i8) {
    if value != 0 {
        *axis = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl ControllerBackend for Silent {
        fn kind(&self) -> BackendKind {
            BackendKind::KeyboardEmulated
        }

        fn name(&self) -> &str {
            "silent"
        }

        fn read(&mut self, _pad: &mut Pad) {}
    }

    #[test]
    fn test_default_methods() {
        let mut backend = Silent;
        assert!(backend.init().is_ok());
        assert_eq!(backend.raw_key(), None);
        backend.rumble_play(1.0, 100);
        backend.rumble_stop();
        backend.reconfigure(&InputConfig::default());
        backend.shutdown();
    }

    #[test]
    fn test_merge_axis_keeps_existing_when_centered() {
        let mut axis = 42;
        merge_axis(&mut axis, 0);
        assert_eq!(axis, 42);
        merge_axis(&mut axis, -80);
        assert_eq!(axis, -80);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(BackendKind::RecordedPlayback.to_string(), "recorded playback");
    }
}
