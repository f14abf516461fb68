use pinewood_core::input::KeyCode;

use crate::backend::{BackendKind, ControllerBackend};
use crate::config::InputConfig;
use crate::error::InputError;
use crate::pad::{ControllerStatus, Pad, CONT_NO_RESPONSE_ERROR, CONT_TYPE_NORMAL};

#[cfg(feature = "native-gamepad")]
use crate::gamepad::{GamepadBackend, GamepadHandle};
#[cfg(feature = "keyboard")]
use crate::keyboard::{KeyboardBackend, KeyboardHandle};
#[cfg(feature = "recorded-playback")]
use crate::recorded::RecordedPlayback;

/// Bit mask of connected controllers returned by [`ControllerRegistry::init`].
pub const CONNECTED_CONTROLLERS: u8 = 0b1;

/// Handles the host uses to feed the built-in backends.
#[derive(Clone, Default)]
pub struct InputHandles {
    #[cfg(feature = "keyboard")]
    pub keyboard: Option<KeyboardHandle>,
    #[cfg(feature = "native-gamepad")]
    pub gamepad: Option<GamepadHandle>,
}

/// The set of controller backends behind the polling calls.
///
/// The game drives it with three calls per frame, in the legacy order:
/// [`init`](Self::init) once at startup, then [`start_read`](Self::start_read)
/// and [`fetch_pads`](Self::fetch_pads) every frame. All backends feed
/// controller port 0.
pub struct ControllerRegistry {
    backends: Vec<Box<dyn ControllerBackend>>,
    initialized: bool,
}

impl ControllerRegistry {
    /// Create a registry with no backends.
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
            initialized: false,
        }
    }

    /// Create a registry with every backend compiled into this build, in
    /// the order recorded playback, native gamepad, keyboard.
    #[cfg_attr(
        not(any(
            feature = "recorded-playback",
            feature = "native-gamepad",
            feature = "keyboard"
        )),
        allow(unused_mut, unused_variables)
    )]
    pub fn with_builtin_backends(config: &InputConfig) -> (Self, InputHandles) {
        let mut registry = Self::new();
        let mut handles = InputHandles::default();

        #[cfg(feature = "recorded-playback")]
        registry.register(Box::new(RecordedPlayback::from_path(
            config.recording.path.clone(),
        )));

        #[cfg(feature = "native-gamepad")]
        {
            let backend = GamepadBackend::new(config.gamepad.clone());
            handles.gamepad = Some(backend.handle());
            registry.register(Box::new(backend));
        }

        #[cfg(feature = "keyboard")]
        {
            let backend = KeyboardBackend::new(config.keyboard.clone());
            handles.keyboard = Some(backend.handle());
            registry.register(Box::new(backend));
        }

        (registry, handles)
    }

    /// Add a backend. It is polled after those already registered.
    ///
    /// Backends registered after [`init`](Self::init) are initialized
    /// immediately.
    pub fn register(&mut self, mut backend: Box<dyn ControllerBackend>) {
        if self.initialized {
            if let Err(err) = backend.init() {
                log_init_failure(&*backend, &err);
                return;
            }
        }
        log::debug!(
            "Registered controller backend '{}' ({})",
            backend.name(),
            backend.kind()
        );
        self.backends.push(backend);
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Registered backends as `(kind, name)`, in polling order.
    pub fn backends(&self) -> impl Iterator<Item = (BackendKind, &str)> {
        self.backends.iter().map(|b| (b.kind(), b.name()))
    }

    /// Initialize every backend and report port status.
    ///
    /// Backends that fail to initialize are logged and removed. Port 0 is
    /// always reported as a standard controller; every other port in
    /// `status` reports no response. Returns the connected controller bit
    /// mask. Calling again only refreshes `status`.
    pub fn init(&mut self, status: &mut [ControllerStatus]) -> u8 {
        if !self.initialized {
            self.backends.retain_mut(|backend| match backend.init() {
                Ok(()) => true,
                Err(err) => {
                    log_init_failure(&**backend, &err);
                    false
                }
            });
            self.initialized = true;
            log::info!(
                "Controllers initialized with {} backend(s): {}",
                self.backends.len(),
                self.backends
                    .iter()
                    .map(|b| b.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        for (port, entry) in status.iter_mut().enumerate() {
            *entry = if port == 0 {
                ControllerStatus {
                    kind: CONT_TYPE_NORMAL,
                    status: 0,
                    errno: 0,
                }
            } else {
                ControllerStatus {
                    kind: 0,
                    status: 0,
                    errno: CONT_NO_RESPONSE_ERROR,
                }
            };
        }
        CONNECTED_CONTROLLERS
    }

    /// Begin a polling cycle.
    pub fn start_read(&mut self) -> Result<(), InputError> {
        if !self.initialized {
            return Err(InputError::NotInitialized);
        }
        Ok(())
    }

    /// Fill `pads` with this cycle's controller state.
    ///
    /// Port 0 is cleared and then every backend merges into it in order.
    /// Other ports report no response. Never blocks.
    pub fn fetch_pads(&mut self, pads: &mut [Pad]) {
        let Some((first, rest)) = pads.split_first_mut() else {
            return;
        };
        first.clear();
        for pad in rest {
            *pad = Pad {
                errno: CONT_NO_RESPONSE_ERROR,
                ..Pad::default()
            };
        }
        if !self.initialized {
            log::trace!("fetch_pads before init; reporting an idle controller");
            return;
        }
        for backend in &mut self.backends {
            backend.read(first);
        }
    }

    /// Last key pressed on the first backend that has one.
    pub fn raw_key(&mut self) -> Option<KeyCode> {
        self.backends.iter_mut().find_map(|b| b.raw_key())
    }

    pub fn rumble_play(&mut self, strength: f32, duration_ms: u32) {
        for backend in &mut self.backends {
            backend.rumble_play(strength, duration_ms);
        }
    }

    pub fn rumble_stop(&mut self) {
        for backend in &mut self.backends {
            backend.rumble_stop();
        }
    }

    /// Pass changed settings to every backend.
    pub fn reconfigure(&mut self, config: &InputConfig) {
        for backend in &mut self.backends {
            backend.reconfigure(config);
        }
    }

    /// Shut down and drop every backend.
    pub fn shutdown(&mut self) {
        for mut backend in self.backends.drain(..) {
            backend.shutdown();
        }
        if self.initialized {
            log::info!("Controllers shut down");
        }
        self.initialized = false;
    }
}

fn log_init_failure(backend: &dyn ControllerBackend, err: &InputError) {
    log::warn!(
        "Controller backend '{}' ({}) failed to initialize: {err}; disabled",
        backend.name(),
        backend.kind()
    );
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ControllerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
