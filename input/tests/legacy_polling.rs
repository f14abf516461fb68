//! The three polling calls driven the way a game loop drives them, with
//! the built-in backends behind them.

use pinewood_core::input::KeyCode;
use pinewood_input::{
    Buttons, ControllerRegistry, ControllerState, ControllerStatus, GamepadButtons,
    GamepadSnapshot, InputConfig, InputRecorder, Pad, CONNECTED_CONTROLLERS, MAX_PORTS,
};
use rstest::rstest;

fn poll(registry: &mut ControllerRegistry) -> Pad {
    let mut pads = [Pad::default(); MAX_PORTS];
    registry.start_read().expect("registry is initialized");
    registry.fetch_pads(&mut pads);
    pads[0]
}

fn config_with_recording(dir: &tempfile::TempDir, pads: &[Pad]) -> InputConfig {
    let path = dir.path().join("cont.m64");
    let mut recorder = InputRecorder::create(&path).unwrap();
    for pad in pads {
        recorder.record(pad).unwrap();
    }
    recorder.finish().unwrap();

    let mut config = InputConfig::default();
    config.recording.path = path;
    config
}

#[test]
fn missing_recording_leaves_other_backends() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = InputConfig::default();
    config.recording.path = dir.path().join("absent.m64");

    let (mut registry, handles) = ControllerRegistry::with_builtin_backends(&config);
    assert_eq!(registry.len(), 3);

    let mut status = [ControllerStatus::default(); MAX_PORTS];
    assert_eq!(registry.init(&mut status), CONNECTED_CONTROLLERS);
    assert_eq!(registry.len(), 2);

    handles.keyboard.unwrap().key_down(KeyCode::Space);
    assert_eq!(poll(&mut registry).button, Buttons::START);
}

#[test]
fn recording_merges_with_live_input_until_it_ends() {
    let dir = tempfile::tempdir().unwrap();
    let recorded = [
        Pad {
            button: Buttons::A,
            stick_x: 40,
            ..Pad::default()
        },
        Pad {
            button: Buttons::B,
            ..Pad::default()
        },
    ];
    let config = config_with_recording(&dir, &recorded);
    let (mut registry, handles) = ControllerRegistry::with_builtin_backends(&config);
    registry.init(&mut []);
    assert_eq!(registry.len(), 3);

    let keyboard = handles.keyboard.unwrap();
    keyboard.key_down(KeyCode::K);

    let pad = poll(&mut registry);
    assert_eq!(pad.button, Buttons::A | Buttons::Z);
    assert_eq!(pad.stick_x, 40);

    let pad = poll(&mut registry);
    assert_eq!(pad.button, Buttons::B | Buttons::Z);
    assert_eq!(pad.stick_x, 0);

    // Recording exhausted: only the keyboard remains.
    let pad = poll(&mut registry);
    assert_eq!(pad.button, Buttons::Z);
}

#[test]
fn gamepad_and_keyboard_share_port_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = InputConfig::default();
    config.recording.path = dir.path().join("absent.m64");
    let (mut registry, handles) = ControllerRegistry::with_builtin_backends(&config);
    registry.init(&mut []);

    handles.gamepad.unwrap().update(GamepadSnapshot {
        connected: true,
        buttons: GamepadButtons::SOUTH,
        left_x: 20_000,
        ..GamepadSnapshot::default()
    });
    handles.keyboard.unwrap().key_down(KeyCode::W);

    let pad = poll(&mut registry);
    assert_eq!(pad.button, Buttons::A);
    assert_eq!(pad.stick_x, 48);
    assert_eq!(pad.stick_y, 127);
}

#[rstest]
#[case(KeyCode::D, 64.0, 0.0)]
#[case(KeyCode::A, -64.0, 0.0)]
#[case(KeyCode::W, 0.0, 64.0)]
#[case(KeyCode::S, 0.0, -64.0)]
fn keyboard_stick_reaches_full_deflection(
    #[case] key: KeyCode,
    #[case] expected_x: f32,
    #[case] expected_y: f32,
) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = InputConfig::default();
    config.recording.path = dir.path().join("absent.m64");
    let (mut registry, handles) = ControllerRegistry::with_builtin_backends(&config);
    registry.init(&mut []);
    handles.keyboard.unwrap().key_down(key);

    let mut controller = ControllerState::default();
    controller.update(&poll(&mut registry));
    assert!((controller.stick_x - expected_x).abs() < 1.0e-4);
    assert!((controller.stick_y - expected_y).abs() < 1.0e-4);
    assert!((controller.stick_mag - 64.0).abs() < 1.0e-4);
}

#[test]
fn pressed_buttons_fire_once_per_press() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = InputConfig::default();
    config.recording.path = dir.path().join("absent.m64");
    let (mut registry, handles) = ControllerRegistry::with_builtin_backends(&config);
    registry.init(&mut []);
    let keyboard = handles.keyboard.unwrap();
    let mut controller = ControllerState::default();

    keyboard.key_down(KeyCode::L);
    controller.update(&poll(&mut registry));
    assert!(controller.was_pressed(Buttons::A));

    controller.update(&poll(&mut registry));
    assert!(!controller.was_pressed(Buttons::A));
    assert!(controller.is_down(Buttons::A));

    keyboard.key_up(KeyCode::L);
    controller.update(&poll(&mut registry));
    assert!(!controller.is_down(Buttons::A));
}

#[test]
fn reconfigure_rebinds_keyboard() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = InputConfig::default();
    config.recording.path = dir.path().join("absent.m64");
    let (mut registry, handles) = ControllerRegistry::with_builtin_backends(&config);
    registry.init(&mut []);

    config.keyboard.start = vec![KeyCode::Enter];
    registry.reconfigure(&config);

    let keyboard = handles.keyboard.unwrap();
    keyboard.key_down(KeyCode::Space);
    assert!(poll(&mut registry).button.is_empty());
    keyboard.key_down(KeyCode::Enter);
    assert_eq!(poll(&mut registry).button, Buttons::START);
    assert_eq!(registry.raw_key(), Some(KeyCode::Enter));
}

#[test]
fn polling_before_init_is_an_error() {
    let (mut registry, _handles) =
        ControllerRegistry::with_builtin_backends(&InputConfig::default());
    assert!(registry.start_read().is_err());
}
