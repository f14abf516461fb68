//! Controller data exchanged through the polling calls.

use bitflags::bitflags;

bitflags! {
    /// Controller buttons, in the bit layout of the legacy pad word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const A = 0x8000;
        const B = 0x4000;
        const Z = 0x2000;
        const START = 0x1000;
        const U_JPAD = 0x0800;
        const D_JPAD = 0x0400;
        const L_JPAD = 0x0200;
        const R_JPAD = 0x0100;
        const L_TRIG = 0x0020;
        const R_TRIG = 0x0010;
        const U_CBUTTONS = 0x0008;
        const D_CBUTTONS = 0x0004;
        const L_CBUTTONS = 0x0002;
        const R_CBUTTONS = 0x0001;
    }
}

/// Controller type reported for a standard pad.
pub const CONT_TYPE_NORMAL: u16 = 0x0005;
/// Error code for a port with nothing plugged in.
pub const CONT_NO_RESPONSE_ERROR: u8 = 0x08;
/// Number of controller ports the polling calls address.
pub const MAX_PORTS: usize = 4;

/// One controller's state for one polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pad {
    pub button: Buttons,
    pub stick_x: i8,
    pub stick_y: i8,
    pub errno: u8,
}

impl Pad {
    pub fn clear(&mut self) {
        *self = Pad::default();
    }
}

/// Per-port result of [`ControllerRegistry::init`](crate::ControllerRegistry::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerStatus {
    pub kind: u16,
    pub status: u8,
    pub errno: u8,
}

/// Raw stick values inside this range read as centered.
const STICK_DEAD_ZONE: i8 = 8;
/// Subtracted from the raw value once outside the dead zone.
const STICK_OFFSET: f32 = 6.0;
/// Largest magnitude the adjusted stick can reach.
pub const STICK_MAX_MAGNITUDE: f32 = 64.0;

/// Game-side view of a controller, updated once per frame from a [`Pad`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    pub raw_stick_x: i8,
    pub raw_stick_y: i8,
    pub stick_x: f32,
    pub stick_y: f32,
    pub stick_mag: f32,
    /// Buttons held this frame.
    pub button_down: Buttons,
    /// Buttons that went down this frame.
    pub button_pressed: Buttons,
}

impl ControllerState {
    pub fn update(&mut self, pad: &Pad) {
        self.raw_stick_x = pad.stick_x;
        self.raw_stick_y = pad.stick_y;
        self.button_pressed = pad.button & (pad.button ^ self.button_down);
        self.button_down = pad.button;
        self.adjust_stick();
    }

    /// Apply the dead zone and clamp the stick to a circle of radius 64.
    fn adjust_stick(&mut self) {
        self.stick_x = adjust_axis(self.raw_stick_x);
        self.stick_y = adjust_axis(self.raw_stick_y);

        self.stick_mag = self.stick_x.hypot(self.stick_y);
        if self.stick_mag > STICK_MAX_MAGNITUDE {
            let scale = STICK_MAX_MAGNITUDE / self.stick_mag;
            self.stick_x *= scale;
            self.stick_y *= scale;
            self.stick_mag = STICK_MAX_MAGNITUDE;
        }
    }

    pub fn is_down(&self, buttons: Buttons) -> bool {
        self.button_down.contains(buttons)
    }

    pub fn was_pressed(&self, buttons: Buttons) -> bool {
        self.button_pressed.intersects(buttons)
    }
}

fn adjust_axis(raw: i8) -> f32 {
    if raw <= -STICK_DEAD_ZONE {
        raw as f32 + STICK_OFFSET
    } else if raw >= STICK_DEAD_ZONE {
        raw as f32 - STICK_OFFSET
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pad(button: Buttons, stick_x: i8, stick_y: i8) -> Pad {
        Pad {
            button,
            stick_x,
            stick_y,
            errno: 0,
        }
    }

    #[test]
    fn test_button_bits() {
        assert_eq!(Buttons::A.bits(), 0x8000);
        assert_eq!(Buttons::START.bits(), 0x1000);
        assert_eq!(Buttons::R_CBUTTONS.bits(), 0x0001);
        assert_eq!(Buttons::all().bits(), 0xFF3F);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(7, 0.0)]
    #[case(-7, 0.0)]
    #[case(8, 2.0)]
    #[case(-8, -2.0)]
    #[case(40, 34.0)]
    fn test_axis_dead_zone(#[case] raw: i8, #[case] expected: f32) {
        let mut state = ControllerState::default();
        state.update(&pad(Buttons::empty(), raw, 0));
        assert_eq!(state.stick_x, expected);
        assert_eq!(state.stick_y, 0.0);
    }

    #[test]
    fn test_stick_magnitude_clamped() {
        let mut state = ControllerState::default();
        state.update(&pad(Buttons::empty(), 127, 127));
        assert!((state.stick_mag - STICK_MAX_MAGNITUDE).abs() < 1.0e-4);
        assert!((state.stick_x - state.stick_y).abs() < 1.0e-4);
        assert!((state.stick_x.hypot(state.stick_y) - 64.0).abs() < 1.0e-3);

        state.update(&pad(Buttons::empty(), i8::MIN, 0));
        assert!((state.stick_x + 64.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_pressed_is_edge_triggered() {
        let mut state = ControllerState::default();
        state.update(&pad(Buttons::A, 0, 0));
        assert!(state.was_pressed(Buttons::A));
        assert!(state.is_down(Buttons::A));

        state.update(&pad(Buttons::A | Buttons::B, 0, 0));
        assert_eq!(state.button_pressed, Buttons::B);

        state.update(&pad(Buttons::B, 0, 0));
        assert!(state.button_pressed.is_empty());
        assert!(!state.is_down(Buttons::A));
    }

    #[test]
    fn test_pad_clear() {
        let mut p = pad(Buttons::Z, 10, -10);
        p.errno = CONT_NO_RESPONSE_ERROR;
        p.clear();
        assert_eq!(p, Pad::default());
    }
}
