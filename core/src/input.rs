//! Platform-agnostic input types.
//!
//! Provides a [`KeyCode`] enum that identifies physical keyboard keys
//! without depending on any windowing crate. Every key also carries its PC
//! set-1 scancode (extended keys offset by `0x100`). Binding files name keys
//! by their [`KeyCode::name`], or by scancode for keys without a name here.

use serde::{Deserialize, Serialize};

macro_rules! key_codes {
    ($($(#[$meta:meta])* $name:ident = $scancode:literal),* $(,)?) => {
        /// Physical keyboard key identifier.
        ///
        /// Names follow US QWERTY positions. Serialized by name, so binding
        /// files read `stick_up = ["W", "ArrowUp"]`. Deserialization also
        /// accepts a scancode, as in `stick_up = [0x11]`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[non_exhaustive]
        pub enum KeyCode {
            $($(#[$meta])* $name,)*
        }

        impl KeyCode {
            /// Every known key, in declaration order.
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$name,)*];

            /// PC set-1 scancode for this key.
            pub const fn scancode(self) -> u32 {
                match self {
                    $(KeyCode::$name => $scancode,)*
                }
            }

            /// Look a key up by scancode.
            pub fn from_scancode(scancode: u32) -> Option<KeyCode> {
                match scancode {
                    $($scancode => Some(KeyCode::$name),)*
                    _ => None,
                }
            }

            /// Look a key up by its stable name.
            pub fn from_name(name: &str) -> Option<KeyCode> {
                match name {
                    $(stringify!($name) => Some(KeyCode::$name),)*
                    _ => None,
                }
            }

            /// Stable key name, identical to the serialized form.
            pub const fn name(self) -> &'static str {
                match self {
                    $(KeyCode::$name => stringify!($name),)*
                }
            }
        }
    };
}

key_codes! {
    Escape = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    Digit8 = 0x09,
    Digit9 = 0x0A,
    Digit0 = 0x0B,
    Minus = 0x0C,
    Equal = 0x0D,
    Backspace = 0x0E,
    Tab = 0x0F,
    Q = 0x10,
    W = 0x11,
    E = 0x12,
    R = 0x13,
    T = 0x14,
    Y = 0x15,
    U = 0x16,
    I = 0x17,
    O = 0x18,
    P = 0x19,
    BracketLeft = 0x1A,
    BracketRight = 0x1B,
    Enter = 0x1C,
    ControlLeft = 0x1D,
    A = 0x1E,
    S = 0x1F,
    D = 0x20,
    F = 0x21,
    G = 0x22,
    H = 0x23,
    J = 0x24,
    K = 0x25,
    L = 0x26,
    Semicolon = 0x27,
    Quote = 0x28,
    Backquote = 0x29,
    ShiftLeft = 0x2A,
    Backslash = 0x2B,
    Z = 0x2C,
    X = 0x2D,
    C = 0x2E,
    V = 0x2F,
    B = 0x30,
    N = 0x31,
    M = 0x32,
    Comma = 0x33,
    Period = 0x34,
    Slash = 0x35,
    ShiftRight = 0x36,
    AltLeft = 0x38,
    Space = 0x39,
    F1 = 0x3B,
    F2 = 0x3C,
    F3 = 0x3D,
    F4 = 0x3E,
    F5 = 0x3F,
    F6 = 0x40,
    F7 = 0x41,
    F8 = 0x42,
    F9 = 0x43,
    F10 = 0x44,
    F11 = 0x57,
    F12 = 0x58,

    // Extended keys
    ControlRight = 0x11D,
    AltRight = 0x138,
    Home = 0x147,
    ArrowUp = 0x148,
    PageUp = 0x149,
    ArrowLeft = 0x14B,
    ArrowRight = 0x14D,
    End = 0x14F,
    ArrowDown = 0x150,
    PageDown = 0x151,
    Insert = 0x152,
    Delete = 0x153,
    SuperLeft = 0x15B,
    SuperRight = 0x15C,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Name(String),
    Scancode(u32),
}

impl<'de> Deserialize<'de> for KeyCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match KeyRepr::deserialize(deserializer)? {
            KeyRepr::Name(name) => KeyCode::from_name(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown key name `{name}`"))),
            KeyRepr::Scancode(code) => KeyCode::from_scancode(code)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown scancode {code:#x}"))),
        }
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
