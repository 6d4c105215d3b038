//! Core key event types for vimkeys.
//!
//! The interpreter sits between the matrix scanner and the host keyboard
//! driver, so both sides speak the same vocabulary: USB HID usage codes as
//! QMK numbers them. Input events carry a raw `u16` because the scanner may
//! hand us anything (layer keys, composed codes, vendor codes); only codes that
//! decode to a [`KeyCode`] are interpreted, everything else is forwarded.
//!
//! Output codes may be composed: a [`ModMask`] in the high byte and the base
//! code in the low byte (`Ctrl+X == 0x011B`), matching QMK's `LCTL(kc)`.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use thiserror::Error;

/// Failure to map a raw code or a textual name onto the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyCodeError {
    #[error("keycode {0:#06x} is outside the interpreter vocabulary")]
    Unknown(u16),
    #[error("unknown key name `{0}`")]
    UnknownName(String),
}

macro_rules! keycodes {
    (@first $first:literal $(, $rest:literal)*) => {
        $first
    };
    ($($variant:ident = $code:literal => [$($name:literal),+]),+ $(,)?) => {
        /// Base (unmodified) keycodes understood by the interpreter.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum KeyCode {
            $($variant = $code),+
        }

        impl KeyCode {
            /// Every keycode in HID order.
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$variant),+];

            /// Canonical lowercase name (first alias), as accepted by `FromStr`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(KeyCode::$variant => keycodes!(@first $($name),+)),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($($name)|+ => Some(KeyCode::$variant),)+
                    _ => None,
                }
            }
        }

        impl TryFrom<u16> for KeyCode {
            type Error = KeyCodeError;

            fn try_from(code: u16) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(KeyCode::$variant),)+
                    other => Err(KeyCodeError::Unknown(other)),
                }
            }
        }
    };
}

keycodes! {
    A = 0x04 => ["a"],
    B = 0x05 => ["b"],
    C = 0x06 => ["c"],
    D = 0x07 => ["d"],
    E = 0x08 => ["e"],
    F = 0x09 => ["f"],
    G = 0x0A => ["g"],
    H = 0x0B => ["h"],
    I = 0x0C => ["i"],
    J = 0x0D => ["j"],
    K = 0x0E => ["k"],
    L = 0x0F => ["l"],
    M = 0x10 => ["m"],
    N = 0x11 => ["n"],
    O = 0x12 => ["o"],
    P = 0x13 => ["p"],
    Q = 0x14 => ["q"],
    R = 0x15 => ["r"],
    S = 0x16 => ["s"],
    T = 0x17 => ["t"],
    U = 0x18 => ["u"],
    V = 0x19 => ["v"],
    W = 0x1A => ["w"],
    X = 0x1B => ["x"],
    Y = 0x1C => ["y"],
    Z = 0x1D => ["z"],
    Num1 = 0x1E => ["1"],
    Num2 = 0x1F => ["2"],
    Num3 = 0x20 => ["3"],
    Num4 = 0x21 => ["4"],
    Num5 = 0x22 => ["5"],
    Num6 = 0x23 => ["6"],
    Num7 = 0x24 => ["7"],
    Num8 = 0x25 => ["8"],
    Num9 = 0x26 => ["9"],
    Num0 = 0x27 => ["0"],
    Enter = 0x28 => ["enter", "return", "ret"],
    Escape = 0x29 => ["esc", "escape"],
    Backspace = 0x2A => ["backspace", "bspc"],
    Tab = 0x2B => ["tab"],
    Space = 0x2C => ["space", "spc"],
    Comma = 0x36 => [",", "comma"],
    Dot = 0x37 => [".", "dot"],
    Home = 0x4A => ["home"],
    PageUp = 0x4B => ["pageup", "pgup"],
    Delete = 0x4C => ["delete", "del"],
    End = 0x4D => ["end"],
    PageDown = 0x4E => ["pagedown", "pgdn"],
    Right = 0x4F => ["right"],
    Left = 0x50 => ["left"],
    Down = 0x51 => ["down"],
    Up = 0x52 => ["up"],
    LeftCtrl = 0xE0 => ["ctrl", "lctrl"],
    LeftShift = 0xE1 => ["shift", "lshift"],
    LeftAlt = 0xE2 => ["alt", "lalt"],
    LeftGui = 0xE3 => ["gui", "lgui"],
    RightCtrl = 0xE4 => ["rctrl"],
    RightShift = 0xE5 => ["rshift"],
    RightAlt = 0xE6 => ["ralt"],
    RightGui = 0xE7 => ["rgui"],
}

impl KeyCode {
    /// Raw HID usage code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decimal value of a number-row key.
    pub const fn digit(self) -> Option<u32> {
        match self {
            KeyCode::Num0 => Some(0),
            KeyCode::Num1 => Some(1),
            KeyCode::Num2 => Some(2),
            KeyCode::Num3 => Some(3),
            KeyCode::Num4 => Some(4),
            KeyCode::Num5 => Some(5),
            KeyCode::Num6 => Some(6),
            KeyCode::Num7 => Some(7),
            KeyCode::Num8 => Some(8),
            KeyCode::Num9 => Some(9),
            _ => None,
        }
    }

    /// Modifier bit this key asserts when held, if it is a modifier key.
    pub const fn modifier(self) -> Option<ModMask> {
        match self {
            KeyCode::LeftCtrl | KeyCode::RightCtrl => Some(ModMask::CTRL),
            KeyCode::LeftShift | KeyCode::RightShift => Some(ModMask::SHIFT),
            KeyCode::LeftAlt | KeyCode::RightAlt => Some(ModMask::ALT),
            KeyCode::LeftGui | KeyCode::RightGui => Some(ModMask::GUI),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for KeyCode {
    type Err = KeyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        KeyCode::from_name(&lowered).ok_or_else(|| KeyCodeError::UnknownName(s.to_string()))
    }
}

bitflags::bitflags! {
    /// Modifier bits of a composed code; bit layout follows QMK's `QK_LCTL`/`QK_LSFT`/...
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ModMask: u8 {
        const CTRL  = 0x01;
        const SHIFT = 0x02;
        const ALT   = 0x04;
        const GUI   = 0x08;
    }
}

impl ModMask {
    /// Key asserted on the wire for a single modifier bit (left-hand variant).
    pub fn key(self) -> Option<KeyCode> {
        if self == ModMask::CTRL {
            Some(KeyCode::LeftCtrl)
        } else if self == ModMask::SHIFT {
            Some(KeyCode::LeftShift)
        } else if self == ModMask::ALT {
            Some(KeyCode::LeftAlt)
        } else if self == ModMask::GUI {
            Some(KeyCode::LeftGui)
        } else {
            None
        }
    }
}

/// A logical output key: base code plus the modifiers the host must see with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostKey {
    pub base: KeyCode,
    pub mods: ModMask,
}

impl HostKey {
    pub const fn new(base: KeyCode, mods: ModMask) -> Self {
        Self { base, mods }
    }

    pub const fn plain(base: KeyCode) -> Self {
        Self {
            base,
            mods: ModMask::empty(),
        }
    }

    /// Composed wire code (`mods << 8 | base`).
    pub const fn code(self) -> u16 {
        ((self.mods.bits() as u16) << 8) | self.base.code()
    }
}

/// `Ctrl+<base>` shorthand used throughout the executor (word jumps, clipboard, undo).
pub const fn ctrl(base: KeyCode) -> HostKey {
    HostKey::new(base, ModMask::CTRL)
}

impl From<KeyCode> for HostKey {
    fn from(base: KeyCode) -> Self {
        HostKey::plain(base)
    }
}

impl BitOr<KeyCode> for ModMask {
    type Output = HostKey;

    fn bitor(self, base: KeyCode) -> HostKey {
        HostKey::new(base, self)
    }
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, bit) in [
            ("Ctrl", ModMask::CTRL),
            ("Shift", ModMask::SHIFT),
            ("Alt", ModMask::ALT),
            ("Gui", ModMask::GUI),
        ] {
            if self.mods.contains(bit) {
                write!(f, "{label}+")?;
            }
        }
        write!(f, "{}", self.base)
    }
}

/// Raw event as delivered by the matrix scanner (already debounced).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u16,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn new(code: u16, pressed: bool) -> Self {
        Self { code, pressed }
    }

    pub const fn press(key: KeyCode) -> Self {
        Self::new(key.code(), true)
    }

    pub const fn release(key: KeyCode) -> Self {
        Self::new(key.code(), false)
    }

    /// Decode into the interpreter vocabulary.
    pub fn key(&self) -> Result<KeyCode, KeyCodeError> {
        KeyCode::try_from(self.code)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = if self.pressed { "press" } else { "release" };
        match self.key() {
            Ok(key) => write!(f, "{edge} {key}"),
            Err(_) => write!(f, "{edge} {:#06x}", self.code),
        }
    }
}
