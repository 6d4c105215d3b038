//! Key classification for Normal/Visual mode.
//!
//! Maps a decoded input key to the role it plays in the command grammar.
//! The classification is stateless: the shift latch only matters for the few
//! bindings whose meaning changes with it (`$`, `^`, `J`, `>`), and those are
//! resolved by the dispatcher when it applies the binding.

use core_events::KeyCode;
use core_keymap::{Action, Motion};

/// Insert-mode entry points (`i a o s` and their shifted forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    Insert,
    Append,
    OpenLine,
    Substitute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Dedicated vim shift; drives the latch on both edges.
    ShiftLatch,
    /// Configured normal-mode key: leave Visual, drop pending input.
    Cancel,
    Digit(u32),
    Motion(Motion),
    ToggleVisual,
    /// Range action (`y d c`) awaiting a motion or a double tap.
    Action(Action),
    /// `.`: repeat-last, or indent-increase under the latch.
    Dot,
    /// `,`: indent-decrease regardless of the latch.
    Comma,
    Undo,
    Paste,
    InsertEntry(InsertEntry),
}

/// Classify `key`; `None` means the key is unbound and passes through.
pub fn classify(key: KeyCode, normal_key: KeyCode) -> Option<Binding> {
    if key == normal_key {
        return Some(Binding::Cancel);
    }
    if let Some(d) = key.digit() {
        return Some(Binding::Digit(d));
    }
    let binding = match key {
        KeyCode::LeftShift | KeyCode::RightShift => Binding::ShiftLatch,
        KeyCode::H => Binding::Motion(Motion::Left),
        KeyCode::J => Binding::Motion(Motion::Down),
        KeyCode::K => Binding::Motion(Motion::Up),
        KeyCode::L => Binding::Motion(Motion::Right),
        KeyCode::W => Binding::Motion(Motion::WordForward),
        KeyCode::B => Binding::Motion(Motion::WordBackward),
        KeyCode::V => Binding::ToggleVisual,
        KeyCode::Y => Binding::Action(Action::Yank),
        KeyCode::D => Binding::Action(Action::Delete),
        KeyCode::C => Binding::Action(Action::Change),
        KeyCode::Dot => Binding::Dot,
        KeyCode::Comma => Binding::Comma,
        KeyCode::U => Binding::Undo,
        KeyCode::P => Binding::Paste,
        KeyCode::I => Binding::InsertEntry(InsertEntry::Insert),
        KeyCode::A => Binding::InsertEntry(InsertEntry::Append),
        KeyCode::O => Binding::InsertEntry(InsertEntry::OpenLine),
        KeyCode::S => Binding::InsertEntry(InsertEntry::Substitute),
        _ => return None,
    };
    Some(binding)
}

/// Digits typed under the latch that act as motions (`$`, `^`).
pub fn shifted_digit_motion(digit: u32) -> Option<Motion> {
    match digit {
        4 => Some(Motion::LineEnd),
        6 => Some(Motion::LineStart),
        _ => None,
    }
}
