//! Interpreter state owned per keyboard connection.
//!
//! `ModeState` holds everything the interpreter remembers between events
//! apart from the command accumulator: the current [`Mode`], the shift
//! latch, the shape of what was last put on the host clipboard, the output
//! keys the interpreter is itself holding down, and the input keys whose
//! press went to the host untouched. Transitions here are pure; the caller
//! emits the matching key effects.

use core_events::{HostKey, KeyCode, ModMask};
use smallvec::SmallVec;
use tracing::trace;

/// Editing mode. Visual is a sub-state of Normal, so "visual while inserting"
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Keystrokes pass through as text input.
    #[default]
    Insert,
    /// Keystrokes are interpreted as commands.
    Normal,
    /// Normal mode with an active host selection (Shift held).
    Visual,
}

impl Mode {
    /// Command interpretation is active (Normal or Visual).
    pub const fn is_modal(self) -> bool {
        matches!(self, Mode::Normal | Mode::Visual)
    }

    pub const fn is_visual(self) -> bool {
        matches!(self, Mode::Visual)
    }
}

/// How the last yank/delete selected its text; paste replays line-wise text
/// on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardShape {
    #[default]
    Charwise,
    Linewise,
}

/// A motion output held down on behalf of a physically held input key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldMotion {
    pub source: KeyCode,
    pub output: HostKey,
}

#[derive(Debug, Clone, Default)]
pub struct ModeState {
    pub mode: Mode,
    pub clipboard: ClipboardShape,
    /// Shift keys currently driving the "vim shift" latch.
    latch_keys: SmallVec<[KeyCode; 2]>,
    held_modifiers: ModMask,
    held_motions: SmallVec<[HeldMotion; 4]>,
    /// Input keys pressed through to the host and not yet released.
    forwarded: SmallVec<[KeyCode; 8]>,
}

impl ModeState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Leave Normal/Visual for Insert. Returns the modifiers the caller must
    /// release; they are no longer considered held afterwards.
    pub fn enter_insert(&mut self) -> ModMask {
        self.mode = Mode::Insert;
        self.latch_keys.clear();
        std::mem::take(&mut self.held_modifiers)
    }

    /// Enter Normal from Insert. An active Visual selection is kept.
    pub fn enter_normal(&mut self) {
        if self.mode == Mode::Insert {
            self.mode = Mode::Normal;
        }
    }

    /// Flip Visual. Returns `true` when Visual was entered.
    pub fn toggle_visual(&mut self) -> bool {
        self.mode = match self.mode {
            Mode::Visual => Mode::Normal,
            Mode::Normal | Mode::Insert => Mode::Visual,
        };
        self.mode.is_visual()
    }

    /// Drop Visual without touching Normal/Insert.
    pub fn leave_visual(&mut self) {
        if self.mode == Mode::Visual {
            self.mode = Mode::Normal;
        }
    }

    /// Dedicated "vim shift" state, independent of the host Shift. Held
    /// while any latch key is down.
    pub fn shift_latch(&self) -> bool {
        !self.latch_keys.is_empty()
    }

    pub fn set_latch_key(&mut self, key: KeyCode, pressed: bool) {
        self.latch_keys.retain(|k| *k != key);
        if pressed {
            self.latch_keys.push(key);
        }
    }

    pub fn held_modifiers(&self) -> ModMask {
        self.held_modifiers
    }

    /// Record an output press. Only bare modifier keys are tracked.
    pub fn note_press(&mut self, key: HostKey) {
        if key.mods.is_empty()
            && let Some(bit) = key.base.modifier()
        {
            self.held_modifiers.insert(bit);
            trace!(target: "state.held", modifier = ?bit, "modifier_held");
        }
    }

    pub fn note_release(&mut self, key: HostKey) {
        if key.mods.is_empty()
            && let Some(bit) = key.base.modifier()
        {
            self.held_modifiers.remove(bit);
            trace!(target: "state.held", modifier = ?bit, "modifier_released");
        }
    }

    pub fn hold_motion(&mut self, source: KeyCode, output: HostKey) {
        self.held_motions.retain(|held| held.source != source);
        self.held_motions.push(HeldMotion { source, output });
    }

    /// Forget the motion held for `source`, returning its output key.
    pub fn release_motion(&mut self, source: KeyCode) -> Option<HostKey> {
        let idx = self.held_motions.iter().position(|h| h.source == source)?;
        Some(self.held_motions.remove(idx).output)
    }

    pub fn held_motions(&self) -> &[HeldMotion] {
        &self.held_motions
    }

    /// Remember a press the host received unmodified, so its release goes
    /// to the host as well whatever the mode is by then.
    pub fn note_forwarded(&mut self, key: KeyCode) {
        if !self.forwarded.contains(&key) {
            self.forwarded.push(key);
        }
    }

    /// Forget a forwarded press. Returns `true` if `key` was one.
    pub fn take_forwarded(&mut self, key: KeyCode) -> bool {
        let Some(idx) = self.forwarded.iter().position(|k| *k == key) else {
            return false;
        };
        self.forwarded.remove(idx);
        true
    }
}
