//! Event dispatcher driving the interpreter.
//!
//! The dispatcher is split by concern:
//! * `motion` - primitive cursor keys and the repetition helpers
//! * `edit`   - the action executor (yank/delete/change, paste, undo, join, indent)
//! * `mode`   - Insert/Normal/Visual transitions and the insert jumpers
//!
//! `process_event` is the only entry point for key input. It classifies the
//! key, feeds the accumulator, and hands complete commands to the executor.
//! All output goes through the private `press`/`release`/`tap` helpers so the
//! modifier bookkeeping in [`ModeState`] always matches what the host saw.

use crate::InterpreterOptions;
use crate::host::HostOutput;
use crate::key_translator::{Binding, classify, shifted_digit_motion};
use core_events::{HostKey, KeyCode, KeyEvent, ModMask};
use core_keymap::{Action, Composed, IndentDirection, Motion, PendingContext};
use core_state::{Mode, ModeState};
use tracing::{debug, trace};

mod edit;
mod mode;
mod motion;

/// Modal interpreter for one keyboard connection.
#[derive(Debug)]
pub struct Interpreter<H: HostOutput> {
    host: H,
    state: ModeState,
    pending: PendingContext,
    opts: InterpreterOptions,
}

impl<H: HostOutput> Interpreter<H> {
    pub fn new(host: H, opts: InterpreterOptions) -> Self {
        Self {
            host,
            state: ModeState::new(opts.initial_mode),
            pending: PendingContext::new(),
            opts,
        }
    }

    /// Process one key edge. Returns `true` when the host should also deliver
    /// the original event (pass-through), `false` when it was consumed.
    pub fn process_event(&mut self, code: u16, pressed: bool) -> bool {
        let Ok(key) = KeyCode::try_from(code) else {
            trace!(target: "input.dispatch", code, pressed, "forward_unknown_code");
            return true;
        };
        trace!(target: "input.dispatch", %key, pressed, mode = ?self.state.mode, "event");

        // A held motion is released whatever happened since its press.
        if !pressed && let Some(output) = self.state.release_motion(key) {
            trace!(target: "input.dispatch", %key, %output, "held_motion_release");
            self.release(output);
            return false;
        }
        // Likewise a press the host received keeps its release there.
        if !pressed && self.state.take_forwarded(key) {
            trace!(target: "input.dispatch", %key, "forwarded_release");
            return true;
        }

        if !self.state.mode.is_modal() {
            if pressed && key == self.opts.normal_key {
                self.enter_normal_mode();
                return false;
            }
            if pressed {
                self.state.note_forwarded(key);
            }
            return true;
        }

        let Some(binding) = classify(key, self.opts.normal_key) else {
            debug!(target: "input.dispatch", %key, pressed, "forward_unbound");
            return true;
        };
        if binding == Binding::ShiftLatch {
            self.state.set_latch_key(key, pressed);
            trace!(target: "input.dispatch", %key, pressed, latched = self.state.shift_latch(), "shift_latch");
            return false;
        }
        if pressed {
            self.apply_binding(key, binding);
        }
        false
    }

    pub fn process(&mut self, event: KeyEvent) -> bool {
        self.process_event(event.code, event.pressed)
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    pub fn pending(&self) -> &PendingContext {
        &self.pending
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.opts
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    fn apply_binding(&mut self, key: KeyCode, binding: Binding) {
        let shifted = self.state.shift_latch();
        let visual = self.state.mode.is_visual();
        let composed = match binding {
            Binding::ShiftLatch => return,
            Binding::Cancel => {
                self.cancel();
                return;
            }
            Binding::ToggleVisual => {
                self.toggle_visual();
                return;
            }
            Binding::InsertEntry(entry) => {
                self.insert_entry(entry, shifted);
                return;
            }
            Binding::Digit(digit) => {
                match shifted.then(|| shifted_digit_motion(digit)).flatten() {
                    Some(motion) => self.pending.set_motion(motion, visual),
                    None => {
                        self.pending.accumulate_digit(digit);
                        Composed::None
                    }
                }
            }
            Binding::Motion(Motion::Down) if shifted => {
                self.pending.immediate(Action::JoinLines, shifted)
            }
            Binding::Motion(motion) => self.pending.set_motion(motion, visual),
            Binding::Action(action) => self.pending.set_action(action, shifted, visual),
            Binding::Dot if shifted => {
                self.pending
                    .set_action(Action::Indent(IndentDirection::Increase), false, visual)
            }
            Binding::Dot => self.pending.replay_previous(),
            Binding::Comma => {
                self.pending
                    .set_action(Action::Indent(IndentDirection::Decrease), false, visual)
            }
            Binding::Undo => self.pending.immediate(Action::Undo, shifted),
            Binding::Paste => self.pending.immediate(Action::Paste, shifted),
        };
        self.apply(key, composed);
    }

    fn apply(&mut self, source: KeyCode, composed: Composed) {
        match composed {
            Composed::None => {}
            Composed::Navigate { motion, count } => self.navigate(source, motion, count),
            Composed::Execute(cmd) => self.execute(cmd),
        }
    }

    fn press(&mut self, key: HostKey) {
        self.state.note_press(key);
        self.host.press(key);
    }

    fn release(&mut self, key: HostKey) {
        self.state.note_release(key);
        self.host.release(key);
    }

    fn tap(&mut self, key: impl Into<HostKey>) {
        self.host.tap(key.into());
    }

    /// Release a modifier only if the interpreter is holding it.
    fn release_modifier(&mut self, bit: ModMask) {
        if self.state.held_modifiers().contains(bit)
            && let Some(key) = bit.key()
        {
            self.release(key.into());
        }
    }
}
