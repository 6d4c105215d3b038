//! Action executor.
//!
//! Runs one complete [`Command`] as host key sequences, then archives it as
//! the repeat-last source. The command is committed only after every key has
//! been issued; replay multiplication reads the archived repeat.

use super::Interpreter;
use crate::host::HostOutput;
use core_events::{KeyCode, ModMask, ctrl};
use core_keymap::{Action, Command, IndentDirection, Motion};
use core_state::ClipboardShape;
use tracing::debug;

impl<H: HostOutput> Interpreter<H> {
    pub(super) fn execute(&mut self, cmd: Command) {
        debug!(
            target: "actions.exec",
            action = ?cmd.action,
            motion = ?cmd.motion,
            repeat = cmd.repeat,
            shifted = cmd.shifted,
            mode = ?self.state.mode,
            "execute"
        );
        match cmd.action {
            Some(action) if action.copies() => self.copy_or_cut(&cmd, action),
            Some(Action::Paste) => self.paste(&cmd),
            Some(Action::Undo) => self.repeat_n_times(ctrl(KeyCode::Z), cmd.repeat),
            Some(Action::JoinLines) => self.repeat_with(cmd.repeat, |this| {
                this.tap(KeyCode::End);
                this.tap(KeyCode::Delete);
                this.tap(KeyCode::Space);
            }),
            Some(Action::Indent(direction)) => self.indent(&cmd, direction),
            Some(Action::Yank | Action::Delete | Action::Change) | None => {}
        }
        if cmd.action == Some(Action::Change) {
            self.enter_insert_mode();
        }
        self.pending.commit(cmd);
    }

    /// Editors that jump past the indent on the first Home need the second.
    fn line_start(&mut self) {
        self.tap(KeyCode::End);
        self.tap(KeyCode::Home);
        self.tap(KeyCode::Home);
    }

    /// Select `n` whole lines starting at the cursor line.
    fn select_lines(&mut self, n: u32, down: bool) {
        self.release_modifier(ModMask::SHIFT);
        if down {
            self.line_start();
        } else {
            self.tap(KeyCode::End);
        }
        let (step, anchor) = if down {
            (KeyCode::Down, KeyCode::End)
        } else {
            (KeyCode::Up, KeyCode::Home)
        };
        self.press(KeyCode::LeftShift.into());
        for _ in 1..n {
            self.tap(step);
        }
        self.tap(anchor);
        self.release(KeyCode::LeftShift.into());
    }

    fn copy_or_cut(&mut self, cmd: &Command, action: Action) {
        let cut = action.cuts();
        let clip = ctrl(if cut { KeyCode::X } else { KeyCode::C });

        if self.state.mode.is_visual() {
            self.release_modifier(ModMask::SHIFT);
            self.tap(clip);
            if !cut {
                self.tap(KeyCode::Left);
            }
            self.state.clipboard = ClipboardShape::Charwise;
            self.state.leave_visual();
            debug!(target: "actions.exec", cut, "visual_selection_taken");
            return;
        }

        let linewise = if cmd.shifted && cut {
            self.press(KeyCode::LeftShift.into());
            self.tap(KeyCode::End);
            self.release(KeyCode::LeftShift.into());
            false
        } else if let Some(motion) = cmd.motion.filter(|m| m.is_linewise()) {
            self.select_lines(cmd.repeat, motion == Motion::Down);
            true
        } else {
            self.press(KeyCode::LeftShift.into());
            if let Some(motion) = cmd.motion {
                self.trigger_motion(motion, cmd.repeat);
            }
            self.release(KeyCode::LeftShift.into());
            false
        };
        self.state.clipboard = if linewise {
            ClipboardShape::Linewise
        } else {
            ClipboardShape::Charwise
        };

        self.tap(clip);
        // Line selections stop before the newline; take it too.
        if cut && linewise {
            self.tap(KeyCode::Delete);
        }
        if !cut {
            self.tap(KeyCode::Left);
        }
    }

    fn paste(&mut self, cmd: &Command) {
        let linewise = self.state.clipboard == ClipboardShape::Linewise;
        if cmd.shifted {
            self.tap(KeyCode::Left);
        }
        if linewise {
            self.tap(KeyCode::End);
        }
        self.repeat_with(cmd.repeat, |this| {
            if linewise {
                this.tap(KeyCode::Enter);
            }
            this.tap(ctrl(KeyCode::V));
        });
        if linewise {
            self.tap(KeyCode::Home);
        }
    }

    fn indent(&mut self, cmd: &Command, direction: IndentDirection) {
        let key = match direction {
            IndentDirection::Increase => KeyCode::Space,
            IndentDirection::Decrease => KeyCode::Delete,
        };
        let size = self.opts.indent_size;
        let indent_line = |this: &mut Self| {
            for _ in 0..size {
                this.tap(key);
            }
        };

        self.line_start();
        indent_line(self);

        let Some(motion) = cmd.motion.filter(|m| m.is_linewise()) else {
            return;
        };
        if cmd.repeat == 0 {
            return;
        }
        let (forward, back) = if motion == Motion::Down {
            (KeyCode::Down, KeyCode::Up)
        } else {
            (KeyCode::Up, KeyCode::Down)
        };
        for _ in 0..cmd.repeat {
            self.tap(forward);
            if direction == IndentDirection::Increase {
                self.tap(KeyCode::Home);
            }
            indent_line(self);
        }
        for _ in 0..cmd.repeat {
            self.tap(back);
            self.tap(KeyCode::Home);
        }
    }
}
