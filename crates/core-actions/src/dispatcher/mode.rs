//! Mode transitions (Insert <-> Normal, Visual toggling) and the insert
//! jumpers `i a o s`.

use super::Interpreter;
use crate::host::HostOutput;
use crate::key_translator::InsertEntry;
use core_events::{KeyCode, ModMask};
use tracing::debug;

/// Release order for modifiers still held when leaving Normal.
const RELEASE_ORDER: [ModMask; 4] = [ModMask::SHIFT, ModMask::CTRL, ModMask::ALT, ModMask::GUI];

impl<H: HostOutput> Interpreter<H> {
    /// Leave Normal/Visual. Releases every modifier the interpreter holds so
    /// none stays stuck across the boundary, then switches to the insert
    /// layer. Idempotent apart from the layer switch.
    pub fn enter_insert_mode(&mut self) {
        let held = self.state.enter_insert();
        for bit in RELEASE_ORDER {
            if held.contains(bit)
                && let Some(key) = bit.key()
            {
                self.host.release(key.into());
            }
        }
        self.pending.reset_transient();
        self.host.activate_layer(self.opts.insert_layer);
        debug!(target: "actions.mode", released = ?held, layer = self.opts.insert_layer, "enter_insert");
    }

    /// Start interpreting commands. A Visual selection survives re-entry.
    pub fn enter_normal_mode(&mut self) {
        self.state.enter_normal();
        self.pending.reset_transient();
        if let Some(layer) = self.opts.normal_layer {
            self.host.activate_layer(layer);
        }
        debug!(target: "actions.mode", mode = ?self.state.mode, "enter_normal");
    }

    /// Visual holds Shift so host navigation extends the selection.
    pub fn toggle_visual(&mut self) {
        if self.state.toggle_visual() {
            self.press(KeyCode::LeftShift.into());
        } else {
            self.release_modifier(ModMask::SHIFT);
        }
        debug!(target: "actions.mode", visual = self.state.mode.is_visual(), "toggle_visual");
    }

    /// Normal-mode key inside Normal: drop the selection and pending input.
    pub(super) fn cancel(&mut self) {
        if self.state.mode.is_visual() {
            self.toggle_visual();
        }
        self.pending.reset_transient();
        debug!(target: "actions.mode", "cancel");
    }

    /// Insert jumpers are not archived for repeat-last.
    pub(super) fn insert_entry(&mut self, entry: InsertEntry, shifted: bool) {
        match (entry, shifted) {
            (InsertEntry::Insert, false) => {}
            (InsertEntry::Insert, true) => self.tap(KeyCode::Home),
            (InsertEntry::Append, false) => self.tap(KeyCode::Right),
            (InsertEntry::Append, true) => self.tap(KeyCode::End),
            (InsertEntry::OpenLine, false) => {
                self.tap(KeyCode::End);
                self.tap(KeyCode::Enter);
            }
            (InsertEntry::OpenLine, true) => {
                self.tap(KeyCode::Home);
                self.tap(KeyCode::Enter);
                self.tap(KeyCode::Up);
            }
            (InsertEntry::Substitute, _) => {
                let repeat = self.pending.current().repeat;
                self.repeat_n_times(KeyCode::Delete, repeat);
            }
        }
        debug!(target: "actions.mode", ?entry, shifted, "insert_entry");
        self.enter_insert_mode();
    }
}
