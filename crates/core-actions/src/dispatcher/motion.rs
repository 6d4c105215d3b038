//! Motion resolution and repetition.
//!
//! Motions translate to the host's own navigation keys. Word motions are the
//! composed `Ctrl+Right`/`Ctrl+Left` code so the host editor decides where a
//! word ends.

use super::Interpreter;
use crate::host::HostOutput;
use core_events::{HostKey, KeyCode, ctrl};
use core_keymap::Motion;
use tracing::trace;

/// Primitive output key for a motion.
pub(crate) const fn primitive(motion: Motion) -> HostKey {
    match motion {
        Motion::Left => HostKey::plain(KeyCode::Left),
        Motion::Down => HostKey::plain(KeyCode::Down),
        Motion::Up => HostKey::plain(KeyCode::Up),
        Motion::Right => HostKey::plain(KeyCode::Right),
        Motion::WordForward => ctrl(KeyCode::Right),
        Motion::WordBackward => ctrl(KeyCode::Left),
        Motion::LineStart => HostKey::plain(KeyCode::Home),
        Motion::LineEnd => HostKey::plain(KeyCode::End),
    }
}

impl<H: HostOutput> Interpreter<H> {
    /// Run `f` `max(n, 1)` times.
    pub(super) fn repeat_with(&mut self, n: u32, mut f: impl FnMut(&mut Self)) {
        for _ in 0..n.max(1) {
            f(self);
        }
    }

    /// Tap `key` `max(n, 1)` times; a repeat of 0 and 1 are the same.
    pub(super) fn repeat_n_times(&mut self, key: impl Into<HostKey>, n: u32) {
        let key = key.into();
        self.repeat_with(n, |this| this.tap(key));
    }

    /// Tap `n - 1` times, then press and keep `key` down on behalf of `source`
    /// until its release event arrives.
    fn press_and_hold(&mut self, source: KeyCode, key: HostKey, n: u32) {
        for _ in 1..n.max(1) {
            self.tap(key);
        }
        self.press(key);
        self.state.hold_motion(source, key);
    }

    /// Bare navigation (no pending action, or inside Visual).
    pub(super) fn navigate(&mut self, source: KeyCode, motion: Motion, count: u32) {
        let key = primitive(motion);
        if let Some(stale) = self.state.release_motion(source) {
            self.release(stale);
        }
        trace!(target: "input.dispatch", ?motion, count, hold = self.opts.hold_motions, "navigate");
        if self.opts.hold_motions {
            self.press_and_hold(source, key, count);
        } else {
            self.repeat_n_times(key, count);
        }
    }

    /// Motion used as an action target; always taps.
    pub(super) fn trigger_motion(&mut self, motion: Motion, repeat: u32) {
        self.repeat_n_times(primitive(motion), repeat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InterpreterOptions;
    use crate::host::{OutputEvent, RecordingHost};
    use core_state::Mode;
    use pretty_assertions::assert_eq;

    fn interp() -> Interpreter<RecordingHost> {
        Interpreter::new(
            RecordingHost::new(),
            InterpreterOptions {
                initial_mode: Mode::Normal,
                ..InterpreterOptions::default()
            },
        )
    }

    #[test]
    fn primitives() {
        assert_eq!(primitive(Motion::WordForward).code(), 0x014F);
        assert_eq!(primitive(Motion::WordBackward).code(), 0x0150);
        assert_eq!(primitive(Motion::LineEnd), HostKey::plain(KeyCode::End));
        assert_eq!(primitive(Motion::LineStart), HostKey::plain(KeyCode::Home));
    }

    #[test]
    fn zero_and_one_repeat_tap_once() {
        for n in [0, 1] {
            let mut it = interp();
            it.repeat_n_times(KeyCode::Up, n);
            assert_eq!(it.host_mut().take().len(), 2);
        }
    }

    #[test]
    fn hold_taps_all_but_last() {
        let mut it = interp();
        it.press_and_hold(KeyCode::L, KeyCode::Right.into(), 3);
        let right = HostKey::plain(KeyCode::Right);
        assert_eq!(
            it.host_mut().take(),
            vec![
                OutputEvent::Press(right),
                OutputEvent::Release(right),
                OutputEvent::Press(right),
                OutputEvent::Release(right),
                OutputEvent::Press(right),
            ]
        );
        assert_eq!(it.state().held_motions().len(), 1);
    }

    #[test]
    fn renavigating_same_source_releases_stale_hold() {
        let mut it = interp();
        it.navigate(KeyCode::J, Motion::Down, 1);
        it.navigate(KeyCode::J, Motion::Down, 1);
        let down = HostKey::plain(KeyCode::Down);
        assert_eq!(
            it.host_mut().take(),
            vec![
                OutputEvent::Press(down),
                OutputEvent::Release(down),
                OutputEvent::Press(down),
            ]
        );
    }
}
