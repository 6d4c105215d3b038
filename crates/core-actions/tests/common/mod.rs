#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Interpreter, InterpreterOptions, OutputEvent, RecordingHost};
use core_events::{HostKey, KeyCode};
use core_state::Mode;

/// Interpreter over a recording host, started the way a keyboard boots into
/// Normal: enter Insert, forget that output, then enter Normal.
pub struct Harness {
    pub it: Interpreter<RecordingHost>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(opts: InterpreterOptions) -> Self {
        let mut it = Interpreter::new(RecordingHost::new(), opts);
        it.enter_insert_mode();
        it.host_mut().clear();
        it.enter_normal_mode();
        Self { it }
    }

    pub fn press(&mut self, key: KeyCode) -> bool {
        self.it.process_event(key.code(), true)
    }

    pub fn release(&mut self, key: KeyCode) -> bool {
        self.it.process_event(key.code(), false)
    }

    pub fn tap(&mut self, key: KeyCode) {
        self.press(key);
        self.release(key);
    }

    /// Type a vim-style sequence. Each character is one key; uppercase letters
    /// are typed with the shift latch held (`Y` = latch + `y`).
    pub fn keys(&mut self, seq: &str) {
        for ch in seq.chars() {
            let key: KeyCode = ch.to_string().parse().expect("key name");
            if ch.is_ascii_uppercase() {
                self.press(KeyCode::LeftShift);
                self.tap(key);
                self.release(KeyCode::LeftShift);
            } else {
                self.tap(key);
            }
        }
    }

    pub fn take(&mut self) -> Vec<OutputEvent> {
        self.it.host_mut().take()
    }

    pub fn layers(&self) -> &[u8] {
        &self.it.host().layers
    }

    pub fn mode(&self) -> Mode {
        self.it.mode()
    }
}

/// Builder for an expected output stream.
#[derive(Debug, Default)]
pub struct Expect {
    events: Vec<OutputEvent>,
}

impl Expect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn p(mut self, key: impl Into<HostKey>) -> Self {
        self.events.push(OutputEvent::Press(key.into()));
        self
    }

    pub fn r(mut self, key: impl Into<HostKey>) -> Self {
        self.events.push(OutputEvent::Release(key.into()));
        self
    }

    pub fn t(self, key: impl Into<HostKey>) -> Self {
        let key = key.into();
        self.p(key).r(key)
    }

    pub fn t_n(mut self, key: impl Into<HostKey>, n: usize) -> Self {
        let key = key.into();
        for _ in 0..n {
            self = self.t(key);
        }
        self
    }

    /// End, Home, Home.
    pub fn line_start(self) -> Self {
        self.t(KeyCode::End).t(KeyCode::Home).t(KeyCode::Home)
    }

    pub fn build(self) -> Vec<OutputEvent> {
        self.events
    }
}
