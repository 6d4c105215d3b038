//! Output seam towards the host keyboard driver.
//!
//! The interpreter never talks to USB directly: it asks a [`HostOutput`] to
//! assert or deassert keys and to switch layers. Firmware glue implements the
//! trait over its report buffer; tests and the CLI use [`RecordingHost`].

use core_events::HostKey;
use std::fmt;

pub trait HostOutput {
    /// Assert a (possibly composed) key.
    fn press(&mut self, key: HostKey);
    /// Deassert a key previously pressed.
    fn release(&mut self, key: HostKey);
    /// Press then immediately release.
    fn tap(&mut self, key: HostKey) {
        self.press(key);
        self.release(key);
    }
    /// One-shot layer switch (fire and forget).
    fn activate_layer(&mut self, layer: u8);
}

impl<H: HostOutput + ?Sized> HostOutput for &mut H {
    fn press(&mut self, key: HostKey) {
        (**self).press(key);
    }
    fn release(&mut self, key: HostKey) {
        (**self).release(key);
    }
    fn tap(&mut self, key: HostKey) {
        (**self).tap(key);
    }
    fn activate_layer(&mut self, layer: u8) {
        (**self).activate_layer(layer);
    }
}

/// One primitive key call observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    Press(HostKey),
    Release(HostKey),
}

impl fmt::Display for OutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputEvent::Press(key) => write!(f, "press {key}"),
            OutputEvent::Release(key) => write!(f, "release {key}"),
        }
    }
}

/// Host that records key calls in FIFO order and layer switches separately.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub keys: Vec<OutputEvent>,
    pub layers: Vec<u8>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded key calls.
    pub fn take(&mut self) -> Vec<OutputEvent> {
        std::mem::take(&mut self.keys)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.layers.clear();
    }
}

impl HostOutput for RecordingHost {
    fn press(&mut self, key: HostKey) {
        self.keys.push(OutputEvent::Press(key));
    }

    fn release(&mut self, key: HostKey) {
        self.keys.push(OutputEvent::Release(key));
    }

    fn activate_layer(&mut self, layer: u8) {
        self.layers.push(layer);
    }
}
