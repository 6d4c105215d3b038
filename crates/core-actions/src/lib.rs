//! core-actions: the modal interpreter.
//!
//! [`Interpreter`] consumes raw key events one at a time and drives a
//! [`HostOutput`] with the primitive key presses, releases and layer switches
//! that reproduce the vim command on the host's ordinary text editing keys.
//! Each event is processed to completion before the next is accepted; the
//! output stream preserves the exact order in which keys are issued.

mod dispatcher;
pub mod host;
pub mod key_translator;

pub use dispatcher::Interpreter;
pub use host::{HostOutput, OutputEvent, RecordingHost};

use core_config::{Config, InitialMode};
use core_events::KeyCode;
use core_state::Mode;

/// Interpreter tuning resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    pub initial_mode: Mode,
    /// Key that enters Normal from Insert and cancels pending input.
    pub normal_key: KeyCode,
    pub insert_layer: u8,
    pub normal_layer: Option<u8>,
    /// Spaces added or removed per indent step.
    pub indent_size: u8,
    /// Hold bare navigation keys down until the input key is released.
    pub hold_motions: bool,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Insert,
            normal_key: KeyCode::Escape,
            insert_layer: 0,
            normal_layer: None,
            indent_size: 2,
            hold_motions: true,
        }
    }
}

impl InterpreterOptions {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let file = &cfg.file;
        let initial_mode = match file.mode.initial {
            InitialMode::Insert => Mode::Insert,
            InitialMode::Normal => Mode::Normal,
        };
        Ok(Self {
            initial_mode,
            normal_key: cfg.normal_key()?,
            insert_layer: file.layers.insert,
            normal_layer: file.layers.normal,
            indent_size: file.indent.size,
            hold_motions: file.motions.hold,
        })
    }
}
