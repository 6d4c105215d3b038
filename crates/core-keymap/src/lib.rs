//! core-keymap: command accumulation for the modal interpreter.
//!
//! A [`PendingContext`] collects the syntactic pieces of one editing command
//! (repeat digits, an action, a motion) and decides when the command is
//! complete. It never emits keys itself: each feed returns a [`Composed`]
//! outcome and the caller performs the side effects, then calls
//! [`PendingContext::commit`] so the executed command becomes the replay
//! source for `.`.
//!
//! Ordering matters: the current command stays populated while the caller
//! executes it and is only reset by `commit`. Replay multiplication reads the
//! archived repeat, so resetting early would replay the wrong count.

use tracing::debug;

/// Counts are clamped here; further digits are absorbed.
pub const MAX_REPEAT: u32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndentDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Yank,
    Delete,
    Change,
    Paste,
    Undo,
    Indent(IndentDirection),
    JoinLines,
}

impl Action {
    /// Operates on a selection that ends up on the host clipboard.
    pub const fn copies(self) -> bool {
        matches!(self, Action::Yank | Action::Delete | Action::Change)
    }

    /// Removes the selection (cut instead of copy).
    pub const fn cuts(self) -> bool {
        matches!(self, Action::Delete | Action::Change)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Down,
    Up,
    Right,
    WordForward,
    WordBackward,
    LineStart,
    LineEnd,
}

impl Motion {
    /// Vertical motions select whole lines when paired with an action.
    pub const fn is_linewise(self) -> bool {
        matches!(self, Motion::Down | Motion::Up)
    }
}

/// One pending or completed editing command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub action: Option<Action>,
    /// Shift latch was held when the action was issued.
    pub shifted: bool,
    /// Accumulated numeric prefix; 0 means unspecified.
    pub repeat: u32,
    pub motion: Option<Motion>,
}

impl Command {
    /// Effective repetition count (an unspecified repeat runs once).
    pub const fn count(&self) -> u32 {
        if self.repeat == 0 { 1 } else { self.repeat }
    }
}

/// Result of feeding one key class through the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composed {
    /// Still accumulating (or nothing to do).
    None,
    /// Bare navigation; the repeat has already been consumed.
    Navigate { motion: Motion, count: u32 },
    /// A complete command ready for the executor.
    Execute(Command),
}

#[derive(Debug, Default, Clone)]
pub struct PendingContext {
    current: Command,
    previous: Option<Command>,
}

impl PendingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Command {
        &self.current
    }

    pub fn previous(&self) -> Option<&Command> {
        self.previous.as_ref()
    }

    /// Drop the in-progress command. The replay source is kept.
    pub fn reset_transient(&mut self) {
        self.current = Command::default();
    }

    pub fn accumulate_digit(&mut self, digit: u32) {
        let repeat = self
            .current
            .repeat
            .saturating_mul(10)
            .saturating_add(digit)
            .min(MAX_REPEAT);
        self.current.repeat = repeat;
        debug!(target: "input.context", repeat, digit, "repeat_extend");
    }

    /// Feed an action key (`y`, `d`, `c`, `>`/`<`).
    ///
    /// In Visual mode or with the shift latch held the action applies to the
    /// current line immediately. Otherwise a second press of the same action
    /// (`dd`) completes it line-wise and any other press waits for a motion.
    pub fn set_action(&mut self, action: Action, shifted: bool, visual: bool) -> Composed {
        if visual || shifted {
            self.current.action = Some(action);
            self.current.shifted = shifted;
            self.current.motion = Some(Motion::Down);
            debug!(target: "input.context", ?action, shifted, visual, "action_immediate");
            return Composed::Execute(self.current);
        }
        if self.current.action == Some(action) {
            self.current.motion = Some(Motion::Down);
            debug!(target: "input.context", ?action, repeat = self.current.repeat, "action_doubled");
            return Composed::Execute(self.current);
        }
        self.current.action = Some(action);
        self.current.shifted = false;
        debug!(target: "input.context", ?action, "action_pending");
        Composed::None
    }

    /// Feed a motion key. Without a pending action (or while Visual) the
    /// motion is plain navigation and is not remembered for replay.
    pub fn set_motion(&mut self, motion: Motion, visual: bool) -> Composed {
        if visual || self.current.action.is_none() {
            let count = self.current.count();
            self.current.repeat = 0;
            debug!(target: "input.context", ?motion, count, "motion_emit");
            return Composed::Navigate { motion, count };
        }
        self.current.motion = Some(motion);
        debug!(
            target: "input.context",
            action = ?self.current.action,
            ?motion,
            repeat = self.current.repeat,
            "apply_action_motion"
        );
        Composed::Execute(self.current)
    }

    /// Actions that need no target (undo, paste, join) complete at once.
    pub fn immediate(&mut self, action: Action, shifted: bool) -> Composed {
        self.current.action = Some(action);
        self.current.shifted = shifted;
        debug!(target: "input.context", ?action, shifted, repeat = self.current.repeat, "immediate_emit");
        Composed::Execute(self.current)
    }

    /// Repeat-last (`.`): reissue the previous command, multiplying its repeat
    /// by any freshly typed prefix. Anything pending is discarded.
    pub fn replay_previous(&mut self) -> Composed {
        let prefix = self.current.repeat;
        let Some(previous) = self.previous else {
            debug!(target: "input.context", "replay_without_history");
            self.reset_transient();
            return Composed::None;
        };
        let mut replay = previous;
        if prefix > 0 {
            replay.repeat = previous
                .count()
                .saturating_mul(prefix)
                .min(MAX_REPEAT);
        }
        self.current = replay;
        debug!(target: "input.context", action = ?replay.action, repeat = replay.repeat, prefix, "replay_emit");
        Composed::Execute(replay)
    }

    /// Archive an executed command as the replay source and start afresh.
    pub fn commit(&mut self, executed: Command) {
        self.previous = Some(executed);
        self.current = Command::default();
    }
}
