//! Latched action input
//!
//! The host maps raw key events to a closed set of actions and hands the
//! simulation a snapshot of what is held each tick. The latch keeps the
//! previous tick's snapshot so actions that must fire once per press (the
//! jump chain) can be edge-detected instead of level-detected.

use serde::{Deserialize, Serialize};

/// Recognized player actions. Key bindings are the host's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Jump,
    Boost,
}

impl Action {
    const fn bit(self) -> u8 {
        match self {
            Action::Forward => 1 << 0,
            Action::Backward => 1 << 1,
            Action::TurnLeft => 1 << 2,
            Action::TurnRight => 1 << 3,
            Action::Jump => 1 << 4,
            Action::Boost => 1 << 5,
        }
    }
}

/// Set of currently-held actions, packed into a single byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    bits: u8,
}

impl ActionSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub const fn contains(&self, action: Action) -> bool {
        self.bits & action.bit() != 0
    }

    #[inline]
    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.bits |= action.bit();
        } else {
            self.bits &= !action.bit();
        }
    }

    /// Builder-style convenience for tests and scripted input.
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    /// True if any of forward/backward/turn-left/turn-right is held.
    pub const fn any_directional(&self) -> bool {
        self.contains(Action::Forward)
            || self.contains(Action::Backward)
            || self.contains(Action::TurnLeft)
            || self.contains(Action::TurnRight)
    }
}

/// Per-tick input view with rising-edge detection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputLatch {
    held: ActionSet,
    prev: ActionSet,
}

impl InputLatch {
    /// Advance to a new tick's held snapshot. Call exactly once per tick,
    /// before any component consumes input.
    pub fn begin_tick(&mut self, held: ActionSet) {
        self.prev = self.held;
        self.held = held;
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    /// True only on the tick where `action` transitions from released to held.
    #[inline]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.held.contains(action) && !self.prev.contains(action)
    }

    /// The raw held set for this tick.
    pub fn held(&self) -> ActionSet {
        self.held
    }
}
