//! Match state and core simulation types
//!
//! Everything that must survive between ticks lives here, owned by a single
//! [`MatchState`] aggregate that the components borrow explicitly. There are
//! no ambient globals.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::heading_from_yaw;
use crate::tuning::Tuning;

use super::input::InputLatch;

/// Which aerial maneuver a flip rotates through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl FlipDirection {
    /// Unit impulse direction on the ground plane for a car facing `yaw`.
    ///
    /// Each direction is the heading rotated by a fixed multiple of 90
    /// degrees, which replaces per-direction trig-sign branching.
    pub fn unit(self, yaw: f32) -> Vec2 {
        // Turning left increases yaw, which swings the heading toward
        // -heading.perp(); "left" matches that sense.
        let fwd = heading_from_yaw(yaw);
        match self {
            FlipDirection::Forward => fwd,
            FlipDirection::Backward => -fwd,
            FlipDirection::Left => -fwd.perp(),
            FlipDirection::Right => fwd.perp(),
        }
    }

    /// Whether this flip rotates about the pitch axis (true) or roll (false).
    pub const fn is_pitch(self) -> bool {
        matches!(self, FlipDirection::Forward | FlipDirection::Backward)
    }

    /// Sign of the per-tick rotation increment.
    pub const fn spin_sign(self) -> f32 {
        match self {
            FlipDirection::Forward | FlipDirection::Left => -1.0,
            FlipDirection::Backward | FlipDirection::Right => 1.0,
        }
    }
}

/// Aerial state machine phase.
///
/// `Flipping` implies airborne; the flip's own progress counter lives in the
/// variant so it cannot outlive the phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AerialPhase {
    /// On the ground; the initial and terminal state.
    Grounded,
    /// Airborne with no flip animation running.
    Jumping,
    /// Airborne with a flip rotation in progress.
    Flipping { direction: FlipDirection, ticks: u32 },
}

/// The player's car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// World position; y is up, the ground plane is y = 0.
    pub pos: Vec3,
    /// Rotation about the vertical axis. Unconstrained; wraps through trig.
    pub yaw: f32,
    /// Transient flip rotation, exactly zero while grounded.
    pub pitch: f32,
    /// Transient flip rotation, exactly zero while grounded.
    pub roll: f32,
    /// Signed forward speed along the heading (negative = reversing).
    pub speed: f32,
    /// Vertical velocity while airborne.
    pub vertical_vel: f32,
    /// Horizontal momentum while airborne; set at takeoff or flip start.
    pub air_vel: Vec2,
    /// Last per-axis ground velocity, carried into the next jump.
    pub ground_momentum: Vec2,
    pub phase: AerialPhase,
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
}

impl Vehicle {
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.ground_height, tuning.arena_half_depth * 0.5),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            speed: 0.0,
            vertical_vel: 0.0,
            air_vel: Vec2::ZERO,
            ground_momentum: Vec2::ZERO,
            phase: AerialPhase::Grounded,
            can_double_jump: true,
            has_double_jumped: false,
        }
    }

    #[inline]
    pub fn airborne(&self) -> bool {
        !matches!(self.phase, AerialPhase::Grounded)
    }

    /// Current unit heading on the ground plane.
    #[inline]
    pub fn heading(&self) -> Vec2 {
        heading_from_yaw(self.yaw)
    }

    /// Horizontal velocity right now: driven on the ground, ballistic in air.
    pub fn horizontal_vel(&self) -> Vec2 {
        if self.airborne() {
            self.air_vel
        } else {
            self.heading() * self.speed
        }
    }

    /// Return to the spawn pose at rest. Used on round reset.
    pub fn reset_to_spawn(&mut self, tuning: &Tuning) {
        *self = Self::spawn(tuning);
    }
}

/// Bounded boost resource.
///
/// Every mutation clamps to `[0, max]`; driving it outside that range is a
/// programming defect the meter absorbs rather than signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoostMeter {
    amount: f32,
}

impl BoostMeter {
    /// A full meter.
    pub fn full(tuning: &Tuning) -> Self {
        Self {
            amount: tuning.max_boost,
        }
    }

    #[inline]
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Add `value`, capped at the meter's maximum.
    pub fn award(&mut self, value: f32, max: f32) {
        self.amount = (self.amount + value.max(0.0)).clamp(0.0, max);
    }

    /// Drain `value` if any resource remains. Returns whether boost was
    /// actually consumed this call.
    pub fn try_consume(&mut self, value: f32) -> bool {
        if self.amount <= 0.0 {
            return false;
        }
        self.amount = (self.amount - value.max(0.0)).max(0.0);
        true
    }

    pub fn refill(&mut self, max: f32) {
        self.amount = max;
    }
}

/// A fixed-position boost pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostPad {
    /// Planar position (x, z); pads sit on the ground.
    pub pos: Vec2,
    pub active: bool,
    /// Simulation-clock time at which the pad reactivates. Replacing this
    /// value cancels any pending reactivation, so the schedule cannot leak
    /// or double-fire.
    pub reactivate_at: Option<f64>,
}

impl BoostPad {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            active: true,
            reactivate_at: None,
        }
    }
}

/// Arena ends. `Blue` defends -x, `Orange` defends +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Blue,
    Orange,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Orange,
            Side::Orange => Side::Blue,
        }
    }
}

/// Session score. Counters only ever go up.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Score {
    pub blue: u32,
    pub orange: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Blue => self.blue += 1,
            Side::Orange => self.orange += 1,
        }
    }
}

/// The game ball.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl Ball {
    /// At rest on the ground at arena center.
    pub fn at_center(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.ball_radius, 0.0),
            vel: Vec3::ZERO,
        }
    }

    pub fn reset_to_center(&mut self, tuning: &Tuning) {
        *self = Self::at_center(tuning);
    }
}

/// Events emitted during a tick for the UI collaborator to drain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A goal was scored by `side`.
    Goal { side: Side },
    /// Pad `pad` was collected and started its cooldown.
    PadCollected { pad: usize },
    /// Pad `pad` finished cooling down and is active again.
    PadReady { pad: usize },
}

/// Complete match state (deterministic, serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Simulation tick counter.
    pub time_ticks: u64,
    pub latch: InputLatch,
    pub vehicle: Vehicle,
    pub ball: Ball,
    pub boost: BoostMeter,
    pub pads: Vec<BoostPad>,
    pub score: Score,
    /// Events since the host last drained them.
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            time_ticks: 0,
            latch: InputLatch::default(),
            vehicle: Vehicle::spawn(tuning),
            ball: Ball::at_center(tuning),
            boost: BoostMeter::full(tuning),
            pads: default_pad_layout(tuning),
            score: Score::default(),
            events: Vec::new(),
        }
    }

    /// Simulation-clock time in seconds at timestep `dt`.
    pub fn now(&self, dt: f32) -> f64 {
        self.time_ticks as f64 * dt as f64
    }

    /// Take the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Fixed pad positions: four corners plus the two midfield lanes.
fn default_pad_layout(tuning: &Tuning) -> Vec<BoostPad> {
    let x = tuning.arena_half_width * 0.6;
    let z = tuning.arena_half_depth * 0.6;
    [
        Vec2::new(-x, -z),
        Vec2::new(-x, z),
        Vec2::new(x, -z),
        Vec2::new(x, z),
        Vec2::new(0.0, -z),
        Vec2::new(0.0, z),
    ]
    .into_iter()
    .map(BoostPad::new)
    .collect()
}
