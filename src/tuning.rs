//! Data-driven game balance
//!
//! Every constant the simulation integrates or compares against lives here so
//! that scenario tests (and the host) can adjust them without recompiling the
//! physics. All rates and impulses are per-second; the fixed timestep only
//! decides how finely they are integrated.

use serde::{Deserialize, Serialize};

/// Complete tuning set for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Locomotion ===
    /// Cruising speed the car settles back to after landing (units/s)
    pub base_speed: f32,
    /// Top speed without boost (units/s)
    pub max_speed: f32,
    /// Reverse top speed as a fraction of `max_speed`
    pub reverse_fraction: f32,
    /// Target-speed multiplier while boosting
    pub boost_speed_multiplier: f32,
    /// Acceleration toward a faster target speed (units/s²)
    pub acceleration: f32,
    /// Braking rate when the target is slower than current speed (units/s²)
    pub brake_deceleration: f32,
    /// Coasting decay toward zero with no throttle input (units/s²)
    pub coast_deceleration: f32,
    /// Yaw rate with wheels on the ground (rad/s)
    pub turn_rate: f32,
    /// Yaw rate while airborne - reduced air-control authority (rad/s)
    pub air_turn_rate: f32,

    // === Aerial ===
    /// Upward velocity set on the first jump (units/s)
    pub jump_impulse: f32,
    /// Upward velocity set on the double jump (units/s)
    pub double_jump_impulse: f32,
    /// Horizontal speed injected when a flip starts (units/s)
    pub flip_impulse: f32,
    /// Wall-clock length of the flip animation (s)
    pub flip_duration: f32,
    /// Gravity acceleration, negative is down (units/s²)
    pub gravity: f32,

    // === Boost economy ===
    /// Meter capacity
    pub max_boost: f32,
    /// Meter units drained per second of held boost
    pub boost_drain_rate: f32,
    /// Meter units granted by one pad pickup
    pub boost_pad_value: f32,
    /// Seconds before a collected pad becomes active again
    pub boost_pad_cooldown: f32,
    /// Planar distance within which a pad is collected
    pub pad_pickup_radius: f32,
    /// Pads cannot be collected above this height (no mid-air vacuuming)
    pub pad_pickup_ceiling: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Fraction of impact speed returned on a bounce
    pub ball_restitution: f32,
    /// Ceiling bounces are slightly deader than floor/wall ones
    pub ceiling_restitution: f32,
    /// Per-second horizontal velocity retention while in ground contact
    pub ball_friction: f32,
    /// Vertical speeds below this snap to zero (stops micro-bouncing)
    pub rest_epsilon: f32,
    /// Floor for the speed the ball leaves a car contact with (units/s)
    pub min_kick_speed: f32,
    /// Extra contact speed while the car is actively boosting (units/s)
    pub boost_kick_bonus: f32,
    /// Car vertical speed above which a contact pops the ball upward (units/s)
    pub flick_threshold: f32,
    /// Upward velocity added on such a flick contact (units/s)
    pub flick_lift: f32,

    // === Arena ===
    /// Half extent of the arena along x (goal lines sit at +-half_width)
    pub arena_half_width: f32,
    /// Half extent of the arena along z (side walls)
    pub arena_half_depth: f32,
    /// Roof height; 0 or negative disables the ceiling
    pub arena_height: f32,
    /// Half width of each goal mouth along z
    pub goal_half_width: f32,
    /// Crossbar height; the ball must cross the line below this
    pub goal_height: f32,

    // === Vehicle ===
    /// Resting height of the car body above the ground plane
    pub ground_height: f32,
    /// Contact sphere radius used for car-ball impulse transfer
    pub vehicle_contact_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 14.0,
            max_speed: 24.0,
            reverse_fraction: 0.7,
            boost_speed_multiplier: 1.5,
            acceleration: 30.0,
            brake_deceleration: 40.0,
            coast_deceleration: 18.0,
            turn_rate: 2.4,
            air_turn_rate: 1.2,

            jump_impulse: 11.0,
            double_jump_impulse: 9.0,
            flip_impulse: 20.0,
            flip_duration: 0.6,
            gravity: -28.0,

            max_boost: 100.0,
            boost_drain_rate: 25.0,
            boost_pad_value: 25.0,
            boost_pad_cooldown: 6.0,
            pad_pickup_radius: 2.5,
            pad_pickup_ceiling: 3.0,

            ball_radius: 1.8,
            ball_restitution: 0.75,
            ceiling_restitution: 0.6,
            ball_friction: 0.45,
            rest_epsilon: 0.35,
            min_kick_speed: 9.0,
            boost_kick_bonus: 8.0,
            flick_threshold: 4.0,
            flick_lift: 6.0,

            arena_half_width: 60.0,
            arena_half_depth: 40.0,
            arena_height: 22.0,
            goal_half_width: 9.0,
            goal_height: 6.5,

            ground_height: 0.75,
            vehicle_contact_radius: 1.6,
        }
    }
}

impl Tuning {
    /// Parse a tuning set from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Number of fixed ticks one flip animation spans at timestep `dt`.
    pub fn flip_ticks(&self, dt: f32) -> u32 {
        (self.flip_duration / dt).round().max(1.0) as u32
    }

    /// Top target speed while boosting.
    pub fn boosted_max_speed(&self) -> f32 {
        self.max_speed * self.boost_speed_multiplier
    }

    /// Reverse speed floor (negative).
    pub fn reverse_floor(&self) -> f32 {
        -self.max_speed * self.reverse_fraction
    }
}
