//! Ground locomotion
//!
//! Accelerate-toward-target-speed driving model: throttle input picks a
//! target speed (forward max, a slower reverse fraction, or zero), the car
//! accelerates or brakes toward it, and coasts down with no input. Boost
//! raises the forward target above the normal max while it drains the meter.

use super::input::{Action, InputLatch};
use super::state::{BoostMeter, Vehicle};
use crate::tuning::Tuning;

/// Advance driving for one tick.
///
/// Runs every tick: turning and speed shaping apply in the air too (with
/// reduced yaw authority), but translation only happens while grounded -
/// airborne translation belongs to the aerial integrator.
pub fn drive(
    vehicle: &mut Vehicle,
    boost: &mut BoostMeter,
    latch: &InputLatch,
    tuning: &Tuning,
    dt: f32,
) {
    let boosting = latch.is_held(Action::Boost) && boost.try_consume(tuning.boost_drain_rate * dt);

    // Pick the target speed from throttle input
    let target = if latch.is_held(Action::Forward) {
        if boosting {
            tuning.boosted_max_speed()
        } else {
            tuning.max_speed
        }
    } else if latch.is_held(Action::Backward) {
        tuning.reverse_floor()
    } else {
        0.0
    };

    vehicle.speed = approach(vehicle.speed, target, latch, tuning, dt);
    vehicle.speed = vehicle.speed.clamp(tuning.reverse_floor(), tuning.boosted_max_speed());

    // Yaw, with less authority in the air
    let yaw_rate = if vehicle.airborne() {
        tuning.air_turn_rate
    } else {
        tuning.turn_rate
    };
    if latch.is_held(Action::TurnLeft) {
        vehicle.yaw += yaw_rate * dt;
    }
    if latch.is_held(Action::TurnRight) {
        vehicle.yaw -= yaw_rate * dt;
    }

    if !vehicle.airborne() {
        let velocity = vehicle.heading() * vehicle.speed;
        vehicle.pos.x += velocity.x * dt;
        vehicle.pos.z += velocity.y * dt;
        // Cached for reuse as initial momentum on the next jump
        vehicle.ground_momentum = velocity;
    }
}

/// Move `speed` toward `target` using the rate appropriate to the situation.
fn approach(speed: f32, target: f32, latch: &InputLatch, tuning: &Tuning, dt: f32) -> f32 {
    let throttle_held = latch.is_held(Action::Forward) || latch.is_held(Action::Backward);
    let rate = if !throttle_held {
        tuning.coast_deceleration
    } else if speed == 0.0 || (target.abs() >= speed.abs() && target.signum() == speed.signum()) {
        tuning.acceleration
    } else {
        tuning.brake_deceleration
    };

    let step = rate * dt;
    if (target - speed).abs() <= step {
        target
    } else if target > speed {
        speed + step
    } else {
        speed - step
    }
}
