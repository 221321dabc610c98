//! Aerial state machine
//!
//! Jump -> (flip | double jump) -> landing. One aerial action is allowed per
//! airborne episode; the jump chain is driven off rising edges from the input
//! latch so a held key never retriggers it.

use glam::Vec2;

use super::input::{Action, InputLatch};
use super::state::{AerialPhase, FlipDirection, Vehicle};
use crate::snap_to_full_turns;
use crate::tuning::Tuning;

use std::f32::consts::TAU;

/// Advance the aerial state machine and airborne integration for one tick.
pub fn update(vehicle: &mut Vehicle, latch: &InputLatch, tuning: &Tuning, dt: f32) {
    match vehicle.phase {
        AerialPhase::Grounded => {
            if latch.just_pressed(Action::Jump) {
                take_off(vehicle, latch, tuning);
            }
        }
        AerialPhase::Jumping => {
            if latch.just_pressed(Action::Jump) && vehicle.can_double_jump {
                match select_flip_direction(latch) {
                    Some(direction) => start_flip(vehicle, direction, tuning),
                    None => double_jump(vehicle, tuning),
                }
            }
        }
        AerialPhase::Flipping { direction, ticks } => {
            advance_flip(vehicle, direction, ticks, tuning, dt);
        }
    }

    if vehicle.airborne() {
        integrate(vehicle, tuning, dt);
    }
}

/// Grounded -> Jumping.
fn take_off(vehicle: &mut Vehicle, latch: &InputLatch, tuning: &Tuning) {
    vehicle.vertical_vel = tuning.jump_impulse;
    vehicle.air_vel = takeoff_momentum(vehicle, latch);
    vehicle.can_double_jump = true;
    vehicle.has_double_jumped = false;
    vehicle.phase = AerialPhase::Jumping;
}

/// Initial airborne momentum, 8-way relative to the current yaw.
///
/// Held directional keys pick the direction (diagonals included when two are
/// held); the magnitude is the current ground speed. With nothing held the
/// cached ground momentum carries over unchanged.
fn takeoff_momentum(vehicle: &Vehicle, latch: &InputLatch) -> Vec2 {
    let mut dir = Vec2::ZERO;
    let fwd = vehicle.heading();
    let left = -fwd.perp();
    if latch.is_held(Action::Forward) {
        dir += fwd;
    }
    if latch.is_held(Action::Backward) {
        dir -= fwd;
    }
    if latch.is_held(Action::TurnLeft) {
        dir += left;
    }
    if latch.is_held(Action::TurnRight) {
        dir -= left;
    }

    if dir == Vec2::ZERO {
        vehicle.ground_momentum
    } else {
        dir.normalize() * vehicle.speed.abs()
    }
}

/// Priority-ordered flip direction from the held directional keys.
/// Returns `None` when no directional key is held (double jump instead).
fn select_flip_direction(latch: &InputLatch) -> Option<FlipDirection> {
    if latch.is_held(Action::Forward) {
        Some(FlipDirection::Forward)
    } else if latch.is_held(Action::Backward) {
        Some(FlipDirection::Backward)
    } else if latch.is_held(Action::TurnLeft) {
        Some(FlipDirection::Left)
    } else if latch.is_held(Action::TurnRight) {
        Some(FlipDirection::Right)
    } else {
        None
    }
}

/// Jumping -> Flipping: inject the fixed-magnitude directional impulse and
/// spend the aerial action.
fn start_flip(vehicle: &mut Vehicle, direction: FlipDirection, tuning: &Tuning) {
    vehicle.air_vel = direction.unit(vehicle.yaw) * tuning.flip_impulse;
    vehicle.can_double_jump = false;
    vehicle.phase = AerialPhase::Flipping {
        direction,
        ticks: 0,
    };
}

/// Second vertical impulse with no rotation; spends the aerial action.
fn double_jump(vehicle: &mut Vehicle, tuning: &Tuning) {
    vehicle.vertical_vel = tuning.double_jump_impulse;
    vehicle.has_double_jumped = true;
    vehicle.can_double_jump = false;
}

/// One tick of flip rotation; closes the rotation to an exact whole turn
/// when the animation completes.
fn advance_flip(
    vehicle: &mut Vehicle,
    direction: FlipDirection,
    ticks: u32,
    tuning: &Tuning,
    dt: f32,
) {
    let total = tuning.flip_ticks(dt);
    let step = direction.spin_sign() * TAU / total as f32;
    if direction.is_pitch() {
        vehicle.pitch += step;
    } else {
        vehicle.roll += step;
    }

    let ticks = ticks + 1;
    if ticks >= total {
        // Snap the rotated axis so the body lands visually upright
        if direction.is_pitch() {
            vehicle.pitch = snap_to_full_turns(vehicle.pitch);
        } else {
            vehicle.roll = snap_to_full_turns(vehicle.roll);
        }
        vehicle.phase = AerialPhase::Jumping;
    } else {
        vehicle.phase = AerialPhase::Flipping { direction, ticks };
    }
}

/// Ballistic integration while airborne, plus the landing check.
fn integrate(vehicle: &mut Vehicle, tuning: &Tuning, dt: f32) {
    vehicle.vertical_vel += tuning.gravity * dt;
    vehicle.pos.y += vehicle.vertical_vel * dt;
    vehicle.pos.x += vehicle.air_vel.x * dt;
    vehicle.pos.z += vehicle.air_vel.y * dt;

    if vehicle.pos.y <= tuning.ground_height {
        land(vehicle, tuning);
    }
}

/// Landing clamp and full aerial reset.
fn land(vehicle: &mut Vehicle, tuning: &Tuning) {
    vehicle.pos.y = tuning.ground_height;
    vehicle.vertical_vel = 0.0;
    vehicle.air_vel = Vec2::ZERO;
    // A partially completed flip still snaps upright on touchdown
    vehicle.pitch = 0.0;
    vehicle.roll = 0.0;
    vehicle.speed = tuning.base_speed;
    vehicle.can_double_jump = true;
    vehicle.has_double_jumped = false;
    vehicle.phase = AerialPhase::Grounded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::input::ActionSet;

    fn step(vehicle: &mut Vehicle, latch: &mut InputLatch, held: ActionSet, tuning: &Tuning) {
        latch.begin_tick(held);
        update(vehicle, latch, tuning, SIM_DT);
    }

    fn airborne_vehicle(tuning: &Tuning) -> (Vehicle, InputLatch) {
        let mut vehicle = Vehicle::spawn(tuning);
        let mut latch = InputLatch::default();
        step(&mut vehicle, &mut latch, ActionSet::new().with(Action::Jump), tuning);
        assert_eq!(vehicle.phase, AerialPhase::Jumping);
        // Release jump so the next press is a fresh edge
        step(&mut vehicle, &mut latch, ActionSet::new(), tuning);
        (vehicle, latch)
    }

    #[test]
    fn test_held_jump_triggers_once() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::spawn(&tuning);
        let mut latch = InputLatch::default();
        let jump = ActionSet::new().with(Action::Jump);

        step(&mut vehicle, &mut latch, jump, &tuning);
        assert_eq!(vehicle.phase, AerialPhase::Jumping);
        let vel_after_first = vehicle.vertical_vel;

        // Nine more ticks of the held key: no double jump, no flip
        for _ in 0..9 {
            step(&mut vehicle, &mut latch, jump, &tuning);
        }
        assert_eq!(vehicle.phase, AerialPhase::Jumping);
        assert!(vehicle.can_double_jump);
        assert!(!vehicle.has_double_jumped);
        assert!(vehicle.vertical_vel < vel_after_first); // only gravity acted
    }

    #[test]
    fn test_double_jump_without_direction() {
        let tuning = Tuning::default();
        let (mut vehicle, mut latch) = airborne_vehicle(&tuning);

        step(&mut vehicle, &mut latch, ActionSet::new().with(Action::Jump), &tuning);
        assert_eq!(vehicle.phase, AerialPhase::Jumping);
        assert!(vehicle.has_double_jumped);
        assert!(!vehicle.can_double_jump);
        // Impulse replaced the falling velocity (minus one tick of gravity)
        assert!(vehicle.vertical_vel > tuning.double_jump_impulse + tuning.gravity * SIM_DT - 1e-4);
    }

    #[test]
    fn test_flip_with_direction_held() {
        let tuning = Tuning::default();
        let (mut vehicle, mut latch) = airborne_vehicle(&tuning);

        let held = ActionSet::new().with(Action::Jump).with(Action::Forward);
        step(&mut vehicle, &mut latch, held, &tuning);
        assert!(matches!(
            vehicle.phase,
            AerialPhase::Flipping {
                direction: FlipDirection::Forward,
                ..
            }
        ));
        assert!(!vehicle.can_double_jump);
        assert!((vehicle.air_vel.length() - tuning.flip_impulse).abs() < 1e-4);
    }

    #[test]
    fn test_flip_direction_priority_forward_wins() {
        let tuning = Tuning::default();
        let (mut vehicle, mut latch) = airborne_vehicle(&tuning);

        // All four held: forward is checked first
        let held = ActionSet::new()
            .with(Action::Jump)
            .with(Action::Forward)
            .with(Action::Backward)
            .with(Action::TurnLeft)
            .with(Action::TurnRight);
        step(&mut vehicle, &mut latch, held, &tuning);
        assert!(matches!(
            vehicle.phase,
            AerialPhase::Flipping {
                direction: FlipDirection::Forward,
                ..
            }
        ));
    }

    #[test]
    fn test_one_aerial_action_per_episode() {
        let tuning = Tuning::default();
        let (mut vehicle, mut latch) = airborne_vehicle(&tuning);

        // Spend the action on a double jump
        step(&mut vehicle, &mut latch, ActionSet::new().with(Action::Jump), &tuning);
        assert!(!vehicle.can_double_jump);
        step(&mut vehicle, &mut latch, ActionSet::new(), &tuning);

        // A further press before landing changes nothing
        let before = vehicle.clone();
        step(&mut vehicle, &mut latch, ActionSet::new().with(Action::Jump), &tuning);
        assert_eq!(vehicle.phase, before.phase);
        assert!(!vehicle.can_double_jump);
        assert!(vehicle.has_double_jumped);
    }

    #[test]
    fn test_flip_rotation_closes_to_full_turn() {
        let tuning = Tuning::default();
        let (mut vehicle, mut latch) = airborne_vehicle(&tuning);
        // Keep the car in the air long enough for the whole flip
        vehicle.vertical_vel = 40.0;

        let held = ActionSet::new().with(Action::Jump).with(Action::Forward);
        step(&mut vehicle, &mut latch, held, &tuning);

        let total = tuning.flip_ticks(SIM_DT);
        for _ in 0..total {
            step(&mut vehicle, &mut latch, ActionSet::new(), &tuning);
        }
        assert_eq!(vehicle.phase, AerialPhase::Jumping);
        assert!((vehicle.pitch - snap_to_full_turns(vehicle.pitch)).abs() < 1e-5);
        assert!(vehicle.pitch.abs() > 1.0); // a real turn happened, not zero
        assert_eq!(vehicle.roll, 0.0);
    }

    #[test]
    fn test_landing_resets_everything() {
        let tuning = Tuning::default();
        let (mut vehicle, mut latch) = airborne_vehicle(&tuning);

        // Flip, then fall until touchdown
        let held = ActionSet::new().with(Action::Jump).with(Action::TurnLeft);
        step(&mut vehicle, &mut latch, held, &tuning);
        for _ in 0..2000 {
            step(&mut vehicle, &mut latch, ActionSet::new(), &tuning);
            if vehicle.phase == AerialPhase::Grounded {
                break;
            }
        }

        assert_eq!(vehicle.phase, AerialPhase::Grounded);
        assert_eq!(vehicle.pos.y, tuning.ground_height);
        assert_eq!(vehicle.vertical_vel, 0.0);
        assert_eq!(vehicle.air_vel, Vec2::ZERO);
        assert_eq!(vehicle.pitch, 0.0);
        assert_eq!(vehicle.roll, 0.0);
        assert!(vehicle.can_double_jump);
        assert!(!vehicle.has_double_jumped);
        assert_eq!(vehicle.speed, tuning.base_speed);
    }

    #[test]
    fn test_takeoff_momentum_supports_diagonals() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::spawn(&tuning);
        vehicle.speed = 10.0;
        let mut latch = InputLatch::default();

        let held = ActionSet::new()
            .with(Action::Jump)
            .with(Action::Forward)
            .with(Action::TurnLeft);
        step(&mut vehicle, &mut latch, held, &tuning);

        assert_eq!(vehicle.phase, AerialPhase::Jumping);
        assert!((vehicle.air_vel.length() - 10.0).abs() < 1e-4);
        let diagonal = (vehicle.heading() - vehicle.heading().perp()).normalize();
        assert!(vehicle.air_vel.normalize().dot(diagonal) > 0.999);
    }
}
