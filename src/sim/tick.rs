//! Fixed timestep simulation tick
//!
//! Runs the components in a fixed order every tick: input latch, locomotion,
//! aerial state machine, pad pickups, ball physics, goal judge. The host
//! drives this through an accumulator at `consts::SIM_DT` and reads poses /
//! drains events afterward.

use super::input::{Action, ActionSet};
use super::state::MatchState;
use super::{aerial, ball, boost, goal, locomotion};
use crate::tuning::Tuning;

/// Advance the match by one fixed timestep with the given held actions.
pub fn tick(state: &mut MatchState, held: ActionSet, tuning: &Tuning, dt: f32) {
    state.time_ticks += 1;
    state.latch.begin_tick(held);
    let now = state.now(dt);

    locomotion::drive(&mut state.vehicle, &mut state.boost, &state.latch, tuning, dt);
    aerial::update(&mut state.vehicle, &state.latch, tuning, dt);
    boost::update_pads(
        &mut state.pads,
        &state.vehicle,
        &mut state.boost,
        &mut state.events,
        tuning,
        now,
    );

    // Actively boosting = input held with fuel remaining; used for the
    // contact kick bonus, not an extra drain
    let boosting = state.latch.is_held(Action::Boost) && state.boost.amount() > 0.0;
    ball::integrate(&mut state.ball, &state.vehicle, boosting, tuning, dt);

    goal::judge(state, tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{AerialPhase, MatchEvent, Side};
    use glam::Vec3;

    fn run(state: &mut MatchState, tuning: &Tuning, held: ActionSet, ticks: u32) {
        for _ in 0..ticks {
            tick(state, held, tuning, SIM_DT);
        }
    }

    #[test]
    fn test_drive_jump_flip_land_round_trip() {
        let tuning = Tuning::default();
        let mut state = MatchState::new(&tuning);

        // Drive forward for a second
        run(&mut state, &tuning, ActionSet::new().with(Action::Forward), 120);
        assert!(state.vehicle.speed > 0.0);
        let spawn_z = tuning.arena_half_depth * 0.5;
        assert!(state.vehicle.pos.z < spawn_z);

        // Jump (edge), release, then flip forward
        run(
            &mut state,
            &tuning,
            ActionSet::new().with(Action::Forward).with(Action::Jump),
            1,
        );
        assert_eq!(state.vehicle.phase, AerialPhase::Jumping);
        run(&mut state, &tuning, ActionSet::new().with(Action::Forward), 1);
        run(
            &mut state,
            &tuning,
            ActionSet::new().with(Action::Forward).with(Action::Jump),
            1,
        );
        assert!(matches!(state.vehicle.phase, AerialPhase::Flipping { .. }));

        // Let it land; everything airborne clears
        run(&mut state, &tuning, ActionSet::new(), 600);
        assert_eq!(state.vehicle.phase, AerialPhase::Grounded);
        assert_eq!(state.vehicle.pitch, 0.0);
        assert_eq!(state.vehicle.roll, 0.0);
        assert!(state.vehicle.can_double_jump);
    }

    #[test]
    fn test_goal_through_full_tick_path() {
        let tuning = Tuning::default();
        let mut state = MatchState::new(&tuning);

        // Park the car out of the way and roll the ball into the +x goal
        state.vehicle.pos = Vec3::new(0.0, tuning.ground_height, tuning.arena_half_depth - 2.0);
        state.ball.pos = Vec3::new(tuning.arena_half_width - 5.0, tuning.ball_radius, 0.0);
        state.ball.vel = Vec3::new(20.0, 0.0, 0.0);

        run(&mut state, &tuning, ActionSet::new(), 240);

        let events = state.drain_events();
        assert_eq!(events, vec![MatchEvent::Goal { side: Side::Blue }]);
        assert_eq!(state.score.blue, 1);
        assert_eq!(state.ball.pos, Vec3::new(0.0, tuning.ball_radius, 0.0));
        assert_eq!(state.ball.vel, Vec3::ZERO);
        assert_eq!(state.boost.amount(), tuning.max_boost);
        // Drained queue stays drained
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_pad_pickup_through_tick_and_clock() {
        let tuning = Tuning::default();
        let mut state = MatchState::new(&tuning);

        // Spend some boost, then park the car on pad 0
        state.boost.try_consume(50.0);
        let pad_pos = state.pads[0].pos;
        state.vehicle.pos = Vec3::new(pad_pos.x, tuning.ground_height, pad_pos.y);

        run(&mut state, &tuning, ActionSet::new(), 1);
        assert!(!state.pads[0].active);
        assert_eq!(
            state.boost.amount(),
            tuning.max_boost - 50.0 + tuning.boost_pad_value
        );
        assert!(state
            .drain_events()
            .contains(&MatchEvent::PadCollected { pad: 0 }));

        // Sit through the cooldown; the pad comes back on the sim clock
        let cooldown_ticks = (tuning.boost_pad_cooldown / SIM_DT).ceil() as u32 + 2;
        run(&mut state, &tuning, ActionSet::new(), cooldown_ticks);
        let events = state.drain_events();
        assert!(events.contains(&MatchEvent::PadReady { pad: 0 }));
        // And it was immediately collectable again
        assert!(events.contains(&MatchEvent::PadCollected { pad: 0 }));
    }

    #[test]
    fn test_vehicle_never_below_ground_while_grounded() {
        let tuning = Tuning::default();
        let mut state = MatchState::new(&tuning);

        let held = ActionSet::new().with(Action::Forward).with(Action::Boost);
        for i in 0..1200 {
            // Periodic jump presses mixed into driving
            let held = if i % 200 == 0 {
                held.with(Action::Jump)
            } else {
                held
            };
            tick(&mut state, held, &tuning, SIM_DT);
            if !state.vehicle.airborne() {
                assert!(state.vehicle.pos.y >= tuning.ground_height);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = MatchState::new(&tuning);
        let mut b = MatchState::new(&tuning);

        let script = [
            (ActionSet::new().with(Action::Forward), 90u32),
            (ActionSet::new().with(Action::Forward).with(Action::Boost), 60),
            (ActionSet::new().with(Action::Forward).with(Action::Jump), 1),
            (ActionSet::new().with(Action::Forward), 10),
            (ActionSet::new().with(Action::Forward).with(Action::Jump), 1),
            (ActionSet::new(), 300),
        ];

        for &(held, ticks) in &script {
            run(&mut a, &tuning, held, ticks);
            run(&mut b, &tuning, held, ticks);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.vehicle.pos, b.vehicle.pos);
        assert_eq!(a.vehicle.yaw, b.vehicle.yaw);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.boost.amount(), b.boost.amount());
    }
}
