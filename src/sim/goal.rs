//! Arena goal judge
//!
//! Tests the ball against the two goal volumes each tick and runs the round
//! reset when one triggers. Blue defends the -x goal, Orange defends +x, so
//! a ball crossing +x scores for Blue.

use super::state::{MatchEvent, MatchState, Side};
use crate::tuning::Tuning;

/// Which side scored, if the ball is inside a goal volume.
///
/// The ball's leading edge must have crossed the goal line, laterally within
/// the goal mouth and below the crossbar.
pub fn scoring_side(state: &MatchState, tuning: &Tuning) -> Option<Side> {
    let ball = &state.ball;
    if ball.pos.z.abs() >= tuning.goal_half_width || ball.pos.y >= tuning.goal_height {
        return None;
    }
    let line = tuning.arena_half_width;
    if ball.pos.x + tuning.ball_radius >= line {
        Some(Side::Blue) // crossed into Orange's goal
    } else if ball.pos.x - tuning.ball_radius <= -line {
        Some(Side::Orange)
    } else {
        None
    }
}

/// Judge the current ball position; on a goal, score it and reset the round.
pub fn judge(state: &mut MatchState, tuning: &Tuning) {
    let Some(side) = scoring_side(state, tuning) else {
        return;
    };

    state.score.award(side);
    log::info!(
        "goal for {side:?}, score {}:{}",
        state.score.blue,
        state.score.orange
    );
    state.events.push(MatchEvent::Goal { side });
    reset_round(state, tuning);
}

/// Return both bodies to their spawn poses at rest and refill boost.
///
/// Pad cooldowns are left running; only the player's resources reset.
fn reset_round(state: &mut MatchState, tuning: &Tuning) {
    state.ball.reset_to_center(tuning);
    state.vehicle.reset_to_spawn(tuning);
    state.boost.refill(tuning.max_boost);
}
