//! Boost pad economy
//!
//! Pads grant a fixed chunk of meter on proximity contact and then cool down.
//! Reactivation is a scheduled event: each pad stores an explicit fire time
//! that the tick checks against the simulation clock, so there is no timer
//! callback to leak, double-fire, or race with the frame loop.

use super::state::{BoostMeter, BoostPad, MatchEvent, Vehicle};
use crate::tuning::Tuning;

/// Run pad reactivation and pickup checks for one tick.
///
/// `now` is the simulation clock in seconds, sampled once per tick.
pub fn update_pads(
    pads: &mut [BoostPad],
    vehicle: &Vehicle,
    boost: &mut BoostMeter,
    events: &mut Vec<MatchEvent>,
    tuning: &Tuning,
    now: f64,
) {
    for (index, pad) in pads.iter_mut().enumerate() {
        if !pad.active {
            // Inactive pads only wait for their fire time; pickup is a no-op
            if pad.reactivate_at.is_some_and(|at| now >= at) {
                pad.active = true;
                pad.reactivate_at = None;
                log::debug!("boost pad {index} ready");
                events.push(MatchEvent::PadReady { pad: index });
            }
            continue;
        }

        if in_pickup_range(pad, vehicle, tuning) {
            boost.award(tuning.boost_pad_value, tuning.max_boost);
            pad.active = false;
            // Replaces any stale schedule outright; cancel-safe
            pad.reactivate_at = Some(now + tuning.boost_pad_cooldown as f64);
            log::debug!("boost pad {index} collected, meter at {:.0}", boost.amount());
            events.push(MatchEvent::PadCollected { pad: index });
        }
    }
}

/// Planar distance check, with a height ceiling so a car sailing overhead
/// does not vacuum up pads.
fn in_pickup_range(pad: &BoostPad, vehicle: &Vehicle, tuning: &Tuning) -> bool {
    if vehicle.pos.y >= tuning.pad_pickup_ceiling {
        return false;
    }
    let dx = vehicle.pos.x - pad.pos.x;
    let dz = vehicle.pos.z - pad.pos.y;
    dx * dx + dz * dz < tuning.pad_pickup_radius * tuning.pad_pickup_radius
}
