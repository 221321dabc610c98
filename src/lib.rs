//! Boost Arena - a car-and-ball arena game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (locomotion, aerial maneuvers, ball
//!   physics, boost economy, goal judging)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, scene/asset setup, and UI are external collaborators: the host
//! reads poses and drains events from [`sim::MatchState`] after each tick.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Fixed-step loop constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Unit heading vector on the ground plane for a given yaw.
///
/// Yaw 0 faces -z; positive yaw turns toward -x (right-handed about +y).
#[inline]
pub fn heading_from_yaw(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.sin(), -yaw.cos())
}

/// Snap an angle to the nearest whole number of full turns.
///
/// Used when a flip animation ends so the accumulated rotation collapses to
/// an exact multiple of TAU instead of leaving floating-point residue.
#[inline]
pub fn snap_to_full_turns(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    (angle / TAU).round() * TAU
}
