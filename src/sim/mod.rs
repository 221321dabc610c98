//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Same inputs + same tuning produce identical state
//! - No rendering or platform dependencies

pub mod aerial;
pub mod ball;
pub mod boost;
pub mod goal;
pub mod input;
pub mod locomotion;
pub mod state;
pub mod tick;

pub use input::{Action, ActionSet, InputLatch};
pub use state::{
    AerialPhase, Ball, BoostMeter, BoostPad, FlipDirection, MatchEvent, MatchState, Score, Side,
    Vehicle,
};
pub use tick::tick;
