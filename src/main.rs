//! Boost Arena headless demo
//!
//! Drives the simulation with a scripted input sequence through the fixed
//! timestep loop and logs what happens. Stands in for the render/UI
//! collaborators so the core can be exercised without a window.

use boost_arena::consts::{MAX_SUBSTEPS, SIM_DT};
use boost_arena::sim::{Action, ActionSet, MatchEvent, MatchState, tick};
use boost_arena::tuning::Tuning;

/// One phase of the scripted session: what is held, for how many seconds.
struct Phase {
    held: ActionSet,
    seconds: f32,
    label: &'static str,
}

fn script() -> Vec<Phase> {
    let drive = ActionSet::new().with(Action::Forward);
    vec![
        Phase {
            held: drive,
            seconds: 1.5,
            label: "accelerate toward the ball",
        },
        Phase {
            held: drive.with(Action::Boost),
            seconds: 1.5,
            label: "boost through midfield",
        },
        Phase {
            held: drive.with(Action::Jump),
            seconds: 0.05,
            label: "jump",
        },
        Phase {
            held: drive,
            seconds: 0.2,
            label: "hang time",
        },
        Phase {
            held: drive.with(Action::Jump),
            seconds: 0.05,
            label: "front flip",
        },
        Phase {
            held: ActionSet::new(),
            seconds: 3.0,
            label: "land and coast",
        },
        Phase {
            held: drive.with(Action::TurnLeft),
            seconds: 2.0,
            label: "sweep toward a boost pad",
        },
    ]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = Tuning::default();
    let mut state = MatchState::new(&tuning);
    log::info!(
        "arena {}x{} with {} boost pads",
        tuning.arena_half_width * 2.0,
        tuning.arena_half_depth * 2.0,
        state.pads.len()
    );

    // Fixed-step loop with an accumulator, as a real host would run it; the
    // demo just feeds it scripted wall time.
    let mut accumulator = 0.0f32;
    let frame_dt = 1.0 / 60.0;

    for phase in script() {
        log::info!("phase: {}", phase.label);
        let mut remaining = phase.seconds;
        while remaining > 0.0 {
            accumulator += frame_dt;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut state, phase.held, &tuning, SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
            }
            for event in state.drain_events() {
                match event {
                    MatchEvent::Goal { side } => log::info!("GOAL for {side:?}!"),
                    MatchEvent::PadCollected { pad } => log::info!("collected pad {pad}"),
                    MatchEvent::PadReady { pad } => log::debug!("pad {pad} ready"),
                }
            }
            remaining -= frame_dt;
        }

        let v = &state.vehicle;
        log::info!(
            "car at ({:.1}, {:.1}, {:.1}) speed {:.1} boost {:.0}, ball at ({:.1}, {:.1}, {:.1})",
            v.pos.x,
            v.pos.y,
            v.pos.z,
            v.speed,
            state.boost.amount(),
            state.ball.pos.x,
            state.ball.pos.y,
            state.ball.pos.z,
        );
    }

    log::info!(
        "session over after {} ticks, score {}:{}",
        state.time_ticks,
        state.score.blue,
        state.score.orange
    );
}
