//! Orbit Courier headless demo
//!
//! Loads a level file and flies it with a seeded autopilot that taps at
//! random intervals, logging events as they fire and printing the settled
//! score at the end. Deterministic for a given seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use orbit_courier::consts::SIM_DT;
use orbit_courier::events::EventBus;
use orbit_courier::level::load_level;
use orbit_courier::sim::{tick, GameEvent, RunPhase, RunState, TickInput};
use orbit_courier::Session;

struct Args {
    level_path: String,
    estimate_secs: f32,
    par_secs: f64,
    seed: u64,
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    Args {
        level_path: args.next().unwrap_or_else(|| "levels/level01.json".into()),
        estimate_secs: args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60.0),
        par_secs: args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0),
        seed: args.next().and_then(|s| s.parse().ok()).unwrap_or(7),
    }
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let level = match load_level(&args.level_path) {
        Ok(level) => level,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let mut session = Session::default();
    let expected = session.begin_level(args.par_secs, args.estimate_secs as f64);
    println!(
        "flying {} with a {:.0}s estimate, worth {expected} points",
        args.level_path, args.estimate_secs
    );

    let bus: EventBus<GameEvent> = EventBus::new();
    let _log_sub = bus.subscribe(|event| match event {
        GameEvent::Started => log::info!("run started"),
        GameEvent::BlockCollide => log::warn!("crash"),
        GameEvent::ObjectiveCollide { id, color } => {
            log::info!("collected objective {id} (#{color:06x})")
        }
        GameEvent::Warning { remaining_secs } => log::warn!("{remaining_secs}s left"),
        GameEvent::TimeUp => log::warn!("time up"),
        GameEvent::LevelCleared => log::info!("level cleared"),
    });

    let mut state = RunState::new(&level, args.estimate_secs);
    let mut rng = Pcg32::seed_from_u64(args.seed);
    let mut elapsed = 0.0f32;
    let mut next_steer = 0.0f32; // first tap launches immediately

    while state.phase == RunPhase::Flying {
        let steer = elapsed >= next_steer;
        if steer {
            next_steer = elapsed + rng.random_range(0.4..2.4);
        }
        tick(&mut state, &TickInput { steer }, SIM_DT);
        for event in state.drain_events() {
            bus.publish(&event);
        }
        elapsed += SIM_DT;
    }

    let cleared = state.phase == RunPhase::Cleared;
    let result = session.finish_level(cleared, state.collisions);
    println!(
        "{} after {:.1}s with {} crash(es): {:+} points, total {}",
        if cleared { "cleared" } else { "failed" },
        state.elapsed,
        state.collisions,
        result.delta,
        result.total,
    );
}
