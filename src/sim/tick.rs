//! Per-tick simulation step
//!
//! Contact notifications fire first, then the movement update, then the
//! countdown and derived indicator state — the same ordering the original
//! physics callbacks imposed. Everything is synchronous within one call.

use super::collision::overlapping_blocks;
use super::sensor::SafeSensor;
use super::ship::SteerResponse;
use super::state::{GameEvent, RunPhase, RunState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap: start flying or reverse the turn direction
    pub steer: bool,
}

/// Advance one attempt by `dt` seconds of wall-clock time
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) {
    if state.phase != RunPhase::Flying {
        return;
    }

    if input.steer
        && state.ship.steer() == SteerResponse::Launched
        && !state.started
    {
        state.started = true;
        state.push_event(GameEvent::Started);
    }

    contact_pass(state);

    // Movement update: record the safe spot before anything moves, then
    // advance the ship and drag the sensor along behind it
    state.sensor.record_if_clear();
    state.ship.advance(dt);
    state.sensor.follow(state.ship.pos);

    let before = state.remaining;
    state.remaining -= dt;
    state.elapsed += dt;
    if state.remaining <= 0.0 {
        state.remaining = 0.0;
        state.phase = RunPhase::Failed;
        state.push_event(GameEvent::TimeUp);
        return;
    }
    let whole_secs = state.remaining.ceil() as u32;
    if whole_secs != before.ceil() as u32 && whole_secs <= WARNING_THRESHOLD_SECS {
        state.push_event(GameEvent::Warning {
            remaining_secs: whole_secs,
        });
    }

    // Refresh the indicator for every surviving objective
    let view = state.camera.view_rect(state.ship.pos);
    let ship_pos = state.ship.pos;
    for (objective, indicator) in state.objectives.iter().zip(state.indicators.iter_mut()) {
        indicator.update(ship_pos, objective.pos, &view);
    }

    if state.objectives.is_empty() {
        state.phase = RunPhase::Cleared;
        state.push_event(GameEvent::LevelCleared);
    }
}

/// Fire enter/exit contact notifications for the sensor and the ship
fn contact_pass(state: &mut RunState) {
    // Sensor vs blocks: enter/exit toggles the overlap flag
    let sensor_now = overlapping_blocks(&state.blocks, state.sensor.pos, SafeSensor::radius());
    let delta = state.sensor_contacts.update(sensor_now);
    for _ in &delta.entered {
        state.sensor.contact_started();
    }
    for _ in &delta.exited {
        state.sensor.contact_ended();
    }

    // Ship vs blocks: a fresh contact is a crash, debounced while tumbling
    let ship_now = overlapping_blocks(&state.blocks, state.ship.pos, SHIP_RADIUS);
    let delta = state.ship_contacts.update(ship_now);
    if !delta.entered.is_empty() {
        let safe = state.sensor.safe_position();
        if state.ship.begin_tumble(safe) {
            state.collisions += 1;
            log::info!("crash #{}, recovering at {:?}", state.collisions, safe);
            state.push_event(GameEvent::BlockCollide);
            // The snap moved the ship; rebase its contact set so the next
            // crash registers as a fresh enter
            let rebased = overlapping_blocks(&state.blocks, state.ship.pos, SHIP_RADIUS);
            state.ship_contacts.update(rebased);
        }
    }

    // Ship vs objectives: instantly collectible, tumbling or not
    let ship_pos = state.ship.pos;
    let touched: Vec<usize> = state
        .objectives
        .iter()
        .enumerate()
        .filter(|(_, o)| (o.pos - ship_pos).length() <= SHIP_RADIUS + OBJECTIVE_RADIUS)
        .map(|(i, _)| i)
        .collect();
    for index in touched.into_iter().rev() {
        state.collect_objective(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Level, ObjectiveSpawn};
    use crate::sim::collision::Block;
    use crate::sim::ship::ShipState;
    use glam::Vec2;

    const STEER: TickInput = TickInput { steer: true };
    const COAST: TickInput = TickInput { steer: false };

    // The ship launches from (800, 1700) facing up and turning clockwise, so
    // it traces the circle centered at (900, 1700) with radius 100 (speed /
    // turn rate). Tests place walls and objectives on that circle.
    fn level_with(blocks: Vec<Block>, objectives: Vec<ObjectiveSpawn>) -> Level {
        Level {
            ship_start: Vec2::new(800.0, 1700.0),
            blocks,
            objectives,
        }
    }

    fn far_objective() -> ObjectiveSpawn {
        ObjectiveSpawn {
            pos: Vec2::new(1500.0, 3000.0),
            color: 0xffffff,
        }
    }

    /// Wall crossing the top of the launch orbit
    fn orbit_wall() -> Block {
        Block::new(Vec2::new(900.0, 1570.0), Vec2::new(300.0, 40.0), 0.0)
    }

    fn run_until_crash(state: &mut RunState) {
        tick(state, &STEER, SIM_DT);
        state.drain_events();
        for _ in 0..2400 {
            tick(state, &COAST, SIM_DT);
            if state.drain_events().contains(&GameEvent::BlockCollide) {
                return;
            }
        }
        panic!("ship never crashed");
    }

    #[test]
    fn test_first_steer_emits_started_once() {
        let mut state = RunState::new(&level_with(vec![], vec![far_objective()]), 60.0);

        tick(&mut state, &STEER, SIM_DT);
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::Started]);

        tick(&mut state, &STEER, SIM_DT);
        assert!(!state.drain_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_crash_tumbles_and_recovers_at_safe_position() {
        let wall = orbit_wall();
        let mut state = RunState::new(&level_with(vec![wall], vec![far_objective()]), 60.0);

        run_until_crash(&mut state);
        assert_eq!(state.collisions, 1);
        assert!(matches!(state.ship.state, ShipState::Tumbling { .. }));

        // The recovery point is clear of the wall for the ship footprint
        assert!(!wall.overlaps_circle(state.ship.pos, SHIP_RADIUS));
    }

    #[test]
    fn test_crash_while_tumbling_is_silent() {
        let wall = orbit_wall();
        let mut state = RunState::new(&level_with(vec![wall], vec![far_objective()]), 60.0);

        run_until_crash(&mut state);

        // Force a re-entrant contact: teleport the ship into the wall while
        // the tumble is still running
        let ShipState::Tumbling { elapsed } = state.ship.state else {
            panic!("expected tumble");
        };
        state.ship.pos = wall.center;
        tick(&mut state, &COAST, SIM_DT);

        assert!(!state.drain_events().contains(&GameEvent::BlockCollide));
        assert_eq!(state.collisions, 1);
        // Timer kept running instead of resetting
        let ShipState::Tumbling { elapsed: after } = state.ship.state else {
            panic!("expected tumble to continue");
        };
        assert!(after > elapsed);
    }

    #[test]
    fn test_relaunch_after_tumble_is_silent() {
        let wall = orbit_wall();
        let mut state = RunState::new(&level_with(vec![wall], vec![far_objective()]), 60.0);

        run_until_crash(&mut state);

        // Let the tumble run out; the ship parks in Idle
        for _ in 0..200 {
            tick(&mut state, &COAST, SIM_DT);
            if state.ship.state == ShipState::Idle {
                break;
            }
        }
        assert_eq!(state.ship.state, ShipState::Idle);
        state.drain_events();

        // Tapping again resumes flight without a second start event
        tick(&mut state, &STEER, SIM_DT);
        assert_eq!(state.ship.state, ShipState::Orbiting);
        assert!(!state.drain_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_objective_collected_on_contact() {
        let near = ObjectiveSpawn {
            // Top of the launch orbit
            pos: Vec2::new(900.0, 1600.0),
            color: 0x3366ff,
        };
        let mut state = RunState::new(&level_with(vec![], vec![near, far_objective()]), 60.0);

        tick(&mut state, &STEER, SIM_DT);
        let mut collected = None;
        for _ in 0..600 {
            tick(&mut state, &COAST, SIM_DT);
            let events = state.drain_events();
            if let Some(GameEvent::ObjectiveCollide { id, color }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::ObjectiveCollide { .. }))
            {
                collected = Some((*id, *color));
                break;
            }
        }
        assert_eq!(collected, Some((1, 0x3366ff)));
        assert_eq!(state.objectives.len(), 1);
        assert_eq!(state.indicators.len(), 1);
        assert_eq!(state.phase, RunPhase::Flying);
    }

    #[test]
    fn test_collecting_last_objective_clears_the_level() {
        let near = ObjectiveSpawn {
            pos: Vec2::new(900.0, 1600.0),
            color: 0x3366ff,
        };
        let mut state = RunState::new(&level_with(vec![], vec![near]), 60.0);

        tick(&mut state, &STEER, SIM_DT);
        let mut events = Vec::new();
        for _ in 0..600 {
            tick(&mut state, &COAST, SIM_DT);
            events.extend(state.drain_events());
            if state.phase != RunPhase::Flying {
                break;
            }
        }
        assert_eq!(state.phase, RunPhase::Cleared);
        assert!(events.contains(&GameEvent::LevelCleared));
        assert!(state.objectives.is_empty());
        assert!(state.indicators.is_empty());
    }

    #[test]
    fn test_countdown_warnings_and_time_up() {
        let mut state = RunState::new(&level_with(vec![], vec![far_objective()]), 12.0);

        let mut events = Vec::new();
        let dt = 0.25;
        for _ in 0..100 {
            tick(&mut state, &COAST, dt);
            events.extend(state.drain_events());
            if state.phase != RunPhase::Flying {
                break;
            }
        }

        assert_eq!(state.phase, RunPhase::Failed);
        assert_eq!(events.last(), Some(&GameEvent::TimeUp));

        // One warning per whole second from the threshold down to 1
        let warnings: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Warning { remaining_secs } => Some(*remaining_secs),
                _ => None,
            })
            .collect();
        assert_eq!(
            warnings,
            (1..=WARNING_THRESHOLD_SECS).rev().collect::<Vec<u32>>()
        );
    }

    #[test]
    fn test_terminal_phase_freezes_the_run() {
        let mut state = RunState::new(&level_with(vec![], vec![far_objective()]), 1.0);
        for _ in 0..10 {
            tick(&mut state, &COAST, 0.25);
            if state.phase != RunPhase::Flying {
                break;
            }
        }
        assert_eq!(state.phase, RunPhase::Failed);
        state.drain_events();

        let remaining = state.remaining;
        let elapsed = state.elapsed;
        tick(&mut state, &STEER, 0.25);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.remaining, remaining);
        assert_eq!(state.elapsed, elapsed);
    }

    #[test]
    fn test_safe_position_stays_clear_of_blocks() {
        // The wall sits across the orbit, so the ship crashes and recovers;
        // whatever happens, the recorded safe spot is never inside the wall
        let wall = Block::new(Vec2::new(900.0, 1570.0), Vec2::new(400.0, 60.0), 0.3);
        let mut state = RunState::new(&level_with(vec![wall], vec![far_objective()]), 60.0);

        tick(&mut state, &STEER, SIM_DT);
        for _ in 0..1200 {
            tick(&mut state, &COAST, SIM_DT);
            let safe = state.sensor.safe_position();
            assert!(!wall.overlaps_circle(safe, SHIP_RADIUS));
        }
    }
}
