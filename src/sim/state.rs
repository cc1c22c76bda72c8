//! Run state and core simulation types
//!
//! One `RunState` is one level attempt: the ship, its trailing sensor, the
//! static blocks, the surviving objectives with their paired indicators, and
//! the countdown against the player's own estimate.

use glam::Vec2;

use super::collision::{Block, ContactTracker};
use super::geometry::Rect;
use super::indicator::Indicator;
use super::sensor::SafeSensor;
use super::ship::Ship;
use crate::consts::*;
use crate::level::Level;

/// Phase of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Clock running, ship responsive
    Flying,
    /// Every objective collected before the clock ran out
    Cleared,
    /// The clock ran out first
    Failed,
}

/// A collectible objective
#[derive(Debug, Clone)]
pub struct Objective {
    pub id: u32,
    pub pos: Vec2,
    /// 0xRRGGBB tint, shared with the paired indicator
    pub color: u32,
}

/// Events emitted by the simulation, drained by the run loop each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// First steer input left Idle; the run is live
    Started,
    /// The ship crashed into a block (once per crash, debounced)
    BlockCollide,
    /// An objective was collected
    ObjectiveCollide { id: u32, color: u32 },
    /// Whole-seconds countdown warning
    Warning { remaining_secs: u32 },
    /// The estimate ran out; terminal
    TimeUp,
    /// All objectives collected; terminal
    LevelCleared,
}

/// Camera with a fixed view size, following a focus point within the world
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub size: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            size: Vec2::new(GAME_WIDTH, GAME_HEIGHT),
        }
    }

    /// World-space view rectangle centered on `focus`, clamped to the world
    /// bounds (the focus drifts off-center at the edges)
    pub fn view_rect(&self, focus: Vec2) -> Rect {
        let x = (focus.x - self.size.x / 2.0).clamp(0.0, WORLD_WIDTH - self.size.x);
        let y = (focus.y - self.size.y / 2.0).clamp(0.0, WORLD_HEIGHT - self.size.y);
        Rect::new(x, y, self.size.x, self.size.y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete state of one level attempt
#[derive(Debug)]
pub struct RunState {
    pub phase: RunPhase,
    pub ship: Ship,
    pub sensor: SafeSensor,
    pub blocks: Vec<Block>,
    /// Surviving objectives; `indicators[i]` belongs to `objectives[i]` and
    /// both are removed together
    pub objectives: Vec<Objective>,
    pub indicators: Vec<Indicator>,
    pub camera: Camera,
    /// Seconds left of the player's estimate
    pub remaining: f32,
    /// Elapsed run time in seconds
    pub elapsed: f32,
    /// Crashes this attempt
    pub collisions: u32,
    /// Whether the first launch already happened (the start event fires once,
    /// post-tumble relaunches stay silent)
    pub(super) started: bool,
    pub(super) ship_contacts: ContactTracker,
    pub(super) sensor_contacts: ContactTracker,
    events: Vec<GameEvent>,
}

impl RunState {
    /// Build a fresh attempt from a world-space level and the player's
    /// estimated time in seconds
    pub fn new(level: &Level, estimate_secs: f32) -> Self {
        let ship = Ship::new(level.ship_start);
        let sensor = SafeSensor::new(level.ship_start);
        let camera = Camera::new();

        let objectives: Vec<Objective> = level
            .objectives
            .iter()
            .enumerate()
            .map(|(i, spawn)| Objective {
                id: i as u32 + 1,
                pos: spawn.pos,
                color: spawn.color,
            })
            .collect();

        let view = camera.view_rect(ship.pos);
        let indicators = objectives
            .iter()
            .map(|o| {
                let mut ind = Indicator::new(o.color);
                ind.update(ship.pos, o.pos, &view);
                ind
            })
            .collect();

        Self {
            phase: RunPhase::Flying,
            ship,
            sensor,
            blocks: level.blocks.clone(),
            objectives,
            indicators,
            camera,
            remaining: estimate_secs,
            elapsed: 0.0,
            collisions: 0,
            started: false,
            ship_contacts: ContactTracker::new(),
            sensor_contacts: ContactTracker::new(),
            events: Vec::new(),
        }
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove an objective and its paired indicator, emitting the pickup event
    pub(super) fn collect_objective(&mut self, index: usize) {
        let objective = self.objectives.remove(index);
        self.indicators.remove(index);
        log::info!("objective {} collected", objective.id);
        self.push_event(GameEvent::ObjectiveCollide {
            id: objective.id,
            color: objective.color,
        });
    }
}
