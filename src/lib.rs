//! Orbit Courier - a one-tap orbital arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship state machine, sensor, indicators)
//! - `level`: JSON level format and world-coordinate scaling
//! - `score`: Time-estimation scoring formulas
//! - `session`: Level progression and cumulative score
//! - `events`: Typed event dispatcher for the run loop

pub mod events;
pub mod level;
pub mod score;
pub mod session;
pub mod sim;

pub use score::{ScoreState, ScoringConfig};
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth movement)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Visible game area (the camera view)
    pub const GAME_WIDTH: f32 = 540.0;
    pub const GAME_HEIGHT: f32 = 1140.0;

    /// World size as a multiple of the game area
    pub const WORLD_FACTOR: f32 = 3.0;
    pub const WORLD_WIDTH: f32 = GAME_WIDTH * WORLD_FACTOR;
    pub const WORLD_HEIGHT: f32 = GAME_HEIGHT * WORLD_FACTOR;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 180.0; // pixels/sec
    pub const SHIP_TURN_RATE: f32 = 1.8; // radians/sec; orbit radius = SPEED / TURN_RATE = 100 px
    pub const SHIP_RADIUS: f32 = 16.0;

    /// Crash recovery
    pub const TUMBLE_DURATION: f32 = 0.5; // seconds
    pub const TUMBLE_ROTATION_FACTOR: f32 = 20.0;
    pub const TUMBLE_TURN_RATE: f32 = SHIP_TURN_RATE * TUMBLE_ROTATION_FACTOR;
    /// Sensor footprint = ship footprint inflated by this factor
    pub const SAFE_ZONE_FACTOR: f32 = 1.3;

    /// Objective pickup radius
    pub const OBJECTIVE_RADIUS: f32 = 20.0;

    /// Indicator distance from the view boundary (relative to game width)
    pub const INDICATOR_DISTANCE: f32 = 0.05;

    /// Countdown warnings start at this many whole seconds remaining
    pub const WARNING_THRESHOLD_SECS: u32 = 10;

    /// Scoring defaults
    pub const PAR_TIME_POINTS: i64 = 1000;
    pub const ZERO_POINT_TIME_FACTOR: f64 = 2.0;
    pub const COLLISION_PENALTY: i64 = 100;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Facing convention: 0 = glyph-up, clockwise-positive in y-down screen space.
/// Converts a facing angle to the counter-clockwise math angle used for
/// velocity components.
#[inline]
pub fn facing_to_heading(facing: f32) -> f32 {
    std::f32::consts::FRAC_PI_2 - facing
}
