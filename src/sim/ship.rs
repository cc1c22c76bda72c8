//! Ship flight state machine
//!
//! The ship is always spinning. `Idle` spins in place waiting for the first
//! tap, `Orbiting` adds translation at a fixed linear speed (the constant
//! turn rate makes the path a circle of radius speed / turn-rate), and
//! `Tumbling` is the crash-recovery spin: fast rotation, no translation,
//! input ignored, position already snapped back to the last safe spot.

use glam::Vec2;

use crate::consts::*;
use crate::{facing_to_heading, normalize_angle};

/// Flight state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShipState {
    /// Spinning in place, waiting for the first input
    Idle,
    /// Flying along the orbit circle
    Orbiting,
    /// Crash recovery: fast spin, translation disabled
    Tumbling { elapsed: f32 },
}

/// What a steer input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerResponse {
    /// First input: left Idle without flipping the turn direction
    Launched,
    /// Turn direction flipped
    Reversed,
    /// Input dropped (tumbling)
    Ignored,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    /// Position in world coordinates
    pub pos: Vec2,
    /// Facing angle in radians (0 = up, clockwise-positive, y-down)
    pub facing: f32,
    /// Turn direction: +1 clockwise, -1 counter-clockwise
    pub turn_factor: f32,
    pub state: ShipState,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            facing: 0.0,
            turn_factor: 1.0,
            state: ShipState::Idle,
        }
    }

    /// Handle a steer (tap) input
    pub fn steer(&mut self) -> SteerResponse {
        match self.state {
            ShipState::Idle => {
                // The first input only starts the flight; the flip comes
                // with the second tap
                self.state = ShipState::Orbiting;
                SteerResponse::Launched
            }
            ShipState::Orbiting => {
                self.turn_factor = -self.turn_factor;
                log::debug!("direction reversed, turn_factor={}", self.turn_factor);
                SteerResponse::Reversed
            }
            ShipState::Tumbling { .. } => SteerResponse::Ignored,
        }
    }

    /// Enter the tumble spin after a crash.
    ///
    /// Position snaps to `safe_pos` and translation stops. Returns false when
    /// already tumbling: re-entrant crash contacts are dropped without
    /// resetting the timer.
    pub fn begin_tumble(&mut self, safe_pos: Vec2) -> bool {
        if matches!(self.state, ShipState::Tumbling { .. }) {
            return false;
        }
        self.pos = safe_pos;
        self.state = ShipState::Tumbling { elapsed: 0.0 };
        true
    }

    /// Current angular rate in radians/sec (sign carries the turn direction)
    pub fn turn_rate(&self) -> f32 {
        let rate = match self.state {
            ShipState::Tumbling { .. } => TUMBLE_TURN_RATE,
            _ => SHIP_TURN_RATE,
        };
        self.turn_factor * rate
    }

    /// Translation velocity for the current state.
    ///
    /// Only `Orbiting` translates: the facing angle converts to a math
    /// heading and the velocity is (speed·cos θ, −speed·sin θ), so the
    /// magnitude is the configured speed for every facing.
    pub fn velocity(&self) -> Vec2 {
        match self.state {
            ShipState::Orbiting => {
                let heading = facing_to_heading(self.facing);
                Vec2::new(SHIP_SPEED * heading.cos(), -SHIP_SPEED * heading.sin())
            }
            _ => Vec2::ZERO,
        }
    }

    /// Advance rotation, translation, and the tumble timer by `dt` seconds.
    ///
    /// The tumble exits on accumulated wall-clock time, not frame count.
    pub fn advance(&mut self, dt: f32) {
        self.facing = normalize_angle(self.facing + self.turn_rate() * dt);

        match self.state {
            ShipState::Orbiting => {
                self.pos += self.velocity() * dt;
            }
            ShipState::Tumbling { mut elapsed } => {
                elapsed += dt;
                self.state = if elapsed >= TUMBLE_DURATION {
                    ShipState::Idle
                } else {
                    ShipState::Tumbling { elapsed }
                };
            }
            ShipState::Idle => {}
        }
    }
}
