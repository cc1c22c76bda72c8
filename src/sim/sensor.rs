//! Trailing safe-position sensor
//!
//! A collision-free probe that follows the ship with an inflated footprint
//! and remembers the last position where that footprint touched nothing.
//! Because the probe is larger than the ship, a position that was clear for
//! the probe is always clear for the ship, so a crashed ship can be snapped
//! there without re-colliding.

use glam::Vec2;

use crate::consts::{SAFE_ZONE_FACTOR, SHIP_RADIUS};

#[derive(Debug, Clone)]
pub struct SafeSensor {
    /// Current probe position (mirrors the ship, one tick behind)
    pub pos: Vec2,
    /// Last position recorded while the probe touched nothing
    safe_pos: Vec2,
    /// Number of obstacle contacts currently active
    contacts: u32,
}

impl SafeSensor {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            safe_pos: pos,
            contacts: 0,
        }
    }

    /// Probe footprint: the ship footprint inflated by the safety factor
    pub fn radius() -> f32 {
        SHIP_RADIUS * SAFE_ZONE_FACTOR
    }

    /// Contact-start notification from the collision pass
    pub fn contact_started(&mut self) {
        self.contacts += 1;
    }

    /// Contact-end notification from the collision pass
    pub fn contact_ended(&mut self) {
        if self.contacts == 0 {
            // An exit without a matching enter means the bookkeeping upstream
            // is off; drop it rather than wrapping
            log::warn!("sensor contact_ended without active contact");
            return;
        }
        self.contacts -= 1;
    }

    pub fn overlapping(&self) -> bool {
        self.contacts > 0
    }

    /// Once per tick: adopt the current position as the safe position, unless
    /// the probe is overlapping an obstacle (then the previous value stays,
    /// intentionally stale).
    pub fn record_if_clear(&mut self) {
        if !self.overlapping() {
            self.safe_pos = self.pos;
        }
    }

    /// Move the probe to the ship's position (called after the ship moves)
    pub fn follow(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn safe_position(&self) -> Vec2 {
        self.safe_pos
    }
}
