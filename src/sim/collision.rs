//! Overlap tests and contact bookkeeping for the static world
//!
//! Obstacles are static rotated rectangles; the ship, sensor, and objectives
//! are circles. Overlap is resolved by transforming the circle center into the
//! rectangle's local frame and clamping to its half-extents. Contact enter/exit
//! notifications come from diffing overlap sets between ticks, mirroring the
//! pair-wise start/end callbacks the original collision system fired.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A static rectangular obstacle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Block {
    /// Center position in world coordinates
    pub center: Vec2,
    /// Half width / half height
    pub half_extents: Vec2,
    /// Rotation in radians (clockwise-positive, y-down)
    pub angle: f32,
}

impl Block {
    pub fn new(center: Vec2, size: Vec2, angle: f32) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
            angle,
        }
    }

    /// Whether a circle overlaps this block
    pub fn overlaps_circle(&self, circle_center: Vec2, radius: f32) -> bool {
        // Rotate the circle center into the block's local frame
        let rel = circle_center - self.center;
        let (sin, cos) = (-self.angle).sin_cos();
        let local = Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);

        // Closest point on the rectangle to the circle center
        let clamped = local.clamp(-self.half_extents, self.half_extents);
        (local - clamped).length_squared() <= radius * radius
    }
}

/// Indices of all blocks a circle currently overlaps, in block order
pub fn overlapping_blocks(blocks: &[Block], center: Vec2, radius: f32) -> Vec<usize> {
    blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.overlaps_circle(center, radius))
        .map(|(i, _)| i)
        .collect()
}

/// Tracks which blocks a body touched last tick and reports enter/exit sets
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    current: Vec<usize>,
}

/// Enter/exit sets produced by one contact pass
#[derive(Debug, Clone, Default)]
pub struct ContactDelta {
    pub entered: Vec<usize>,
    pub exited: Vec<usize>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the overlap set with `now` and report what changed.
    /// Both sets are expected sorted (as produced by `overlapping_blocks`).
    pub fn update(&mut self, now: Vec<usize>) -> ContactDelta {
        let entered = now
            .iter()
            .copied()
            .filter(|i| !self.current.contains(i))
            .collect();
        let exited = self
            .current
            .iter()
            .copied()
            .filter(|i| !now.contains(i))
            .collect();
        self.current = now;
        ContactDelta { entered, exited }
    }

    pub fn touching(&self) -> &[usize] {
        &self.current
    }
}
