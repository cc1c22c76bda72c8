//! Level file format and world-coordinate scaling
//!
//! Level files store fractional coordinates relative to the world bounds, so
//! the same layout works at any world size. Block rotations are stored in
//! degrees (the authoring convention) and converted to radians on load. The
//! inverse conversion exists for the authoring side, which works in absolute
//! world coordinates and normalizes back to fractions on save.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::Block;

/// Why a level failed to load
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Validation(String),
}

/// Ship start in the level file (fractional)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipData {
    pub x: f32,
    pub y: f32,
}

/// One obstacle in the level file (fractional position/size, degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlockData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
}

/// One objective in the level file (fractional position, 0xRRGGBB color)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObjectiveData {
    pub x: f32,
    pub y: f32,
    pub color: u32,
}

/// The level file as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub ship: ShipData,
    pub blocks: Vec<BlockData>,
    pub objectives: Vec<ObjectiveData>,
}

/// An objective spawn point in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveSpawn {
    pub pos: Vec2,
    pub color: u32,
}

/// A level scaled into world coordinates, immutable during a run
#[derive(Debug, Clone)]
pub struct Level {
    pub ship_start: Vec2,
    pub blocks: Vec<Block>,
    pub objectives: Vec<ObjectiveSpawn>,
}

impl LevelData {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let data: LevelData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.objectives.is_empty() {
            return Err(LevelError::Validation("no objectives".into()));
        }

        let fraction = |v: f32| (0.0..=1.0).contains(&v);
        if !fraction(self.ship.x) || !fraction(self.ship.y) {
            return Err(LevelError::Validation(format!(
                "ship start ({}, {}) outside the unit square",
                self.ship.x, self.ship.y
            )));
        }
        for (i, b) in self.blocks.iter().enumerate() {
            if !fraction(b.x) || !fraction(b.y) {
                return Err(LevelError::Validation(format!("block {i} outside the unit square")));
            }
            if b.width <= 0.0 || b.height <= 0.0 {
                return Err(LevelError::Validation(format!("block {i} has non-positive size")));
            }
        }
        for (i, o) in self.objectives.iter().enumerate() {
            if !fraction(o.x) || !fraction(o.y) {
                return Err(LevelError::Validation(format!(
                    "objective {i} outside the unit square"
                )));
            }
        }
        Ok(())
    }

    /// Scale fractional coordinates into world space
    pub fn to_world(&self) -> Level {
        let world = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);

        Level {
            ship_start: Vec2::new(self.ship.x, self.ship.y) * world,
            blocks: self
                .blocks
                .iter()
                .map(|b| {
                    Block::new(
                        Vec2::new(b.x, b.y) * world,
                        Vec2::new(b.width * WORLD_WIDTH, b.height * WORLD_HEIGHT),
                        b.angle.to_radians(),
                    )
                })
                .collect(),
            objectives: self
                .objectives
                .iter()
                .map(|o| ObjectiveSpawn {
                    pos: Vec2::new(o.x, o.y) * world,
                    color: o.color,
                })
                .collect(),
        }
    }

    /// Normalize a world-space level back to the fractional file format (the
    /// authoring direction)
    pub fn from_world(level: &Level) -> Self {
        Self {
            ship: ShipData {
                x: level.ship_start.x / WORLD_WIDTH,
                y: level.ship_start.y / WORLD_HEIGHT,
            },
            blocks: level
                .blocks
                .iter()
                .map(|b| BlockData {
                    x: b.center.x / WORLD_WIDTH,
                    y: b.center.y / WORLD_HEIGHT,
                    width: b.half_extents.x * 2.0 / WORLD_WIDTH,
                    height: b.half_extents.y * 2.0 / WORLD_HEIGHT,
                    angle: b.angle.to_degrees(),
                })
                .collect(),
            objectives: level
                .objectives
                .iter()
                .map(|o| ObjectiveData {
                    x: o.pos.x / WORLD_WIDTH,
                    y: o.pos.y / WORLD_HEIGHT,
                    color: o.color,
                })
                .collect(),
        }
    }
}

/// Read, parse, validate, and scale a level file
pub fn load_level(path: impl AsRef<Path>) -> Result<Level, LevelError> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let data = LevelData::from_json_str(&json)?;
    log::info!(
        "loaded level {:?}: {} blocks, {} objectives",
        path.as_ref(),
        data.blocks.len(),
        data.objectives.len()
    );
    Ok(data.to_world())
}
