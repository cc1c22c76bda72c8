//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Wall-clock-delta timers, no frame counting
//! - No RNG
//! - Stable iteration order (objectives keep load order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod indicator;
pub mod sensor;
pub mod ship;
pub mod state;
pub mod tick;

pub use collision::{overlapping_blocks, Block, ContactDelta, ContactTracker};
pub use geometry::{
    segment_intersection, segment_rect_first_intersection, segment_rect_intersections, Rect,
};
pub use indicator::{place, Indicator, Placement};
pub use sensor::SafeSensor;
pub use ship::{Ship, ShipState, SteerResponse};
pub use state::{Camera, GameEvent, Objective, RunPhase, RunState};
pub use tick::{tick, TickInput};
