//! Rectangle and segment geometry for the camera view and indicators
//!
//! Screen convention throughout: y grows downward, rectangles are axis-aligned
//! with a top-left origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y-down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink the rectangle by `margin` on every side
    pub fn inset(&self, margin: f32) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }

    /// The four edges in the fixed traversal order: top, right, bottom, left.
    /// Intersection queries report points in this order.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let tl = Vec2::new(self.x, self.y);
        let tr = Vec2::new(self.right(), self.y);
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.x, self.bottom());
        [(tl, tr), (tr, br), (bl, br), (tl, bl)]
    }
}

/// Intersection point of two line segments, if any.
///
/// Parallel and collinear overlaps report no point; endpoint touches count.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);

    if denom.abs() < f32::EPSILON {
        return None;
    }

    let qp = b1 - a1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// All intersection points between a segment and a rectangle's boundary,
/// reported in edge order (top, right, bottom, left).
pub fn segment_rect_intersections(p1: Vec2, p2: Vec2, rect: &Rect) -> Vec<Vec2> {
    rect.edges()
        .iter()
        .filter_map(|&(e1, e2)| segment_intersection(p1, p2, e1, e2))
        .collect()
}

/// First intersection point between a segment and a rectangle's boundary
/// (edge order: top, right, bottom, left), or `None` if the segment misses
/// the boundary entirely.
pub fn segment_rect_first_intersection(p1: Vec2, p2: Vec2, rect: &Rect) -> Option<Vec2> {
    rect.edges()
        .iter()
        .find_map(|&(e1, e2)| segment_intersection(p1, p2, e1, e2))
}
