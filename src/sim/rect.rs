//! Axis-aligned rectangles for bodies, blocks and projectiles
//!
//! Every collision test in the game is a rectangle overlap test. Two
//! rectangles intersect only when they overlap by a positive amount on both
//! axes; rectangles that merely share an edge do not.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as min corner + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner (screen space)
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// Rectangle of the given size centered on a point
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Square centered on a point
    #[inline]
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::from_center(center, Vec2::splat(side))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Positive-area overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}
