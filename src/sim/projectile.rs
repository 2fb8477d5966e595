//! Projectiles fired by tanks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Vitals;
use super::rect::Rect;
use crate::inside_arena;

/// Which side fired a projectile (and which side a tank fights for)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// A straight-line projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub vitals: Vitals,
    pub vel: Vec2,
    pub damage: f32,
    pub radius: f32,
    pub owner: Side,
}

impl Projectile {
    /// Create a projectile heading toward `direction` at `speed`.
    /// A zero-length direction yields a stationary projectile.
    pub fn new(
        pos: Vec2,
        direction: Vec2,
        speed: f32,
        damage: f32,
        radius: f32,
        owner: Side,
    ) -> Self {
        Self {
            vitals: Vitals::new(pos, 1.0),
            vel: direction.normalize_or_zero() * speed,
            damage,
            radius,
            owner,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.vitals.position
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.vitals.is_destroyed()
    }

    #[inline]
    pub fn from_player(&self) -> bool {
        self.owner == Side::Player
    }

    /// Bounding box of the projectile circle
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos(), self.radius * 2.0)
    }

    /// Advance along the velocity; leaving the arena destroys the projectile
    pub fn advance(&mut self, dt: f32) {
        if self.is_destroyed() {
            return;
        }
        self.vitals.position += self.vel * dt;
        if !inside_arena(self.vitals.position) {
            self.vitals.destroy();
        }
    }
}
