//! Shared lifecycle record for every simulated object

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, health and the destroyed flag.
///
/// Destruction is one-way: once `destroyed` is set nothing clears it. Raw
/// health may go below zero; only [`Vitals::health_ratio`] is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub position: Vec2,
    health: f32,
    max_health: f32,
    destroyed: bool,
}

impl Vitals {
    pub fn new(position: Vec2, health: f32) -> Self {
        Self {
            position,
            health,
            max_health: health,
            destroyed: false,
        }
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Health as a fraction of max, clamped to [0, 1] for display
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Subtract damage; destroyed once health reaches zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
        if self.health <= 0.0 {
            self.destroyed = true;
        }
    }

    /// Mark destroyed regardless of health
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}
