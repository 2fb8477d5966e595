//! Terrain blocks and level layout generation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Vitals;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// Trees: block movement and shots, can be shot down
    #[default]
    Destructible,
    /// Oil/water: decorative, never blocks anything
    Hazard,
    /// Walls: block everything, ignore damage
    Indestructible,
}

/// A square terrain block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub vitals: Vitals,
    pub kind: BlockKind,
    /// Visual damage level (1.0 = pristine), only changes for destructible blocks
    pub shade: f32,
}

impl Block {
    pub fn new(pos: Vec2, kind: BlockKind, tuning: &Tuning) -> Self {
        let health = match kind {
            BlockKind::Destructible => tuning.destructible_health,
            BlockKind::Hazard => tuning.hazard_health,
            BlockKind::Indestructible => tuning.indestructible_health,
        };
        Self {
            vitals: Vitals::new(pos, health),
            kind,
            shade: 1.0,
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

    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos(), BLOCK_SIZE)
    }

    /// Whether this block stops tanks and projectiles
    pub fn blocking(&self) -> bool {
        !self.is_destroyed()
            && matches!(self.kind, BlockKind::Destructible | BlockKind::Indestructible)
    }

    /// Only destructible blocks lose health
    pub fn take_damage(&mut self, amount: f32) {
        if self.kind == BlockKind::Destructible {
            self.vitals.take_damage(amount);
        }
    }

    /// Refresh the damage shade from current health
    pub fn update(&mut self, _dt: f32) {
        if self.kind == BlockKind::Destructible && self.vitals.health() > 0.0 {
            self.shade = self.vitals.health_ratio();
        }
    }
}

/// True if any live blocking block overlaps the rectangle
pub fn area_blocked(blocks: &[Block], area: &Rect) -> bool {
    blocks
        .iter()
        .any(|b| b.blocking() && area.intersects(&b.bounds()))
}

/// Hand-placed cover that appears on every level
const FIXED_LAYOUT: [(f32, f32, BlockKind); 10] = [
    (280.0, 240.0, BlockKind::Destructible),
    (320.0, 200.0, BlockKind::Destructible),
    (440.0, 400.0, BlockKind::Destructible),
    (400.0, 440.0, BlockKind::Destructible),
    (200.0, 200.0, BlockKind::Indestructible),
    (240.0, 200.0, BlockKind::Indestructible),
    (600.0, 400.0, BlockKind::Indestructible),
    (640.0, 400.0, BlockKind::Indestructible),
    (400.0, 300.0, BlockKind::Hazard),
    (440.0, 300.0, BlockKind::Hazard),
];

/// Tries per random block before accepting a spot over the player start
const LAYOUT_ATTEMPTS: u32 = 20;

/// Build a level's blocks: random destructible trees plus the fixed cover.
///
/// Random trees avoid the player's starting body (`keep_clear`) so the player
/// is never spawned wedged inside a tree.
pub fn generate_layout<R: Rng>(rng: &mut R, tuning: &Tuning, keep_clear: &Rect) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(tuning.random_blocks as usize + FIXED_LAYOUT.len());

    for _ in 0..tuning.random_blocks {
        let mut pos = random_block_pos(rng);
        for _ in 1..LAYOUT_ATTEMPTS {
            if !Rect::square(pos, BLOCK_SIZE).intersects(keep_clear) {
                break;
            }
            pos = random_block_pos(rng);
        }
        blocks.push(Block::new(pos, BlockKind::Destructible, tuning));
    }

    for (x, y, kind) in FIXED_LAYOUT {
        blocks.push(Block::new(Vec2::new(x, y), kind, tuning));
    }

    log::debug!("Generated layout with {} blocks", blocks.len());
    blocks
}

fn random_block_pos<R: Rng>(rng: &mut R) -> Vec2 {
    let x = 100 + rng.random_range(0..(ARENA_WIDTH as u32 - 200));
    let y = 100 + rng.random_range(0..(ARENA_HEIGHT as u32 - 200));
    Vec2::new(x as f32, y as f32)
}
