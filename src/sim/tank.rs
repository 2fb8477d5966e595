//! Tank entity: body, mobility, weapon
//!
//! Player and enemy tanks share one struct. The variant only decides how
//! the velocity is chosen each frame (input vs. steering, see `steering.rs`)
//! and which side the tank's projectiles belong to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Vitals;
use super::obstacle::{Block, area_blocked};
use super::projectile::{Projectile, Side};
use super::rect::Rect;
use crate::clamp_to_arena;
use crate::consts::{BOUNDS_MARGIN, TANK_SIZE};
use crate::tuning::TankProfile;

/// Velocity and top speed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Mobility {
    pub vel: Vec2,
    pub speed: f32,
}

/// Attack capability: cooldown clock plus projectile payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    /// Seconds since the last successful shot
    pub cooldown_elapsed: f32,
    pub max_cooldown: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
}

impl Weapon {
    pub fn from_profile(profile: &TankProfile) -> Self {
        Self {
            cooldown_elapsed: 0.0,
            max_cooldown: profile.attack_cooldown,
            damage: profile.damage,
            projectile_speed: profile.projectile_speed,
            projectile_radius: profile.projectile_radius,
        }
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.cooldown_elapsed >= self.max_cooldown
    }
}

/// Enemy-only steering state
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyBrain {
    /// Time since the last attack attempt
    pub ai_timer: f32,
    /// Unit movement direction chosen by the steering step (or zero)
    pub target_dir: Vec2,
}

/// Tank variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TankKind {
    Player,
    Enemy(EnemyBrain),
}

/// A tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: u32,
    pub vitals: Vitals,
    pub mobility: Mobility,
    /// Facing in degrees (visual orientation only)
    pub facing: f32,
    pub weapon: Weapon,
    /// Square body side
    pub size: f32,
    pub kind: TankKind,
}

impl Tank {
    /// Player tank; `scale` grows the body
    pub fn player(id: u32, pos: Vec2, profile: &TankProfile, scale: f32) -> Self {
        Self::new(id, pos, profile, TANK_SIZE * scale, TankKind::Player)
    }

    pub fn enemy(id: u32, pos: Vec2, profile: &TankProfile) -> Self {
        Self::new(id, pos, profile, TANK_SIZE, TankKind::Enemy(EnemyBrain::default()))
    }

    fn new(id: u32, pos: Vec2, profile: &TankProfile, size: f32, kind: TankKind) -> Self {
        Self {
            id,
            vitals: Vitals::new(pos, profile.health),
            mobility: Mobility {
                vel: Vec2::ZERO,
                speed: profile.speed,
            },
            facing: 0.0,
            weapon: Weapon::from_profile(profile),
            size,
            kind,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.vitals.position
    }

    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        self.vitals.position = pos;
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.vitals.is_destroyed()
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, TankKind::Player)
    }

    pub fn side(&self) -> Side {
        match self.kind {
            TankKind::Player => Side::Player,
            TankKind::Enemy(_) => Side::Enemy,
        }
    }

    /// Body rectangle at the current position
    pub fn bounds(&self) -> Rect {
        self.bounds_at(self.pos())
    }

    /// Body rectangle if the tank were at `pos`
    pub fn bounds_at(&self, pos: Vec2) -> Rect {
        Rect::square(pos, self.size)
    }

    /// Inset from the arena edge that keeps the body visible
    pub fn bounds_margin(&self) -> f32 {
        (self.size * 0.5).max(BOUNDS_MARGIN)
    }

    pub fn clamp_to_arena(&self, pos: Vec2) -> Vec2 {
        clamp_to_arena(pos, self.bounds_margin())
    }

    /// Set velocity from a movement intent (scaled by speed)
    pub fn steer(&mut self, intent: Vec2) {
        self.mobility.vel = intent * self.mobility.speed;
    }

    /// Body at `pos` is free of blocking obstacles
    pub fn can_move_to(&self, pos: Vec2, blocks: &[Block]) -> bool {
        !area_blocked(blocks, &self.bounds_at(pos))
    }

    /// Next position from the velocity, clamped to the arena
    pub fn propose(&self, dt: f32) -> Vec2 {
        self.clamp_to_arena(self.pos() + self.mobility.vel * dt)
    }

    /// Apply velocity; a blocked proposal leaves the tank where it is.
    /// Returns whether the tank moved.
    pub fn update_movement(&mut self, dt: f32, blocks: &[Block]) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let next = self.propose(dt);
        if self.can_move_to(next, blocks) {
            self.set_pos(next);
            true
        } else {
            false
        }
    }

    /// Advance the weapon cooldown clock
    pub fn tick_cooldown(&mut self, dt: f32) {
        self.weapon.cooldown_elapsed += dt;
    }

    pub fn can_attack(&self) -> bool {
        self.weapon.ready()
    }

    /// Fire toward a point. Returns the new projectile, or None while cooling
    /// down or destroyed. The caller owns adding it to the world.
    pub fn attack(&mut self, target: Vec2) -> Option<Projectile> {
        if !self.can_attack() || self.is_destroyed() {
            return None;
        }
        self.weapon.cooldown_elapsed = 0.0;
        Some(Projectile::new(
            self.pos(),
            target - self.pos(),
            self.weapon.projectile_speed,
            self.weapon.damage,
            self.weapon.projectile_radius,
            self.side(),
        ))
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.vitals.take_damage(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::BlockKind;
    use crate::tuning::Tuning;

    fn player_at(x: f32, y: f32) -> Tank {
        Tank::player(1, Vec2::new(x, y), &Tuning::default().player, 1.0)
    }

    #[test]
    fn test_moves_with_velocity() {
        let mut tank = player_at(100.0, 100.0);
        tank.steer(Vec2::X);
        assert!(tank.update_movement(0.5, &[]));
        assert_eq!(tank.pos(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_clamped_to_arena() {
        let mut tank = player_at(30.0, 570.0);
        tank.steer(Vec2::new(-1.0, 1.0));
        tank.update_movement(1.0, &[]);
        assert_eq!(tank.pos(), Vec2::new(20.0, 580.0));
    }

    #[test]
    fn test_grown_body_uses_half_size_margin() {
        let tank = Tank::player(1, Vec2::ZERO, &Tuning::default().player, 2.0);
        assert_eq!(tank.size, 70.0);
        assert_eq!(tank.bounds_margin(), 35.0);
        assert_eq!(tank.clamp_to_arena(Vec2::new(0.0, 1000.0)), Vec2::new(35.0, 565.0));
    }

    #[test]
    fn test_blocked_by_wall_stays_put() {
        let tuning = Tuning::default();
        let wall = Block::new(Vec2::new(150.0, 100.0), BlockKind::Indestructible, &tuning);
        let mut tank = player_at(100.0, 100.0);
        tank.steer(Vec2::X);
        assert!(!tank.update_movement(0.1, &[wall]));
        assert_eq!(tank.pos(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_hazard_does_not_block() {
        let tuning = Tuning::default();
        let oil = Block::new(Vec2::new(150.0, 100.0), BlockKind::Hazard, &tuning);
        let mut tank = player_at(100.0, 100.0);
        tank.steer(Vec2::X);
        assert!(tank.update_movement(0.1, &[oil]));
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut tank = player_at(100.0, 100.0);
        assert!(tank.attack(Vec2::new(200.0, 100.0)).is_none());

        tank.tick_cooldown(0.3);
        let shot = tank.attack(Vec2::new(200.0, 100.0)).unwrap();
        assert_eq!(shot.owner, Side::Player);
        assert_eq!(shot.damage, 25.0);
        assert!((shot.vel - Vec2::new(600.0, 0.0)).length() < 1e-3);

        // Clock restarted
        assert!(!tank.can_attack());
        assert!(tank.attack(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_destroyed_tank_cannot_attack() {
        let mut tank = player_at(100.0, 100.0);
        tank.tick_cooldown(10.0);
        tank.take_damage(1000.0);
        assert!(tank.attack(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_attack_at_own_position_is_stationary() {
        let mut tank = Tank::enemy(2, Vec2::new(300.0, 300.0), &Tuning::default().enemy);
        tank.tick_cooldown(2.0);
        let shot = tank.attack(Vec2::new(300.0, 300.0)).unwrap();
        assert_eq!(shot.vel, Vec2::ZERO);
        assert_eq!(shot.owner, Side::Enemy);
    }
}
