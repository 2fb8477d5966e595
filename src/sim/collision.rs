//! Collision detection and response
//!
//! Resolution runs in a fixed order every frame:
//! 1. projectiles against blocks
//! 2. surviving projectiles against the opposing side
//! 3. overlapping player/enemy bodies pushed apart
//!
//! Nothing is removed here. Destroyed entities stay in their collections,
//! inert, until the purge at the end of the frame.

use glam::Vec2;

use super::obstacle::Block;
use super::projectile::{Projectile, Side};
use super::tank::Tank;

/// What the collision pass changed this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Destructible blocks shot down
    pub blocks_destroyed: u32,
    /// Enemy tanks killed by player fire
    pub enemies_destroyed: u32,
    /// Enemy projectiles that hit the player
    pub player_hits: u32,
}

/// Run all three phases in order
pub fn resolve_collisions(
    projectiles: &mut [Projectile],
    blocks: &mut [Block],
    player: Option<&mut Tank>,
    enemies: &mut [Tank],
    separation_push: f32,
) -> CollisionReport {
    let blocks_destroyed = projectiles_vs_blocks(projectiles, blocks);
    let mut player = player;
    let (enemies_destroyed, player_hits) =
        projectiles_vs_tanks(projectiles, player.as_deref_mut(), enemies);
    if let Some(player) = player {
        separate_tanks(player, enemies, separation_push);
    }
    CollisionReport {
        blocks_destroyed,
        enemies_destroyed,
        player_hits,
    }
}

/// Each live projectile stops at the first blocking block it overlaps.
/// Non-blocking blocks let it through. Returns how many blocks broke.
pub fn projectiles_vs_blocks(projectiles: &mut [Projectile], blocks: &mut [Block]) -> u32 {
    let mut destroyed = 0;
    for projectile in projectiles.iter_mut() {
        if projectile.is_destroyed() {
            continue;
        }
        let bounds = projectile.bounds();
        for block in blocks.iter_mut() {
            if block.is_destroyed() || !block.blocking() {
                continue;
            }
            if bounds.intersects(&block.bounds()) {
                block.take_damage(projectile.damage);
                projectile.vitals.destroy();
                if block.is_destroyed() {
                    destroyed += 1;
                }
                break;
            }
        }
    }
    destroyed
}

/// Player fire against enemies, enemy fire against the player.
/// First overlapping target takes the hit. Returns (enemies killed, player hits).
pub fn projectiles_vs_tanks(
    projectiles: &mut [Projectile],
    mut player: Option<&mut Tank>,
    enemies: &mut [Tank],
) -> (u32, u32) {
    let mut kills = 0;
    let mut player_hits = 0;

    for projectile in projectiles.iter_mut() {
        if projectile.is_destroyed() {
            continue;
        }
        let bounds = projectile.bounds();

        match projectile.owner {
            Side::Player => {
                let target = enemies
                    .iter_mut()
                    .find(|e| !e.is_destroyed() && bounds.intersects(&e.bounds()));
                if let Some(enemy) = target {
                    enemy.take_damage(projectile.damage);
                    projectile.vitals.destroy();
                    if enemy.is_destroyed() {
                        kills += 1;
                        log::debug!("Enemy {} destroyed", enemy.id);
                    }
                }
            }
            Side::Enemy => {
                if let Some(player) = player.as_deref_mut() {
                    if !player.is_destroyed() && bounds.intersects(&player.bounds()) {
                        player.take_damage(projectile.damage);
                        projectile.vitals.destroy();
                        player_hits += 1;
                    }
                }
            }
        }
    }

    (kills, player_hits)
}

/// Push each overlapping live enemy and the player apart along the line
/// between their centers, then clamp both back into the arena.
/// Coincident centers have no defined axis and are left alone.
pub fn separate_tanks(player: &mut Tank, enemies: &mut [Tank], push: f32) {
    if player.is_destroyed() {
        return;
    }
    for enemy in enemies.iter_mut() {
        if enemy.is_destroyed() || !player.bounds().intersects(&enemy.bounds()) {
            continue;
        }
        let delta = player.pos() - enemy.pos();
        let distance = delta.length();
        if distance <= 0.0 {
            continue;
        }
        let offset: Vec2 = delta / distance * push;
        let player_pos = player.clamp_to_arena(player.pos() + offset);
        let enemy_pos = enemy.clamp_to_arena(enemy.pos() - offset);
        player.set_pos(player_pos);
        enemy.set_pos(enemy_pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::BlockKind;
    use crate::tuning::Tuning;

    fn shot(x: f32, y: f32, owner: Side, damage: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), Vec2::X, 0.0, damage, 5.0, owner)
    }

    fn enemy(id: u32, x: f32, y: f32) -> Tank {
        Tank::enemy(id, Vec2::new(x, y), &Tuning::default().enemy)
    }

    fn player(x: f32, y: f32) -> Tank {
        Tank::player(0, Vec2::new(x, y), &Tuning::default().player, 1.0)
    }

    #[test]
    fn test_block_takes_hit_before_enemy() {
        let tuning = Tuning::default();
        let mut blocks = vec![Block::new(
            Vec2::new(300.0, 300.0),
            BlockKind::Destructible,
            &tuning,
        )];
        let mut enemies = vec![enemy(1, 310.0, 300.0)];
        let mut projectiles = vec![shot(300.0, 300.0, Side::Player, 25.0)];

        let report = resolve_collisions(&mut projectiles, &mut blocks, None, &mut enemies, 2.0);

        assert!(projectiles[0].is_destroyed());
        assert_eq!(blocks[0].vitals.health(), 25.0);
        assert_eq!(enemies[0].vitals.health(), 100.0);
        assert_eq!(report, CollisionReport::default());
    }

    #[test]
    fn test_hazard_lets_projectile_through() {
        let tuning = Tuning::default();
        let mut blocks = vec![Block::new(Vec2::new(300.0, 300.0), BlockKind::Hazard, &tuning)];
        let mut enemies = vec![enemy(1, 300.0, 300.0)];
        let mut projectiles = vec![shot(300.0, 300.0, Side::Player, 25.0)];

        resolve_collisions(&mut projectiles, &mut blocks, None, &mut enemies, 2.0);

        assert!(projectiles[0].is_destroyed());
        assert_eq!(enemies[0].vitals.health(), 75.0);
    }

    #[test]
    fn test_block_destroyed_counted_once() {
        let tuning = Tuning::default();
        let mut blocks = vec![Block::new(
            Vec2::new(300.0, 300.0),
            BlockKind::Destructible,
            &tuning,
        )];
        let mut projectiles = vec![
            shot(300.0, 300.0, Side::Player, 50.0),
            shot(301.0, 300.0, Side::Player, 50.0),
        ];

        let broken = projectiles_vs_blocks(&mut projectiles, &mut blocks);
        assert_eq!(broken, 1);
        assert!(projectiles[0].is_destroyed());
        // Second shot passes the broken block
        assert!(!projectiles[1].is_destroyed());
    }

    #[test]
    fn test_wall_absorbs_without_score() {
        let tuning = Tuning::default();
        let mut blocks = vec![Block::new(
            Vec2::new(300.0, 300.0),
            BlockKind::Indestructible,
            &tuning,
        )];
        let mut projectiles = vec![shot(300.0, 300.0, Side::Enemy, 20.0)];
        assert_eq!(projectiles_vs_blocks(&mut projectiles, &mut blocks), 0);
        assert!(projectiles[0].is_destroyed());
        assert!(!blocks[0].is_destroyed());
    }

    #[test]
    fn test_projectile_hits_first_enemy_only() {
        let mut enemies = vec![enemy(1, 300.0, 300.0), enemy(2, 305.0, 300.0)];
        let mut projectiles = vec![shot(302.0, 300.0, Side::Player, 100.0)];

        let (kills, hits) = projectiles_vs_tanks(&mut projectiles, None, &mut enemies);
        assert_eq!((kills, hits), (1, 0));
        assert!(enemies[0].is_destroyed());
        assert_eq!(enemies[1].vitals.health(), 100.0);
    }

    #[test]
    fn test_kill_counted_once_for_overlapping_shots() {
        let mut enemies = vec![enemy(1, 300.0, 300.0)];
        let mut projectiles = vec![
            shot(300.0, 300.0, Side::Player, 100.0),
            shot(300.0, 300.0, Side::Player, 100.0),
        ];
        let (kills, _) = projectiles_vs_tanks(&mut projectiles, None, &mut enemies);
        assert_eq!(kills, 1);
        assert!(!projectiles[1].is_destroyed());
    }

    #[test]
    fn test_no_friendly_fire() {
        let mut p = player(300.0, 300.0);
        let mut enemies = vec![enemy(1, 300.0, 300.0)];
        let mut projectiles = vec![
            shot(300.0, 300.0, Side::Player, 25.0),
            shot(300.0, 300.0, Side::Enemy, 20.0),
        ];
        let (kills, hits) = projectiles_vs_tanks(&mut projectiles, Some(&mut p), &mut enemies);
        assert_eq!((kills, hits), (0, 1));
        assert_eq!(p.vitals.health(), 80.0);
        assert_eq!(enemies[0].vitals.health(), 75.0);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let mut p = player(300.0, 300.0);
        let mut enemies = vec![enemy(1, 320.0, 300.0)];
        separate_tanks(&mut p, &mut enemies, 2.0);
        assert_eq!(p.pos(), Vec2::new(298.0, 300.0));
        assert_eq!(enemies[0].pos(), Vec2::new(322.0, 300.0));
    }

    #[test]
    fn test_separation_skips_coincident_centers() {
        let mut p = player(300.0, 300.0);
        let mut enemies = vec![enemy(1, 300.0, 300.0)];
        separate_tanks(&mut p, &mut enemies, 2.0);
        assert_eq!(p.pos(), Vec2::new(300.0, 300.0));
        assert_eq!(enemies[0].pos(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_separation_reclamps() {
        let mut p = player(20.0, 300.0);
        let mut enemies = vec![enemy(1, 30.0, 300.0)];
        separate_tanks(&mut p, &mut enemies, 2.0);
        assert_eq!(p.pos(), Vec2::new(20.0, 300.0));
        assert_eq!(enemies[0].pos(), Vec2::new(32.0, 300.0));
    }
}
