//! Enemy steering: compass quantization, stand-off distance policy,
//! timed attacks and the obstacle-avoidance search.
//!
//! Enemies never move in arbitrary directions. The raw bearing to the player
//! is snapped to a fixed compass, and when that heading is blocked the search
//! walks outward through the same compass until it finds a free heading.

use glam::Vec2;

use super::obstacle::Block;
use super::projectile::Projectile;
use super::tank::{Tank, TankKind};
use crate::tuning::Tuning;
use crate::{angle_degrees, direction_from_degrees};

/// Allowed movement headings in degrees.
///
/// Order matters: ties in [`nearest_compass_index`] go to the earlier entry,
/// and the avoidance search walks neighbours by index in this order.
pub const COMPASS: [f32; 10] = [30.0, 45.0, -45.0, 90.0, -90.0, 135.0, -135.0, 0.0, 180.0, -180.0];

/// Index of the compass heading closest to `degrees` (first minimum wins)
pub fn nearest_compass_index(degrees: f32) -> usize {
    let mut best = 0;
    let mut best_diff = (degrees - COMPASS[0]).abs();
    for (i, &heading) in COMPASS.iter().enumerate().skip(1) {
        let diff = (degrees - heading).abs();
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }
    best
}

/// Snap an angle to the compass
#[inline]
pub fn quantize_angle(degrees: f32) -> f32 {
    COMPASS[nearest_compass_index(degrees)]
}

/// Choose an enemy's velocity and maybe fire.
///
/// `target` is the player's position, or None when there is no live player
/// (the enemy then idles). Returns a projectile if the enemy fired.
pub fn update_enemy_ai(
    tank: &mut Tank,
    target: Option<Vec2>,
    dt: f32,
    tuning: &Tuning,
) -> Option<Projectile> {
    let TankKind::Enemy(mut brain) = tank.kind else {
        return None;
    };
    if tank.is_destroyed() {
        return None;
    }

    let Some(target) = target else {
        brain.target_dir = Vec2::ZERO;
        tank.mobility.vel = Vec2::ZERO;
        tank.kind = TankKind::Enemy(brain);
        return None;
    };

    brain.ai_timer += dt;

    let to_target = target - tank.pos();
    let distance = to_target.length();

    brain.target_dir = if distance > 0.0 {
        let raw = angle_degrees(to_target);
        tank.facing = raw;
        let heading = direction_from_degrees(quantize_angle(raw));

        if distance > tuning.max_distance {
            heading
        } else if distance < tuning.min_distance {
            -heading
        } else {
            Vec2::ZERO
        }
    } else {
        Vec2::ZERO
    };
    tank.mobility.vel = brain.target_dir * tank.mobility.speed;

    let mut shot = None;
    if brain.ai_timer >= tuning.ai_attack_interval && distance < tuning.detection_range {
        shot = tank.attack(target);
        brain.ai_timer = 0.0;
    }

    tank.kind = TankKind::Enemy(brain);
    shot
}

/// Move an enemy, searching the compass for a free heading when blocked.
///
/// Returns false if every heading was blocked; the enemy then stalls with
/// zero velocity until the next frame.
pub fn update_enemy_movement(tank: &mut Tank, dt: f32, blocks: &[Block]) -> bool {
    if tank.is_destroyed() {
        return false;
    }
    let TankKind::Enemy(mut brain) = tank.kind else {
        return tank.update_movement(dt, blocks);
    };

    let next = tank.propose(dt);
    if tank.can_move_to(next, blocks) {
        tank.set_pos(next);
        return true;
    }

    let start = nearest_compass_index(angle_degrees(brain.target_dir));
    match avoidance_search(tank, start, dt, blocks) {
        Some((dir, pos)) => {
            brain.target_dir = dir;
            tank.mobility.vel = dir * tank.mobility.speed;
            tank.set_pos(pos);
            tank.kind = TankKind::Enemy(brain);
            true
        }
        None => {
            tank.mobility.vel = Vec2::ZERO;
            false
        }
    }
}

/// Probe compass neighbours of `start` (-1, +1, -2, +2, ...) for a heading
/// whose next position is clear. Returns the heading and that position.
pub fn avoidance_search(
    tank: &Tank,
    start: usize,
    dt: f32,
    blocks: &[Block],
) -> Option<(Vec2, Vec2)> {
    let n = COMPASS.len();
    for offset in 1..n {
        for idx in [(start + n - offset) % n, (start + offset) % n] {
            let dir = direction_from_degrees(COMPASS[idx]);
            let pos = tank.clamp_to_arena(tank.pos() + dir * tank.mobility.speed * dt);
            if tank.can_move_to(pos, blocks) {
                return Some((dir, pos));
            }
        }
    }
    None
}
