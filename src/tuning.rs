//! Game balance numbers
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Loaded from a JSON file at startup; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stats shared by both tank variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankProfile {
    /// Movement speed (pixels/s)
    pub speed: f32,
    /// Starting and maximum health
    pub health: f32,
    /// Seconds between shots
    pub attack_cooldown: f32,
    /// Damage per projectile
    pub damage: f32,
    /// Projectile speed (pixels/s)
    pub projectile_speed: f32,
    /// Projectile radius
    pub projectile_radius: f32,
}

/// Game balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Tanks ===
    pub player: TankProfile,
    pub enemy: TankProfile,
    /// Player body growth per level past the first (1.0 + growth * (level - 1))
    pub player_growth_per_level: f32,

    // === Enemy AI ===
    /// Seconds between AI attack attempts
    pub ai_attack_interval: f32,
    /// Enemies only shoot when the player is closer than this
    pub detection_range: f32,
    /// Enemies retreat when closer than this
    pub min_distance: f32,
    /// Enemies approach when farther than this
    pub max_distance: f32,

    // === Obstacles ===
    pub destructible_health: f32,
    pub hazard_health: f32,
    pub indestructible_health: f32,
    /// Random destructible blocks added to every level layout
    pub random_blocks: u32,

    // === Spawning ===
    /// Seconds between spawn attempts at level 1
    pub spawn_interval: f32,
    /// Interval reduction per level
    pub spawn_interval_step: f32,
    /// Floor for the spawn interval
    pub min_spawn_interval: f32,
    /// Sampling attempts before accepting an imperfect spawn position
    pub spawn_attempts: u32,
    /// Spawns closer than this to the player are rejected
    pub spawn_min_player_distance: f32,

    // === Collisions ===
    /// Distance each tank is pushed apart per overlapping frame
    pub separation_push: f32,

    // === Scoring ===
    pub enemy_kill_score: u64,
    pub block_destroy_score: u64,
    pub level_bonus: u64,

    // === Levels ===
    /// Enemies to defeat on level 1
    pub base_enemies_to_defeat: u32,
    /// Extra enemies per level
    pub enemies_per_level: u32,
    /// Banner duration for ordinary levels (seconds)
    pub banner_duration: f32,
    /// Banner duration for the milestone levels (3 and 5)
    pub milestone_banner_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: TankProfile {
                speed: 200.0,
                health: 100.0,
                attack_cooldown: 0.3,
                damage: 25.0,
                projectile_speed: 600.0,
                projectile_radius: 6.0,
            },
            enemy: TankProfile {
                speed: 120.0,
                health: 100.0,
                attack_cooldown: 1.5,
                damage: 20.0,
                projectile_speed: 400.0,
                projectile_radius: 5.0,
            },
            player_growth_per_level: 0.5,

            ai_attack_interval: 2.0,
            detection_range: 300.0,
            min_distance: 100.0,
            max_distance: 150.0,

            destructible_health: 50.0,
            hazard_health: 1000.0,
            indestructible_health: 999_999.0,
            random_blocks: 20,

            spawn_interval: 3.0,
            spawn_interval_step: 0.2,
            min_spawn_interval: 1.0,
            spawn_attempts: 100,
            spawn_min_player_distance: 200.0,

            separation_push: 2.0,

            enemy_kill_score: 100,
            block_destroy_score: 5,
            level_bonus: 500,

            base_enemies_to_defeat: 5,
            enemies_per_level: 2,
            banner_duration: 2.0,
            milestone_banner_duration: 4.0,
        }
    }
}

impl Tuning {
    /// Enemy profile adjusted for a level (faster at 3+, faster and
    /// quicker to fire at 5+)
    pub fn enemy_for_level(&self, level: u32) -> TankProfile {
        let mut profile = self.enemy;
        if level >= 5 {
            profile.speed += 40.0;
            profile.attack_cooldown *= 0.7;
        } else if level >= 3 {
            profile.speed += 20.0;
        }
        profile
    }

    /// Player body scale for a level
    pub fn player_scale(&self, level: u32) -> f32 {
        1.0 + self.player_growth_per_level * level.saturating_sub(1) as f32
    }

    /// Number of kills required to clear a level
    pub fn enemies_to_defeat(&self, level: u32) -> u32 {
        self.base_enemies_to_defeat + level.saturating_sub(1) * self.enemies_per_level
    }

    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let tuning = Self::from_json(&json).map_err(|source| Error::Tuning {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }
}
