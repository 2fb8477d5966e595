//! Session state and core simulation types
//!
//! Everything the orchestrator owns for a match lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Block, generate_layout};
use super::projectile::{Projectile, Side};
use super::rect::Rect;
use super::tank::Tank;
use crate::consts::*;
use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Match ended (lost, or won all levels)
    GameOver,
    /// Controls screen
    Instructions,
}

/// How the last match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Defeat,
    Victory,
}

impl Outcome {
    /// Headline shown on the game-over screen
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Defeat => "GAME OVER",
            Outcome::Victory => "YOU WIN!",
        }
    }
}

/// Title menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuOption {
    Play,
    Instructions,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::Play, MenuOption::Instructions, MenuOption::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Play => "PLAY",
            MenuOption::Instructions => "INSTRUCTIONS",
            MenuOption::Quit => "QUIT",
        }
    }
}

/// Timed notification shown between levels (simulation frozen meanwhile)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBanner {
    pub title: String,
    pub hint: String,
    /// Seconds left on screen
    pub remaining: f32,
}

impl LevelBanner {
    /// Banner announcing `level`
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let (title, hint, duration) = match level {
            2 => (
                "LEVEL 2".to_string(),
                "After each round, your tank gets bigger.",
                tuning.banner_duration,
            ),
            3 => (
                "LEVEL 3: QUICK DEATH".to_string(),
                "Your enemy now moves faster.",
                tuning.milestone_banner_duration,
            ),
            5 => (
                "LEVEL 5: FINAL ROUND".to_string(),
                "They get even more aggressive!",
                tuning.milestone_banner_duration,
            ),
            n => (format!("Level {n}!"), "", tuning.banner_duration),
        };
        Self {
            title,
            hint: hint.to_string(),
            remaining: duration,
        }
    }
}

/// Things that happened during a tick, for audio and persistence glue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tank fired
    Shot { side: Side },
    /// Player took a hit
    PlayerHit,
    EnemyDestroyed,
    BlockDestroyed,
    /// Kill quota met; `level` is the level just cleared
    LevelCleared { level: u32 },
    /// A level's arena was built and play begins
    LevelStarted { level: u32 },
    Victory,
    GameOver,
    /// A finished match was entered into the high score list
    ScoreRecorded { score: u64, rank: Option<usize> },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for layouts and spawns
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// 1-based level
    pub level: u32,
    pub enemies_to_defeat: u32,
    pub enemies_defeated: u32,
    /// Seconds since the last spawn attempt
    pub spawn_timer: f32,
    /// Seconds between spawn attempts (shrinks per level)
    pub spawn_interval: f32,
    /// Level transition notification, if showing
    pub banner: Option<LevelBanner>,
    /// Set when a match has ended
    pub outcome: Outcome,
    /// Player slot (absent before the first level)
    pub player: Option<Tank>,
    pub enemies: Vec<Tank>,
    pub projectiles: Vec<Projectile>,
    pub blocks: Vec<Block>,
    /// Highlighted title menu entry
    pub menu_index: usize,
    /// Fire button state last frame (fire is edge-triggered)
    pub fire_was_held: bool,
    /// Set when the player picks Quit
    pub quit_requested: bool,
    pub high_scores: HighScores,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session at the title menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let rng = RngState::new(seed).to_rng();
        let spawn_interval = tuning.spawn_interval;
        Self {
            seed,
            rng,
            tuning,
            phase: GamePhase::Menu,
            score: 0,
            level: 1,
            enemies_to_defeat: 0,
            enemies_defeated: 0,
            spawn_timer: 0.0,
            spawn_interval,
            banner: None,
            outcome: Outcome::Defeat,
            player: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            blocks: Vec::new(),
            menu_index: 0,
            fire_was_held: false,
            quit_requested: false,
            high_scores: HighScores::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Attach a previously saved leaderboard
    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Resolve the player slot to a position enemies can steer at.
    /// None when there is no live player.
    pub fn player_target(&self) -> Option<Vec2> {
        self.player
            .as_ref()
            .filter(|p| !p.is_destroyed())
            .map(|p| p.pos())
    }

    pub fn player_alive(&self) -> bool {
        self.player_target().is_some()
    }

    /// Enemies not yet destroyed
    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_destroyed()).count()
    }

    /// Kills still needed this level
    pub fn enemies_left(&self) -> u32 {
        self.enemies_to_defeat.saturating_sub(self.enemies_defeated)
    }

    pub fn selected_menu_option(&self) -> MenuOption {
        MenuOption::ALL[self.menu_index.min(MenuOption::ALL.len() - 1)]
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset the match and start at level 1
    pub fn start_game(&mut self) {
        // The click/press that started the game must not also fire
        self.fire_was_held = true;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.level = 1;
        self.spawn_interval = self.tuning.spawn_interval;
        self.outcome = Outcome::Defeat;
        self.banner = None;
        log::info!("Starting new game (seed {})", self.seed);
        self.setup_level();
    }

    /// Build the arena for the current level: fresh player, cleared
    /// enemies and projectiles, new block layout, new kill quota
    pub fn setup_level(&mut self) {
        let start = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        let scale = self.tuning.player_scale(self.level);
        let id = self.next_entity_id();
        let player = Tank::player(id, start, &self.tuning.player, scale);

        let keep_clear = Rect::square(start, player.size);
        self.blocks = generate_layout(&mut self.rng, &self.tuning, &keep_clear);
        self.player = Some(player);
        self.enemies.clear();
        self.projectiles.clear();

        self.enemies_to_defeat = self.tuning.enemies_to_defeat(self.level);
        self.enemies_defeated = 0;
        self.spawn_timer = 0.0;

        log::info!(
            "Level {} ready: defeat {} enemies, spawn every {:.1}s",
            self.level,
            self.enemies_to_defeat,
            self.spawn_interval
        );
        self.push_event(GameEvent::LevelStarted { level: self.level });
    }

    /// Enter the finished match into the high score list
    pub fn record_score(&mut self) {
        let rank = self.high_scores.record(self.score);
        log::info!("Recorded score {} (rank {:?})", self.score, rank);
        self.push_event(GameEvent::ScoreRecorded {
            score: self.score,
            rank,
        });
    }

    /// Remove everything marked destroyed
    pub fn purge_destroyed(&mut self) {
        self.projectiles.retain(|p| !p.is_destroyed());
        self.enemies.retain(|e| !e.is_destroyed());
        self.blocks.retain(|b| !b.is_destroyed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_at_menu() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.player.is_none());
        assert!(state.player_target().is_none());
        assert_eq!(state.selected_menu_option(), MenuOption::Play);
    }

    #[test]
    fn test_start_game_builds_level_one() {
        let mut state = GameState::new(1, Tuning::default());
        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies_to_defeat, 5);
        assert_eq!(state.player_target(), Some(Vec2::new(100.0, 100.0)));
        assert_eq!(state.blocks.len(), 30);
        assert!(state.fire_was_held);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelStarted { level: 1 }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_player_start_never_inside_blocks() {
        for seed in 0..50 {
            let mut state = GameState::new(seed, Tuning::default());
            state.start_game();
            let player = state.player.as_ref().unwrap();
            assert!(
                player.can_move_to(player.pos(), &state.blocks),
                "seed {seed} spawned the player inside a block"
            );
        }
    }

    #[test]
    fn test_banner_text() {
        let tuning = Tuning::default();
        let b3 = LevelBanner::for_level(3, &tuning);
        assert_eq!(b3.title, "LEVEL 3: QUICK DEATH");
        assert_eq!(b3.remaining, 4.0);
        let b4 = LevelBanner::for_level(4, &tuning);
        assert_eq!(b4.title, "Level 4!");
        assert!(b4.hint.is_empty());
        assert_eq!(b4.remaining, 2.0);
    }

    #[test]
    fn test_arena_snapshot_survives_json() {
        let mut state = GameState::new(21, Tuning::default());
        state.start_game();
        let id = state.next_entity_id();
        let mut enemy = Tank::enemy(id, Vec2::new(500.0, 400.0), &state.tuning.enemy);
        enemy.tick_cooldown(2.0);
        state.projectiles.extend(enemy.attack(Vec2::new(100.0, 100.0)));
        state.enemies.push(enemy);
        state.blocks[0].take_damage(10.0);

        let json = serde_json::to_string(&(&state.player, &state.enemies, &state.projectiles))
            .unwrap();
        let (player, enemies, projectiles): (Option<Tank>, Vec<Tank>, Vec<Projectile>) =
            serde_json::from_str(&json).unwrap();
        let blocks: Vec<Block> =
            serde_json::from_str(&serde_json::to_string(&state.blocks).unwrap()).unwrap();

        assert_eq!(player.map(|p| p.pos()), state.player_target());
        assert_eq!(enemies[0].id, id);
        assert!(matches!(enemies[0].kind, crate::sim::tank::TankKind::Enemy(_)));
        assert_eq!(enemies[0].weapon.cooldown_elapsed, 0.0);
        assert_eq!(projectiles[0].owner, Side::Enemy);
        assert_eq!(projectiles[0].vel, state.projectiles[0].vel);
        assert_eq!(blocks[0].vitals.health(), 40.0);
        assert_eq!(blocks.len(), state.blocks.len());
    }

    #[test]
    fn test_rng_state_restores_sequence() {
        use rand::Rng;
        let saved: RngState =
            serde_json::from_str(&serde_json::to_string(&RngState::new(77)).unwrap()).unwrap();
        let mut restored = saved.to_rng();
        let mut fresh = RngState::new(77).to_rng();
        for _ in 0..4 {
            assert_eq!(restored.random::<u32>(), fresh.random::<u32>());
        }
    }

    #[test]
    fn test_purge_removes_only_destroyed() {
        let mut state = GameState::new(3, Tuning::default());
        state.start_game();
        let before = state.blocks.len();
        state.blocks[0].vitals.destroy();
        state.purge_destroyed();
        assert_eq!(state.blocks.len(), before - 1);
    }
}
