//! Per-frame simulation step
//!
//! Applies discrete input events to the phase machine, then runs the
//! gameplay pipeline when the session is actively playing.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::obstacle::area_blocked;
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState, LevelBanner, MenuOption, Outcome};
use super::steering::{update_enemy_ai, update_enemy_movement};
use super::tank::Tank;
use crate::consts::*;
use crate::{angle_degrees, direction_from_degrees};

/// Discrete input events (key presses and clicks)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Menu selection up
    Up,
    /// Menu selection down
    Down,
    /// Run the highlighted menu entry
    Confirm,
    Escape,
    Space,
    /// Menu entry clicked directly
    Select(MenuOption),
    /// Resume button on the pause screen
    ResumeClicked,
    /// Main-menu button on the pause screen
    MenuClicked,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent (length clamped to 1)
    pub move_dir: Vec2,
    /// Aim point in arena coordinates (mouse position)
    pub aim: Option<Vec2>,
    /// Fire button currently held; only the press edge fires
    pub fire_held: bool,
    /// Discrete events since the last frame, in order
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - the autopilot drives the player
    pub idle_mode: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for &event in &input.events {
        handle_event(state, event);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    // Level banner freezes the arena and swallows player input
    if let Some(banner) = state.banner.as_mut() {
        banner.remaining -= dt;
        let expired = banner.remaining <= 0.0;
        state.fire_was_held = input.fire_held;
        if expired {
            state.banner = None;
            state.setup_level();
        }
        return;
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    step_playing(state, &input, dt);
}

fn handle_event(state: &mut GameState, event: InputEvent) {
    match (state.phase, event) {
        (GamePhase::Menu, InputEvent::Up) => {
            state.menu_index = state.menu_index.saturating_sub(1);
        }
        (GamePhase::Menu, InputEvent::Down) => {
            state.menu_index = (state.menu_index + 1).min(MenuOption::ALL.len() - 1);
        }
        (GamePhase::Menu, InputEvent::Confirm) => {
            let option = state.selected_menu_option();
            run_menu_option(state, option);
        }
        (GamePhase::Menu, InputEvent::Select(option)) => {
            if let Some(index) = MenuOption::ALL.iter().position(|o| *o == option) {
                state.menu_index = index;
            }
            run_menu_option(state, option);
        }
        (GamePhase::Instructions, InputEvent::Escape) => {
            state.phase = GamePhase::Menu;
        }
        (GamePhase::Playing, InputEvent::Escape) => {
            state.phase = GamePhase::Paused;
            log::debug!("Paused");
        }
        (GamePhase::Paused, InputEvent::Escape | InputEvent::ResumeClicked) => {
            state.phase = GamePhase::Playing;
        }
        (GamePhase::Paused, InputEvent::MenuClicked) => {
            state.phase = GamePhase::Menu;
        }
        (GamePhase::GameOver, InputEvent::Space) => {
            state.record_score();
            state.start_game();
        }
        (GamePhase::GameOver, InputEvent::Escape) => {
            state.record_score();
            state.phase = GamePhase::Menu;
        }
        _ => {}
    }
}

fn run_menu_option(state: &mut GameState, option: MenuOption) {
    match option {
        MenuOption::Play => state.start_game(),
        MenuOption::Instructions => state.phase = GamePhase::Instructions,
        MenuOption::Quit => {
            log::info!("Quit requested");
            state.quit_requested = true;
        }
    }
}

fn step_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(player) = state.player.as_mut() {
        player.tick_cooldown(dt);
    }
    for enemy in state.enemies.iter_mut() {
        enemy.tick_cooldown(dt);
    }

    let mut fired = Vec::new();

    // Player
    let fire_pressed = input.fire_held && !state.fire_was_held;
    state.fire_was_held = input.fire_held;
    if let Some(player) = state.player.as_mut().filter(|p| !p.is_destroyed()) {
        player.steer(input.move_dir.clamp_length_max(1.0));
        if let Some(aim) = input.aim {
            let to_aim = aim - player.pos();
            if to_aim.length_squared() > 0.0 {
                player.facing = angle_degrees(to_aim);
            }
        }
        if fire_pressed {
            let target = input
                .aim
                .unwrap_or_else(|| player.pos() + direction_from_degrees(player.facing));
            fired.extend(player.attack(target));
        }
        player.update_movement(dt, &state.blocks);
    }

    // Enemies steer at wherever the player ended up this frame
    let target = state.player_target();
    for enemy in state.enemies.iter_mut() {
        fired.extend(update_enemy_ai(enemy, target, dt, &state.tuning));
        update_enemy_movement(enemy, dt, &state.blocks);
    }

    for shot in fired {
        state.push_event(GameEvent::Shot { side: shot.owner });
        state.projectiles.push(shot);
    }

    for projectile in state.projectiles.iter_mut() {
        projectile.advance(dt);
    }
    for block in state.blocks.iter_mut() {
        block.update(dt);
    }

    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_interval {
        state.spawn_timer = 0.0;
        try_spawn_enemy(state);
    }

    let report = resolve_collisions(
        &mut state.projectiles,
        &mut state.blocks,
        state.player.as_mut(),
        &mut state.enemies,
        state.tuning.separation_push,
    );
    state.score += u64::from(report.blocks_destroyed) * state.tuning.block_destroy_score;
    state.score += u64::from(report.enemies_destroyed) * state.tuning.enemy_kill_score;
    state.enemies_defeated += report.enemies_destroyed;
    for _ in 0..report.blocks_destroyed {
        state.push_event(GameEvent::BlockDestroyed);
    }
    for _ in 0..report.enemies_destroyed {
        state.push_event(GameEvent::EnemyDestroyed);
    }
    for _ in 0..report.player_hits {
        state.push_event(GameEvent::PlayerHit);
    }

    state.purge_destroyed();

    if !state.player_alive() {
        state.phase = GamePhase::GameOver;
        state.outcome = Outcome::Defeat;
        log::info!("Game over at level {} with score {}", state.level, state.score);
        state.push_event(GameEvent::GameOver);
    } else if state.enemies_defeated >= state.enemies_to_defeat {
        advance_level(state);
    }
}

/// Spawn one enemy if the live cap and the level quota allow it.
/// Returns whether an enemy was added.
pub fn try_spawn_enemy(state: &mut GameState) -> bool {
    let live = state.live_enemy_count();
    if live >= MAX_LIVE_ENEMIES {
        return false;
    }
    if state.enemies_defeated + live as u32 >= state.enemies_to_defeat {
        return false;
    }

    let pos = random_spawn_position(state);
    let profile = state.tuning.enemy_for_level(state.level);
    let id = state.next_entity_id();
    state.enemies.push(Tank::enemy(id, pos, &profile));
    log::debug!("Spawned enemy {} at ({}, {})", id, pos.x, pos.y);
    true
}

/// Sample a spawn point away from the player and clear of obstacles.
/// Falls back to the last sample once the attempt budget runs out.
fn random_spawn_position(state: &mut GameState) -> Vec2 {
    let player = state.player_target();
    let min_distance = state.tuning.spawn_min_player_distance;
    let attempts = state.tuning.spawn_attempts.max(1);

    let mut pos = Vec2::ZERO;
    for _ in 0..attempts {
        let x = 50 + state.rng.random_range(0..(ARENA_WIDTH as u32 - 100));
        let y = 50 + state.rng.random_range(0..(ARENA_HEIGHT as u32 - 100));
        pos = Vec2::new(x as f32, y as f32);

        let near_player = player.is_some_and(|p| p.distance(pos) < min_distance);
        if !near_player && !area_blocked(&state.blocks, &Rect::square(pos, BLOCK_SIZE)) {
            return pos;
        }
    }

    log::warn!(
        "No clear spawn point after {} attempts, using ({}, {})",
        attempts,
        pos.x,
        pos.y
    );
    pos
}

/// Credit the cleared level and move on, or end the match after the last one
pub fn advance_level(state: &mut GameState) {
    let cleared = state.level;
    state.level += 1;
    state.score += state.tuning.level_bonus;
    state.push_event(GameEvent::LevelCleared { level: cleared });

    if state.level > MAX_LEVEL {
        state.level = MAX_LEVEL;
        state.outcome = Outcome::Victory;
        state.phase = GamePhase::GameOver;
        log::info!("All levels cleared, final score {}", state.score);
        state.push_event(GameEvent::Victory);
        return;
    }

    let tuning = &state.tuning;
    state.spawn_interval =
        (state.spawn_interval - tuning.spawn_interval_step).max(tuning.min_spawn_interval);
    state.banner = Some(LevelBanner::for_level(state.level, &state.tuning));
    log::info!("Level {} cleared, advancing to {}", cleared, state.level);
}

/// Demo pilot: aim at the nearest enemy, fire on alternate frames,
/// close in when out of range and back off when crowded
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let Some(me) = state.player_target() else {
        return input;
    };

    let nearest = state
        .enemies
        .iter()
        .filter(|e| !e.is_destroyed())
        .min_by(|a, b| a.pos().distance_squared(me).total_cmp(&b.pos().distance_squared(me)));

    match nearest {
        Some(enemy) => {
            let offset = enemy.pos() - me;
            let distance = offset.length();
            input.aim = Some(enemy.pos());
            input.fire_held = !state.fire_was_held;
            input.move_dir = if distance < state.tuning.min_distance {
                -offset.normalize_or_zero()
            } else if distance > state.tuning.detection_range {
                offset.normalize_or_zero()
            } else {
                Vec2::ZERO
            };
        }
        None => {
            input.fire_held = false;
            input.move_dir = Vec2::ZERO;
        }
    }
    input
}
