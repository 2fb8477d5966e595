//! Read-only snapshots for a renderer
//!
//! The core never draws. A frontend pulls [`RenderItem`]s and a [`Hud`] after
//! each tick and paints them however it likes.

use glam::Vec2;
use serde::Serialize;

use super::obstacle::BlockKind;
use super::rect::Rect;
use super::state::{GamePhase, GameState, MenuOption};

/// Leaderboard entries shown on the title screen
pub const HIGH_SCORE_PREVIEW: usize = 5;

/// What a render item depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
    Block(BlockKind),
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderItem {
    pub kind: ItemKind,
    pub position: Vec2,
    /// Degrees, 0 = +x, 90 = down
    pub facing: f32,
    pub bounds: Rect,
    /// Health bar fill (blocks: damage shade)
    pub health_ratio: f32,
}

/// Heads-up display and overlay text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub enemies_left: u32,
    /// Player health, 0 when there is no live player
    pub player_health: f32,
    /// Banner title and hint while a level transition shows
    pub banner: Option<(String, String)>,
    /// Game-over headline
    pub outcome: Option<&'static str>,
    pub menu: Vec<(&'static str, bool)>,
    pub high_scores: Vec<u64>,
}

impl GameState {
    /// Every live entity, blocks first so tanks and shots draw over them
    pub fn render_items(&self) -> Vec<RenderItem> {
        let mut items = Vec::with_capacity(
            self.blocks.len() + self.enemies.len() + self.projectiles.len() + 1,
        );

        for block in self.blocks.iter().filter(|b| !b.is_destroyed()) {
            items.push(RenderItem {
                kind: ItemKind::Block(block.kind),
                position: block.pos(),
                facing: 0.0,
                bounds: block.bounds(),
                health_ratio: block.shade,
            });
        }

        let tanks = self
            .player
            .iter()
            .chain(self.enemies.iter())
            .filter(|t| !t.is_destroyed());
        for tank in tanks {
            items.push(RenderItem {
                kind: if tank.is_player() {
                    ItemKind::Player
                } else {
                    ItemKind::Enemy
                },
                position: tank.pos(),
                facing: tank.facing,
                bounds: tank.bounds(),
                health_ratio: tank.vitals.health_ratio(),
            });
        }

        for projectile in self.projectiles.iter().filter(|p| !p.is_destroyed()) {
            items.push(RenderItem {
                kind: if projectile.from_player() {
                    ItemKind::PlayerProjectile
                } else {
                    ItemKind::EnemyProjectile
                },
                position: projectile.pos(),
                facing: crate::angle_degrees(projectile.vel),
                bounds: projectile.bounds(),
                health_ratio: 1.0,
            });
        }

        items
    }

    pub fn hud(&self) -> Hud {
        let player_health = self
            .player
            .as_ref()
            .filter(|p| !p.is_destroyed())
            .map_or(0.0, |p| p.vitals.health());
        let selected = self.selected_menu_option();

        Hud {
            phase: self.phase,
            score: self.score,
            level: self.level,
            enemies_left: self.enemies_left(),
            player_health,
            banner: self
                .banner
                .as_ref()
                .map(|b| (b.title.clone(), b.hint.clone())),
            outcome: (self.phase == GamePhase::GameOver).then(|| self.outcome.message()),
            menu: MenuOption::ALL
                .iter()
                .map(|o| (o.label(), *o == selected))
                .collect(),
            high_scores: self
                .high_scores
                .entries()
                .iter()
                .take(HIGH_SCORE_PREVIEW)
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::tuning::Tuning;

    #[test]
    fn test_render_items_cover_arena() {
        let mut state = GameState::new(5, Tuning::default());
        state.start_game();
        let items = state.render_items();

        assert_eq!(items.len(), 31);
        let players: Vec<_> = items.iter().filter(|i| i.kind == ItemKind::Player).collect();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(players[0].health_ratio, 1.0);
        assert!(matches!(items[0].kind, ItemKind::Block(_)));
    }

    #[test]
    fn test_destroyed_entities_not_rendered() {
        let mut state = GameState::new(5, Tuning::default());
        state.start_game();
        if let Some(player) = state.player.as_mut() {
            player.take_damage(1000.0);
        }
        state.blocks[0].vitals.destroy();
        let items = state.render_items();
        assert_eq!(items.len(), 29);
        assert!(items.iter().all(|i| i.kind != ItemKind::Player));
        assert_eq!(state.hud().player_health, 0.0);
    }

    #[test]
    fn test_hud_menu_and_preview() {
        let state = GameState::new(1, Tuning::default())
            .with_high_scores(HighScores::from_scores([10, 90, 30, 70, 50, 60, 20]));
        let hud = state.hud();

        assert_eq!(hud.phase, GamePhase::Menu);
        assert_eq!(hud.high_scores, vec![90, 70, 60, 50, 30]);
        assert_eq!(hud.menu[0], ("PLAY", true));
        assert_eq!(hud.menu[2], ("QUIT", false));
        assert!(hud.outcome.is_none());
        assert!(hud.banner.is_none());
    }

    #[test]
    fn test_hud_during_play() {
        let mut state = GameState::new(1, Tuning::default());
        state.start_game();
        state.enemies_defeated = 2;
        state.score = 250;
        let hud = state.hud();
        assert_eq!(hud.enemies_left, 3);
        assert_eq!(hud.player_health, 100.0);
        assert_eq!(hud.score, 250);

        state.phase = GamePhase::GameOver;
        assert_eq!(state.hud().outcome, Some("GAME OVER"));
    }
}
