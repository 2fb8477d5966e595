//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform code:
//! - Time only enters through the `dt` passed to `tick`
//! - Seeded RNG only
//! - Entities keep their insertion order; destroyed ones linger until the purge

pub mod collision;
pub mod entity;
pub mod obstacle;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod steering;
pub mod tank;
pub mod tick;
pub mod view;

pub use collision::{CollisionReport, resolve_collisions};
pub use entity::Vitals;
pub use obstacle::{Block, BlockKind, generate_layout};
pub use projectile::{Projectile, Side};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, LevelBanner, MenuOption, Outcome};
pub use steering::{COMPASS, quantize_angle, update_enemy_ai, update_enemy_movement};
pub use tank::{EnemyBrain, Tank, TankKind};
pub use tick::{InputEvent, TickInput, advance_level, tick, try_spawn_enemy};
pub use view::{Hud, ItemKind, RenderItem};
