//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of audio and
//! platform dependencies:
//! - Side effects leave as requests in a [`TickEvents`] outbox
//! - Seeded RNG only
//! - Stable iteration order (tanks by team, everything else by entity ID)

pub mod collision;
pub mod combat;
pub mod effects;
pub mod events;
pub mod obstacle;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tank;
pub mod tick;

pub use collision::Rect;
pub use combat::{Impact, expire_invulnerability, resolve_bullets};
pub use effects::{Effect, EffectKind, EffectPool, EffectTag, EffectVisual, Rgb};
pub use events::{EffectRequest, GameEvent, SoundCue, TickEvents};
pub use obstacle::{Obstacle, ObstacleKind, Placement, find_placement, generate_field};
pub use projectile::{Bullet, BulletSpawn, advance_bullets};
pub use snapshot::{AudioView, BulletView, MatchSnapshot, ObstacleView, TankView};
pub use state::{GamePhase, MatchResult, MatchState};
pub use tank::{Tank, TankControls, Team};
pub use tick::{Control, TickInput, tick};
