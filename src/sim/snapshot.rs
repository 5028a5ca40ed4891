//! Read-only view of the match for renderers
//!
//! Built fresh after each tick. Everything a frontend needs to draw the arena
//! and the HUD, with no handles back into the live state.

use glam::Vec2;
use serde::Serialize;

use super::effects::{EffectVisual, Rgb};
use super::obstacle::ObstacleKind;
use super::state::{GamePhase, MatchResult, MatchState};
use super::tank::Team;

#[derive(Debug, Clone, Serialize)]
pub struct TankView {
    pub team: Team,
    pub pos: Vec2,
    pub angle: f32,
    pub color: Rgb,
    pub lives: u8,
    pub score: u32,
    pub invulnerable: bool,
    /// False for dead tanks and during the "off" half of the invulnerability blink
    pub visible: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub angle: f32,
    pub color: Rgb,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub kind: ObstacleKind,
    pub health_ratio: f32,
    pub damaged: bool,
}

/// Audio state shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioView {
    pub music_on: bool,
    pub volume_percent: u32,
}

/// Everything drawn for one frame
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub phase: GamePhase,
    pub result: Option<MatchResult>,
    pub clock_ms: f64,
    pub tanks: Vec<TankView>,
    pub bullets: Vec<BulletView>,
    pub obstacles: Vec<ObstacleView>,
    pub effects: Vec<EffectVisual>,
    /// Blue, Red
    pub scores: [u32; 2],
    /// Filled in by the session; the bare simulation has no audio
    pub audio: Option<AudioView>,
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        let now = state.clock_ms;
        Self {
            phase: state.phase,
            result: state.result,
            clock_ms: now,
            tanks: state
                .tanks
                .iter()
                .map(|t| TankView {
                    team: t.team,
                    pos: t.pos,
                    angle: t.angle,
                    color: t.team.color(),
                    lives: t.lives,
                    score: t.score,
                    invulnerable: t.invulnerable,
                    visible: t.visible(now),
                    alive: t.is_alive(),
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    angle: b.angle,
                    color: b.owner.color(),
                    radius: b.radius,
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    kind: o.kind,
                    health_ratio: o.health_ratio(),
                    damaged: o.is_damaged(),
                })
                .collect(),
            effects: state.effects.visuals(),
            scores: state.scores(),
            audio: None,
        }
    }

    /// Match-over banner, if the match has ended
    pub fn banner(&self) -> Option<String> {
        self.result.map(MatchResult::banner)
    }
}

impl MatchState {
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self)
    }
}
