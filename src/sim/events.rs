//! Side-effect requests produced during a tick
//!
//! Tanks and the resolver never touch audio or the effect list directly; they
//! push requests into a [`TickEvents`] outbox that the match state applies
//! centrally once the step is done.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use super::state::MatchResult;
use super::tank::Team;

/// Named sound cues, mapped to playback by the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A shot was fired
    Shot,
    /// Explosion burst (tank hit or obstacle destroyed)
    Explosion,
    /// Continuous engine loop starts
    EngineStart,
    /// Continuous engine loop stops
    EngineStop,
    /// Bullet bounced off an invulnerable tank
    Hit,
    /// Bullet bounced off a rock
    Ricochet,
    /// Destructible obstacle damaged but still standing
    ObstacleDamage,
    /// Match paused
    PauseIn,
    /// Match resumed
    PauseOut,
    /// Tank hit, invulnerability window starts
    Respawn,
}

/// Cosmetic effect spawn requests, materialized by the effect engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectRequest {
    /// Full explosion burst centered on a point
    ExplosionBurst { center: Vec2 },
    /// Ricochet/deflection sparks
    Sparks { at: Vec2 },
    /// Flash at the muzzle, oriented along the shot
    MuzzleFlash { at: Vec2, angle: f32 },
    /// Track mark left behind a moving tank
    Trail { at: Vec2, team: Team },
    /// Smoke puff from a badly damaged tank, drifting opposite to its heading
    Smoke { at: Vec2, heading: f32 },
}

/// Gameplay events, for the presentation layer and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TankHit { victim: Team, shooter: Team, lives_left: u8 },
    /// Bullet absorbed by an invulnerable tank
    Deflected { target: Team },
    ObstacleDamaged { kind: ObstacleKind, health: u32 },
    ObstacleDestroyed { kind: ObstacleKind, center: Vec2 },
    Ricochet { at: Vec2 },
    BulletExpired { owner: Team },
    MatchOver { result: MatchResult },
}

/// Outbox filled during one tick
#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    pub cues: Vec<SoundCue>,
    pub effects: Vec<EffectRequest>,
    pub game: Vec<GameEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    #[inline]
    pub fn effect(&mut self, request: EffectRequest) {
        self.effects.push(request);
    }

    #[inline]
    pub fn event(&mut self, event: GameEvent) {
        self.game.push(event);
    }

    /// Explosion burst plus its sound; the sound plays even if the visual budget is spent
    pub fn explosion(&mut self, center: Vec2) {
        self.effect(EffectRequest::ExplosionBurst { center });
        self.cue(SoundCue::Explosion);
    }

    /// Move everything from `other` to the end of this outbox
    pub fn append(&mut self, mut other: TickEvents) {
        self.cues.append(&mut other.cues);
        self.effects.append(&mut other.effects);
        self.game.append(&mut other.game);
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty() && self.effects.is_empty() && self.game.is_empty()
    }
}
