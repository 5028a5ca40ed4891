//! Tanks: rotation, collision-gated movement, rate-limited firing
//!
//! Holding the advance key both drives the tank forward and requests a shot
//! every tick; the fire cooldown is the only thing limiting the rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hud_rect, tank_in_bounds};
use super::effects::Rgb;
use super::events::{EffectRequest, SoundCue, TickEvents};
use super::obstacle::Obstacle;
use super::projectile::BulletSpawn;
use crate::consts::*;
use crate::{normalize_angle, polar_to_cartesian, tick_scale};

/// Team identity; doubles as the friendly-fire key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    pub fn color(self) -> Rgb {
        match self {
            Team::Blue => Rgb(0, 0, 255),
            Team::Red => Rgb(255, 0, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Red => "Red",
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    /// Fixed spawn point (top-left of the tank box)
    pub fn spawn_point(self) -> Vec2 {
        match self {
            Team::Blue => BLUE_SPAWN,
            Team::Red => RED_SPAWN,
        }
    }

    /// Slot in the match's tank pair
    pub fn index(self) -> usize {
        match self {
            Team::Blue => 0,
            Team::Red => 1,
        }
    }
}

/// Per-tank control state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TankControls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Drive forward and fire
    pub advance: bool,
}

/// A player tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub team: Team,
    /// Top-left of the 30×30 box
    pub pos: Vec2,
    /// Heading in radians, normalized to [-π, π)
    pub angle: f32,
    pub lives: u8,
    pub score: u32,
    /// Match clock of the last accepted shot
    pub last_shot_ms: Option<f64>,
    pub invulnerable: bool,
    pub invulnerable_since_ms: f64,
    /// Whether the engine loop cue is currently playing
    pub engine_running: bool,
    pub last_trail_ms: Option<f64>,
    pub last_smoke_ms: Option<f64>,
}

impl Tank {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            pos: team.spawn_point(),
            angle: 0.0,
            lives: TANK_LIVES,
            score: 0,
            last_shot_ms: None,
            invulnerable: false,
            invulnerable_since_ms: 0.0,
            engine_running: false,
            last_trail_ms: None,
            last_smoke_ms: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn rect(&self) -> Rect {
        rect_at(self.pos)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(TANK_SIZE / 2.0)
    }

    /// Rotate from the turn keys, then try to drive forward
    ///
    /// Rotation always applies. Translation is dropped when the new box would
    /// hit an obstacle, another live tank, the screen edge or the HUD strip.
    /// Returns true whenever the advance key is held, regardless of whether
    /// the tank actually moved.
    pub fn rotate_and_advance(
        &mut self,
        controls: TankControls,
        obstacles: &[Obstacle],
        other_tanks: &[Rect],
        now_ms: f64,
        dt: f32,
        events: &mut TickEvents,
    ) -> bool {
        if !self.is_alive() {
            return false;
        }

        let step = tick_scale(dt);
        if controls.rotate_left {
            self.angle -= TANK_TURN_RATE * step;
        }
        if controls.rotate_right {
            self.angle += TANK_TURN_RATE * step;
        }
        self.angle = normalize_angle(self.angle);

        if !controls.advance {
            self.stop_engine(events);
            return false;
        }

        if !self.engine_running {
            self.engine_running = true;
            events.cue(SoundCue::EngineStart);
        }

        let center = self.center();
        if due(self.last_trail_ms, now_ms, TRAIL_INTERVAL_MS) {
            events.effect(EffectRequest::Trail {
                at: center,
                team: self.team,
            });
            self.last_trail_ms = Some(now_ms);
        }
        if self.lives == 1 && due(self.last_smoke_ms, now_ms, SMOKE_INTERVAL_MS) {
            events.effect(EffectRequest::Smoke {
                at: center,
                heading: self.angle,
            });
            self.last_smoke_ms = Some(now_ms);
        }

        let candidate = self.pos + polar_to_cartesian(TANK_SPEED * step, self.angle);
        if !is_blocked(candidate, obstacles, other_tanks) {
            self.pos = candidate;
        }

        true
    }

    /// Fire if the cooldown has elapsed
    pub fn try_fire(&mut self, now_ms: f64, events: &mut TickEvents) -> Option<BulletSpawn> {
        if !self.is_alive() || !due(self.last_shot_ms, now_ms, FIRE_COOLDOWN_MS) {
            return None;
        }

        let muzzle = self.center() + polar_to_cartesian(MUZZLE_OFFSET, self.angle);
        self.last_shot_ms = Some(now_ms);
        events.cue(SoundCue::Shot);
        events.effect(EffectRequest::MuzzleFlash {
            at: muzzle,
            angle: self.angle,
        });

        Some(BulletSpawn {
            pos: muzzle,
            angle: self.angle,
            owner: self.team,
        })
    }

    /// Silence the engine loop if it is playing
    pub fn stop_engine(&mut self, events: &mut TickEvents) {
        if self.engine_running {
            self.engine_running = false;
            events.cue(SoundCue::EngineStop);
        }
    }

    /// Register a confirmed hit and open the invulnerability window
    pub fn take_hit(&mut self, now_ms: f64) {
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable = true;
        self.invulnerable_since_ms = now_ms;
    }

    /// Whether the tank should be drawn this frame (dead tanks are hidden,
    /// invulnerable ones blink)
    pub fn visible(&self, now_ms: f64) -> bool {
        if !self.is_alive() {
            return false;
        }
        !(self.invulnerable && ((now_ms / INVULNERABILITY_BLINK_MS) as u64) % 2 == 1)
    }
}

fn rect_at(pos: Vec2) -> Rect {
    Rect {
        pos,
        size: Vec2::splat(TANK_SIZE),
    }
}

/// Rate limiter: true when nothing happened yet or `interval` has passed
#[inline]
fn due(last: Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
    last.is_none_or(|t| now_ms - t >= interval_ms)
}

fn is_blocked(pos: Vec2, obstacles: &[Obstacle], other_tanks: &[Rect]) -> bool {
    let rect = rect_at(pos);
    !tank_in_bounds(pos)
        || rect.intersects(&hud_rect())
        || obstacles.iter().any(|o| rect.intersects(&o.rect()))
        || other_tanks.iter().any(|t| rect.intersects(t))
}
