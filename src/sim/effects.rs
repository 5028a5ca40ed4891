//! Cosmetic effect engine
//!
//! Effects are a single tagged type: a shared timer plus a per-kind payload.
//! Aging is common to all kinds, the progress-to-visual mapping and the simple
//! Euler kinematics dispatch on the kind. Nothing here feeds back into
//! gameplay.
//!
//! Population is bounded by the pool's budget. Spawns past the budget are
//! suppressed rather than evicting live effects, so a burst requested when the
//! pool is nearly full renders only partially.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::EffectRequest;
use crate::consts::*;
use crate::{polar_to_cartesian, tick_scale};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const FIRE_YELLOW: Rgb = Rgb(255, 200, 0);
    pub const FIRE_ORANGE: Rgb = Rgb(255, 100, 0);
    pub const FIRE_RED: Rgb = Rgb(255, 0, 0);
    pub const BRIGHT_WHITE: Rgb = Rgb(255, 255, 220);
    pub const SMOKE_GREY: Rgb = Rgb(128, 128, 128);
    pub const SPARK_BLUE: Rgb = Rgb(100, 200, 255);
}

const FIRE_COLORS: [Rgb; 3] = [Rgb::FIRE_YELLOW, Rgb::FIRE_ORANGE, Rgb::FIRE_RED];

/// Durations, in nominal ticks
const EXPLOSION_TICKS: f32 = 30.0;
const FLASH_TICKS: f32 = 8.0;
const MUZZLE_FLASH_TICKS: f32 = 10.0;
const SPARK_TICKS: f32 = 15.0;
const TRAIL_TICKS: f32 = 20.0;

const EXPLOSION_MAX_RADIUS: f32 = 25.0;
const SHOCKWAVE_MAX_RADIUS: f32 = 40.0;
const FLASH_RADIUS: f32 = 12.0;
const MUZZLE_FLASH_RADIUS: f32 = 8.0;
const TRAIL_RADIUS: f32 = 3.0;
const SPARK_RADIUS: f32 = 2.0;

/// Per-tick velocity retention
const PARTICLE_DRAG: f32 = 0.95;
const SMOKE_DRAG: f32 = 0.98;
const SPARK_DRAG: f32 = 0.9;
/// Downward pull on fire particles, px/tick²
const PARTICLE_GRAVITY: f32 = 0.15;

const BURST_PARTICLES: usize = 8;
const BURST_SMOKE: usize = 3;
const SPARKS_PER_HIT: usize = 8;

/// Per-kind parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Fireball whose radius eases out
    Explosion { max_radius: f32 },
    /// Thin ring expanding linearly
    Shockwave { max_radius: f32 },
    /// Bright core shrinking linearly
    Flash { initial_radius: f32 },
    /// Fire debris with gravity
    Particle { vel: Vec2, radius: f32, color: Rgb },
    /// Slowly swelling puff
    Smoke { vel: Vec2, initial_radius: f32, opacity: f32 },
    /// Fixed-size fading dot
    Trail { radius: f32, color: Rgb },
    /// Short flash at the muzzle
    MuzzleFlash { angle: f32 },
    /// Ricochet spark
    Spark { vel: Vec2 },
}

/// Kind tag exposed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTag {
    Explosion,
    Shockwave,
    Flash,
    Particle,
    Smoke,
    Trail,
    MuzzleFlash,
    Spark,
}

impl EffectKind {
    pub fn tag(&self) -> EffectTag {
        match self {
            EffectKind::Explosion { .. } => EffectTag::Explosion,
            EffectKind::Shockwave { .. } => EffectTag::Shockwave,
            EffectKind::Flash { .. } => EffectTag::Flash,
            EffectKind::Particle { .. } => EffectTag::Particle,
            EffectKind::Smoke { .. } => EffectTag::Smoke,
            EffectKind::Trail { .. } => EffectTag::Trail,
            EffectKind::MuzzleFlash { .. } => EffectTag::MuzzleFlash,
            EffectKind::Spark { .. } => EffectTag::Spark,
        }
    }
}

/// Drawable state of one effect at its current progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectVisual {
    pub tag: EffectTag,
    pub pos: Vec2,
    pub radius: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub color: Rgb,
    /// Orientation, for directional effects
    pub angle: Option<f32>,
}

/// A live effect
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub pos: Vec2,
    /// Seconds since spawn
    pub elapsed: f32,
    /// Seconds until the effect is finished
    pub duration: f32,
    pub kind: EffectKind,
}

impl Effect {
    pub fn new(pos: Vec2, duration_ticks: f32, kind: EffectKind) -> Self {
        Self {
            pos,
            elapsed: 0.0,
            duration: duration_ticks / TICK_RATE,
            kind,
        }
    }

    pub fn explosion(pos: Vec2) -> Self {
        Self::new(
            pos,
            EXPLOSION_TICKS,
            EffectKind::Explosion {
                max_radius: EXPLOSION_MAX_RADIUS,
            },
        )
    }

    pub fn shockwave(pos: Vec2) -> Self {
        Self::new(
            pos,
            EXPLOSION_TICKS,
            EffectKind::Shockwave {
                max_radius: SHOCKWAVE_MAX_RADIUS,
            },
        )
    }

    pub fn flash(pos: Vec2) -> Self {
        Self::new(
            pos,
            FLASH_TICKS,
            EffectKind::Flash {
                initial_radius: FLASH_RADIUS,
            },
        )
    }

    pub fn trail(pos: Vec2, color: Rgb) -> Self {
        Self::new(
            pos,
            TRAIL_TICKS,
            EffectKind::Trail {
                radius: TRAIL_RADIUS,
                color,
            },
        )
    }

    pub fn muzzle_flash(pos: Vec2, angle: f32) -> Self {
        Self::new(pos, MUZZLE_FLASH_TICKS, EffectKind::MuzzleFlash { angle })
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Age the effect by `dt` seconds and integrate its motion
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let step = tick_scale(dt);

        match &mut self.kind {
            EffectKind::Particle { vel, .. } => {
                self.pos += *vel * step;
                vel.y += PARTICLE_GRAVITY * step;
                *vel *= PARTICLE_DRAG.powf(step);
            }
            EffectKind::Smoke { vel, .. } => {
                self.pos += *vel * step;
                *vel *= SMOKE_DRAG.powf(step);
            }
            EffectKind::Spark { vel } => {
                self.pos += *vel * step;
                *vel *= SPARK_DRAG.powf(step);
            }
            _ => {}
        }
    }

    /// Map current progress to a drawable state
    pub fn visual(&self) -> EffectVisual {
        let p = self.progress();
        let fade = 1.0 - p;
        let (radius, alpha, color, angle) = match self.kind {
            EffectKind::Explosion { max_radius } => {
                let eased = 1.0 - (1.0 - p) * (1.0 - p);
                (eased * max_radius, 0.8 * fade, Rgb::FIRE_YELLOW, None)
            }
            EffectKind::Shockwave { max_radius } => {
                (p * max_radius, 0.4 * fade, Rgb::BRIGHT_WHITE, None)
            }
            EffectKind::Flash { initial_radius } => {
                (initial_radius * fade, 0.8 * fade, Rgb::BRIGHT_WHITE, None)
            }
            EffectKind::Particle { radius, color, .. } => (radius, 0.8 * fade, color, None),
            EffectKind::Smoke {
                initial_radius,
                opacity,
                ..
            } => (
                initial_radius * (1.0 + p * 0.5),
                opacity * fade,
                Rgb::SMOKE_GREY,
                None,
            ),
            EffectKind::Trail { radius, color } => (radius, fade, color, None),
            EffectKind::MuzzleFlash { angle } => (
                MUZZLE_FLASH_RADIUS * fade,
                0.9 * fade,
                Rgb::FIRE_YELLOW,
                Some(angle),
            ),
            EffectKind::Spark { vel } => (
                SPARK_RADIUS,
                fade,
                Rgb::SPARK_BLUE,
                Some(vel.y.atan2(vel.x)),
            ),
        };

        EffectVisual {
            tag: self.kind.tag(),
            pos: self.pos,
            radius,
            alpha,
            color,
            angle,
        }
    }
}

fn random_velocity<R: Rng>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let speed = rng.random_range(min_speed..max_speed);
    polar_to_cartesian(speed, angle)
}

fn smoke_puff<R: Rng>(at: Vec2, vel: Vec2, rng: &mut R) -> Effect {
    let initial_radius = rng.random_range(3..=6) as f32;
    let opacity = rng.random_range(100..=180) as f32 / 255.0;
    Effect::new(
        at,
        EXPLOSION_TICKS,
        EffectKind::Smoke {
            vel,
            initial_radius,
            opacity,
        },
    )
}

/// Budgeted collection of live effects
#[derive(Debug, Clone)]
pub struct EffectPool {
    effects: Vec<Effect>,
    budget: usize,
}

impl Default for EffectPool {
    fn default() -> Self {
        Self::new(MAX_EFFECTS)
    }
}

impl EffectPool {
    pub fn new(budget: usize) -> Self {
        Self {
            effects: Vec::with_capacity(budget),
            budget,
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Free slots left in the budget
    pub fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.effects.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Add one effect if the budget allows. Returns false when suppressed.
    pub fn spawn(&mut self, effect: Effect) -> bool {
        if self.effects.len() >= self.budget {
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Turn a request into concrete effects, drawing randomness from `rng`
    pub fn apply<R: Rng>(&mut self, request: EffectRequest, rng: &mut R) {
        match request {
            EffectRequest::ExplosionBurst { center } => self.spawn_burst(center, rng),
            EffectRequest::Sparks { at } => {
                for _ in 0..SPARKS_PER_HIT {
                    let vel = random_velocity(rng, 1.0, 4.0);
                    if !self.spawn(Effect::new(at, SPARK_TICKS, EffectKind::Spark { vel })) {
                        break;
                    }
                }
            }
            EffectRequest::MuzzleFlash { at, angle } => {
                self.spawn(Effect::muzzle_flash(at, angle));
            }
            EffectRequest::Trail { at, team } => {
                self.spawn(Effect::trail(at, team.color()));
            }
            EffectRequest::Smoke { at, heading } => {
                if self.remaining() == 0 {
                    return;
                }
                let angle = heading + PI + rng.random_range(-0.5..0.5);
                let vel = polar_to_cartesian(0.5, angle);
                self.spawn(smoke_puff(at, vel, rng));
            }
        }
    }

    /// Explosion + shockwave + flash + fire particles + smoke, each budget-checked
    fn spawn_burst<R: Rng>(&mut self, center: Vec2, rng: &mut R) {
        if !self.spawn(Effect::explosion(center)) {
            return;
        }
        self.spawn(Effect::shockwave(center));
        self.spawn(Effect::flash(center));

        for _ in 0..BURST_PARTICLES {
            if self.remaining() == 0 {
                return;
            }
            let vel = random_velocity(rng, 2.0, 5.0);
            let radius = rng.random_range(2..=4) as f32;
            let color = FIRE_COLORS[rng.random_range(0..FIRE_COLORS.len())];
            self.spawn(Effect::new(
                center,
                EXPLOSION_TICKS,
                EffectKind::Particle { vel, radius, color },
            ));
        }

        for _ in 0..BURST_SMOKE {
            if self.remaining() == 0 {
                return;
            }
            // Smoke drifts slightly upward
            let vel = random_velocity(rng, 1.0, 2.0) - Vec2::new(0.0, 0.3);
            self.spawn(smoke_puff(center, vel, rng));
        }
    }

    /// Age every effect and drop the finished ones
    pub fn update(&mut self, dt: f32) {
        for effect in self.effects.iter_mut() {
            effect.update(dt);
        }
        self.effects.retain(|e| !e.is_finished());
    }

    pub fn visuals(&self) -> Vec<EffectVisual> {
        self.effects.iter().map(Effect::visual).collect()
    }
}
