//! Bullets: spawning, integration, lifetime and off-screen culling

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::events::{GameEvent, TickEvents};
use super::tank::Team;
use crate::consts::*;
use crate::{polar_to_cartesian, tick_scale};

/// Everything needed to create a bullet, as produced by a tank's fire action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpawn {
    pub pos: Vec2,
    pub angle: f32,
    pub owner: Team,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Fixed at spawn
    pub angle: f32,
    /// Pixels per nominal tick
    pub speed: f32,
    pub radius: f32,
    pub owner: Team,
    pub spawned_ms: f64,
    pub lifetime_ms: f64,
}

impl Bullet {
    pub fn from_spawn(id: u32, spawn: BulletSpawn, now_ms: f64) -> Self {
        Self {
            id,
            pos: spawn.pos,
            angle: spawn.angle,
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
            owner: spawn.owner,
            spawned_ms: now_ms,
            lifetime_ms: BULLET_LIFETIME_MS,
        }
    }

    /// Bounding box used for collision tests
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.radius)
    }

    /// Advance along the heading, scaled so motion matches the nominal tick rate
    pub fn integrate(&mut self, dt: f32) {
        self.pos += polar_to_cartesian(self.speed * tick_scale(dt), self.angle);
    }

    /// True once the bullet is past the screen edge by more than the margin
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > SCREEN_WIDTH + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawned_ms >= self.lifetime_ms
    }
}

/// Integrate every bullet, then drop the expired and off-screen ones
///
/// Runs before collision resolution so a bullet never collides on the tick it
/// leaves play. Returns how many were removed.
pub fn advance_bullets(bullets: &mut Vec<Bullet>, now_ms: f64, dt: f32, events: &mut TickEvents) -> usize {
    let before = bullets.len();
    bullets.retain_mut(|bullet| {
        bullet.integrate(dt);
        let gone = bullet.is_offscreen() || bullet.is_expired(now_ms);
        if gone {
            events.event(GameEvent::BulletExpired { owner: bullet.owner });
        }
        !gone
    });
    before - bullets.len()
}
