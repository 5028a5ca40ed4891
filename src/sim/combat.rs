//! Per-tick bullet resolution against obstacles and tanks
//!
//! Each bullet resolves against at most one target per tick. Obstacles are
//! tested first, then vulnerable enemy tanks, then invulnerable enemy tanks
//! (which deflect). The first match in iteration order wins and consumes the
//! bullet.

use super::events::{EffectRequest, GameEvent, SoundCue, TickEvents};
use super::obstacle::Obstacle;
use super::projectile::Bullet;
use super::tank::Tank;
use crate::consts::*;

/// What a bullet ended up hitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    ObstacleDamaged,
    ObstacleDestroyed,
    Ricochet,
    TankHit,
    Deflected,
}

/// Resolve every live bullet; consumed bullets are removed from `bullets`
///
/// Returns the impacts in bullet order.
pub fn resolve_bullets(
    bullets: &mut Vec<Bullet>,
    obstacles: &mut Vec<Obstacle>,
    tanks: &mut [Tank],
    now_ms: f64,
    events: &mut TickEvents,
) -> Vec<Impact> {
    let mut impacts = Vec::new();
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets.drain(..) {
        let impact = hit_obstacle(&bullet, obstacles, events)
            .or_else(|| hit_tank(&bullet, tanks, now_ms, events))
            .or_else(|| deflect(&bullet, tanks, events));

        match impact {
            Some(impact) => impacts.push(impact),
            None => survivors.push(bullet),
        }
    }

    *bullets = survivors;
    impacts
}

fn hit_obstacle(bullet: &Bullet, obstacles: &mut Vec<Obstacle>, events: &mut TickEvents) -> Option<Impact> {
    let bullet_rect = bullet.rect();
    let idx = obstacles
        .iter()
        .position(|o| bullet_rect.intersects(&o.rect()))?;

    let obstacle = &mut obstacles[idx];
    if !obstacle.destructible {
        events.effect(EffectRequest::Sparks { at: bullet.pos });
        events.cue(SoundCue::Ricochet);
        events.event(GameEvent::Ricochet { at: bullet.pos });
        return Some(Impact::Ricochet);
    }

    if obstacle.apply_damage() {
        let destroyed = obstacles.remove(idx);
        events.explosion(destroyed.center());
        events.event(GameEvent::ObstacleDestroyed {
            kind: destroyed.kind,
            center: destroyed.center(),
        });
        Some(Impact::ObstacleDestroyed)
    } else {
        events.cue(SoundCue::ObstacleDamage);
        events.event(GameEvent::ObstacleDamaged {
            kind: obstacle.kind,
            health: obstacle.health,
        });
        Some(Impact::ObstacleDamaged)
    }
}

/// Whether `bullet` may interact with `tank` at all (alive, enemy, overlapping)
fn touches_enemy(bullet: &Bullet, tank: &Tank) -> bool {
    tank.is_alive() && tank.team != bullet.owner && bullet.rect().intersects(&tank.rect())
}

fn hit_tank(bullet: &Bullet, tanks: &mut [Tank], now_ms: f64, events: &mut TickEvents) -> Option<Impact> {
    let victim_idx = tanks
        .iter()
        .position(|t| !t.invulnerable && touches_enemy(bullet, t))?;

    let victim = &mut tanks[victim_idx];
    victim.take_hit(now_ms);
    let victim_team = victim.team;
    let lives_left = victim.lives;
    let center = victim.center();
    if !victim.is_alive() {
        victim.stop_engine(events);
    }

    for shooter in tanks.iter_mut().filter(|t| t.team == bullet.owner) {
        shooter.score += HIT_SCORE;
    }

    events.explosion(center);
    events.cue(SoundCue::Respawn);
    events.event(GameEvent::TankHit {
        victim: victim_team,
        shooter: bullet.owner,
        lives_left,
    });
    Some(Impact::TankHit)
}

fn deflect(bullet: &Bullet, tanks: &[Tank], events: &mut TickEvents) -> Option<Impact> {
    let target = tanks
        .iter()
        .find(|t| t.invulnerable && touches_enemy(bullet, t))?;

    events.effect(EffectRequest::Sparks { at: bullet.pos });
    events.cue(SoundCue::Hit);
    events.event(GameEvent::Deflected { target: target.team });
    Some(Impact::Deflected)
}

/// Close invulnerability windows that have run their course
pub fn expire_invulnerability(tanks: &mut [Tank], now_ms: f64) {
    for tank in tanks.iter_mut() {
        if tank.invulnerable && now_ms - tank.invulnerable_since_ms >= INVULNERABILITY_MS {
            tank.invulnerable = false;
            log::debug!("{} tank is vulnerable again", tank.team.name());
        }
    }
}
