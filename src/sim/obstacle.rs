//! Obstacle registry: destructible and indestructible terrain
//!
//! All archetypes share one 40×40 box and differ only in starting health and
//! destructibility, so they are one entity type tagged with an [`ObstacleKind`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Obstacle archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Indestructible; its huge health is only a sentinel
    Rock,
    Bush,
    Wall,
    Crate,
}

impl ObstacleKind {
    pub fn max_health(self) -> u32 {
        match self {
            ObstacleKind::Rock => 999,
            ObstacleKind::Bush => 2,
            ObstacleKind::Wall => 5,
            ObstacleKind::Crate => 3,
        }
    }

    pub fn destructible(self) -> bool {
        !matches!(self, ObstacleKind::Rock)
    }

    /// How many of each kind a fresh arena gets
    pub fn field_count(self) -> usize {
        match self {
            ObstacleKind::Rock => ROCK_COUNT,
            ObstacleKind::Bush => BUSH_COUNT,
            ObstacleKind::Wall => WALL_COUNT,
            ObstacleKind::Crate => CRATE_COUNT,
        }
    }

    /// Generation order
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Rock,
        ObstacleKind::Bush,
        ObstacleKind::Wall,
        ObstacleKind::Crate,
    ];
}

/// A terrain block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub destructible: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            health: kind.max_health(),
            max_health: kind.max_health(),
            destructible: kind.destructible(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(OBSTACLE_SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Take one point of damage. Returns true once health reaches zero.
    ///
    /// Indestructible obstacles ignore damage and never report destruction.
    pub fn apply_damage(&mut self) -> bool {
        if !self.destructible {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }
}

/// Result of a placement attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    /// True when the retry budget ran out and the position was not checked
    pub fallback: bool,
}

fn random_slot<R: Rng>(rng: &mut R) -> Vec2 {
    let x = rng.random_range(PLACEMENT_MIN_X..=PLACEMENT_MAX_X);
    let y = rng.random_range(PLACEMENT_MIN_Y..=PLACEMENT_MAX_Y);
    Vec2::new(x as f32, y as f32)
}

/// Pick an obstacle position that avoids every forbidden rectangle
///
/// Rejection sampling with a bounded retry budget. Once the budget is spent an
/// unchecked position is returned, so rare overlaps are possible in crowded
/// arenas.
pub fn find_placement<R: Rng>(rng: &mut R, forbidden: &[Rect], attempts: u32) -> Placement {
    for _ in 0..attempts {
        let pos = random_slot(rng);
        let candidate = Rect {
            pos,
            size: Vec2::splat(OBSTACLE_SIZE),
        };
        if !forbidden.iter().any(|r| candidate.intersects(r)) {
            return Placement {
                pos,
                fallback: false,
            };
        }
    }

    Placement {
        pos: random_slot(rng),
        fallback: true,
    }
}

/// Generate a full arena of obstacles around the given spawn boxes
///
/// `next_id` is advanced for every obstacle created.
pub fn generate_field<R: Rng>(rng: &mut R, spawn_boxes: &[Rect], next_id: &mut u32) -> Vec<Obstacle> {
    let mut forbidden: Vec<Rect> = spawn_boxes
        .iter()
        .map(|r| r.inflate(SPAWN_SAFETY_MARGIN))
        .collect();
    let mut obstacles = Vec::new();
    let mut fallbacks = 0;

    for kind in ObstacleKind::ALL {
        for _ in 0..kind.field_count() {
            let placement = find_placement(rng, &forbidden, PLACEMENT_ATTEMPTS);
            if placement.fallback {
                fallbacks += 1;
                log::warn!(
                    "No free slot for {:?} after {} attempts, placing at ({}, {})",
                    kind,
                    PLACEMENT_ATTEMPTS,
                    placement.pos.x,
                    placement.pos.y
                );
            }
            let obstacle = Obstacle::new(*next_id, kind, placement.pos);
            *next_id += 1;
            forbidden.push(obstacle.rect());
            obstacles.push(obstacle);
        }
    }

    log::debug!("Generated {} obstacles ({} fallback placements)", obstacles.len(), fallbacks);
    obstacles
}
