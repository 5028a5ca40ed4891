//! Tank Duel - A two-player, same-screen tank arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, projectiles, combat, effects, match state)
//! - `input`: Key bindings from device key names to abstract controls
//! - `audio`: Sound cue dispatch to an optional playback backend
//! - `settings`: Runtime preferences (effect budget, volume, bindings)
//! - `game`: Session driver (fixed timestep, global controls)

pub mod audio;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in pixels, kinematic rates are "per nominal tick" (1/60 s) and
/// get scaled by `dt * TICK_RATE` so motion is frame-rate independent.
pub mod consts {
    use glam::Vec2;

    /// Nominal simulation rate (Hz)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;
    /// Reserved HUD strip at the top of the screen; tanks may not enter it
    pub const HUD_HEIGHT: f32 = 80.0;

    /// Tank defaults
    pub const TANK_SIZE: f32 = 30.0;
    pub const TANK_SPEED: f32 = 4.0;
    /// Radians per nominal tick
    pub const TANK_TURN_RATE: f32 = 0.1;
    pub const TANK_LIVES: u8 = 3;
    pub const HIT_SCORE: u32 = 10;
    pub const FIRE_COOLDOWN_MS: f64 = 500.0;
    /// Distance from tank center to the muzzle
    pub const MUZZLE_OFFSET: f32 = 25.0;
    pub const TRAIL_INTERVAL_MS: f64 = 50.0;
    pub const SMOKE_INTERVAL_MS: f64 = 100.0;
    pub const INVULNERABILITY_MS: f64 = 2000.0;
    /// Blink cadence while invulnerable (render hint only)
    pub const INVULNERABILITY_BLINK_MS: f64 = 100.0;

    /// Spawn points (top-left of the tank box)
    pub const BLUE_SPAWN: Vec2 = Vec2::new(100.0, 100.0);
    pub const RED_SPAWN: Vec2 = Vec2::new(800.0, 500.0);

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_LIFETIME_MS: f64 = 3000.0;
    /// Slack beyond the screen edge before a bullet counts as off-screen
    pub const OFFSCREEN_MARGIN: f32 = 10.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const ROCK_COUNT: usize = 20;
    pub const BUSH_COUNT: usize = 25;
    pub const WALL_COUNT: usize = 15;
    pub const CRATE_COUNT: usize = 10;
    /// Clearance kept around each spawn point when placing obstacles
    pub const SPAWN_SAFETY_MARGIN: f32 = 60.0;
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
    /// Placement window (inclusive, top-left corner)
    pub const PLACEMENT_MIN_X: i32 = 50;
    pub const PLACEMENT_MAX_X: i32 = SCREEN_WIDTH as i32 - 90;
    pub const PLACEMENT_MIN_Y: i32 = 130;
    pub const PLACEMENT_MAX_Y: i32 = SCREEN_HEIGHT as i32 - 90;

    /// Default global effect budget
    pub const MAX_EFFECTS: usize = 50;

    /// Audio defaults
    pub const DEFAULT_VOLUME: f32 = 0.3;
    pub const VOLUME_STEP: f32 = 0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Scale factor turning a "per nominal tick" rate into a per-`dt` step
#[inline]
pub fn tick_scale(dt: f32) -> f32 {
    dt * consts::TICK_RATE
}
