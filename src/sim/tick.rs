//! Simulation tick
//!
//! Advances the match by one timestep. Order within a playing tick:
//! tanks (move, fire) → bullet integration and culling → collision resolution
//! → invulnerability expiry → effect spawning and aging → outcome check.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::combat::{expire_invulnerability, resolve_bullets};
use super::events::TickEvents;
use super::projectile::{Bullet, advance_bullets};
use super::state::{GamePhase, MatchState};
use super::tank::{Tank, TankControls, Team};

/// Abstract control identifiers, bindable to any input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    RotateLeft(Team),
    RotateRight(Team),
    /// Drive forward and fire
    Advance(Team),
    PauseToggle,
    Restart,
    Quit,
    VolumeUp,
    VolumeDown,
    MusicToggle,
}

/// Input for a single tick
///
/// `held` is the level state of every control. `pause` and `restart` are
/// edges, already debounced by the caller. Controls missing from `held` are
/// simply not pressed.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub held: HashSet<Control>,
    /// Pause toggle pressed this tick
    pub pause: bool,
    /// Restart pressed this tick
    pub restart: bool,
}

impl TickInput {
    pub fn from_held<I: IntoIterator<Item = Control>>(held: I) -> Self {
        Self {
            held: held.into_iter().collect(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    pub fn controls_for(&self, team: Team) -> TankControls {
        TankControls {
            rotate_left: self.is_held(Control::RotateLeft(team)),
            rotate_right: self.is_held(Control::RotateRight(team)),
            advance: self.is_held(Control::Advance(team)),
        }
    }
}

/// Advance the match by `dt` seconds
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
    }
    if input.pause {
        state.toggle_pause();
    }

    // Frozen unless playing
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.clock_ms += dt as f64 * 1000.0;
    let now = state.clock_ms;
    let mut events = TickEvents::new();

    // Tanks move one after another, so the second sees the first's new box
    for team in Team::ALL {
        let idx = team.index();
        if !state.tanks[idx].is_alive() {
            continue;
        }
        let others: Vec<Rect> = state
            .tanks
            .iter()
            .filter(|t| t.team != team && t.is_alive())
            .map(Tank::rect)
            .collect();

        let wants_fire = state.tanks[idx].rotate_and_advance(
            input.controls_for(team),
            &state.obstacles,
            &others,
            now,
            dt,
            &mut events,
        );
        if wants_fire {
            if let Some(spawn) = state.tanks[idx].try_fire(now, &mut events) {
                let id = state.next_entity_id();
                state.bullets.push(Bullet::from_spawn(id, spawn, now));
            }
        }
    }

    advance_bullets(&mut state.bullets, now, dt, &mut events);
    let impacts = resolve_bullets(
        &mut state.bullets,
        &mut state.obstacles,
        &mut state.tanks,
        now,
        &mut events,
    );
    if !impacts.is_empty() {
        log::trace!("tick {}: {:?}", state.time_ticks, impacts);
    }
    expire_invulnerability(&mut state.tanks, now);

    // Cosmetics last; they never feed back into gameplay
    state.apply_effects(&events.effects);
    state.effects.update(dt);

    state.events.append(events);
    state.evaluate_outcome();
}
