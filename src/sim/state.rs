//! Match state and phase machine
//!
//! The match owns both tanks, the bullets, the obstacle field and the effect
//! pool. Subsystems borrow them for the duration of one tick only.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::EffectPool;
use super::events::{EffectRequest, GameEvent, SoundCue, TickEvents};
use super::obstacle::{Obstacle, generate_field};
use super::projectile::Bullet;
use super::tank::{Tank, Team};
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, waiting for the pause toggle
    Paused,
    /// A tank (or both) ran out of lives; waits for restart
    MatchOver,
}

/// Final outcome of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Winner(Team),
    Draw,
}

impl MatchResult {
    /// Banner text shown on the match-over screen
    pub fn banner(self) -> String {
        match self {
            MatchResult::Winner(team) => format!("{} tank wins!", team.name()),
            MatchResult::Draw => "Draw!".to_string(),
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Seed the match was created with
    pub seed: u64,
    /// Drives obstacle placement and cosmetic randomness
    pub(super) rng: Pcg32,
    pub phase: GamePhase,
    pub result: Option<MatchResult>,
    /// Match clock, advanced only while playing
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Indexed by [`Team::index`]
    pub tanks: [Tank; 2],
    /// Live bullets (sorted by id)
    pub bullets: Vec<Bullet>,
    /// Obstacle field (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Cosmetic effects, never read by gameplay
    pub effects: EffectPool,
    /// Cues and events not yet collected by the session
    pub events: TickEvents,
    next_id: u32,
}

impl MatchState {
    /// Create a match with the default effect budget
    pub fn new(seed: u64) -> Self {
        Self::with_effect_budget(seed, MAX_EFFECTS)
    }

    pub fn with_effect_budget(seed: u64, budget: usize) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            result: None,
            clock_ms: 0.0,
            time_ticks: 0,
            tanks: [Tank::new(Team::Blue), Tank::new(Team::Red)],
            bullets: Vec::new(),
            obstacles: Vec::new(),
            effects: EffectPool::new(budget),
            events: TickEvents::new(),
            next_id: 1,
        };
        state.populate_arena();
        log::info!(
            "Match started (seed {}, {} obstacles, effect budget {})",
            seed,
            state.obstacles.len(),
            budget
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn tank(&self, team: Team) -> &Tank {
        &self.tanks[team.index()]
    }

    pub fn tank_mut(&mut self, team: Team) -> &mut Tank {
        &mut self.tanks[team.index()]
    }

    fn populate_arena(&mut self) {
        let spawn_boxes: Vec<Rect> = self.tanks.iter().map(Tank::rect).collect();
        let mut next_id = self.next_id;
        self.obstacles = generate_field(&mut self.rng, &spawn_boxes, &mut next_id);
        self.next_id = next_id;
    }

    /// Rebuild both tanks, clear bullets and effects, regenerate obstacles and
    /// resume play. Valid from any phase.
    pub fn restart(&mut self) {
        self.stop_engines();

        self.tanks = [Tank::new(Team::Blue), Tank::new(Team::Red)];
        self.bullets.clear();
        self.effects.clear();
        self.obstacles.clear();
        self.clock_ms = 0.0;
        self.time_ticks = 0;
        self.populate_arena();

        self.phase = GamePhase::Playing;
        self.result = None;
        log::info!("Match restarted ({} obstacles)", self.obstacles.len());
    }

    /// Flip between playing and paused. Ignored once the match is over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.stop_engines();
                self.events.cue(SoundCue::PauseIn);
                log::info!("Match paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.cue(SoundCue::PauseOut);
                log::info!("Match resumed");
            }
            GamePhase::MatchOver => {}
        }
    }

    fn stop_engines(&mut self) {
        for tank in self.tanks.iter_mut() {
            tank.stop_engine(&mut self.events);
        }
    }

    /// Materialize cosmetic requests into the effect pool
    pub fn apply_effects(&mut self, requests: &[EffectRequest]) {
        for request in requests {
            self.effects.apply(*request, &mut self.rng);
        }
    }

    /// Check for the end of the match after a playing tick
    ///
    /// Both tanks dead is a draw, one dead tank hands the win to the other.
    pub fn evaluate_outcome(&mut self) -> Option<MatchResult> {
        if self.phase != GamePhase::Playing {
            return self.result;
        }

        let blue_alive = self.tank(Team::Blue).is_alive();
        let red_alive = self.tank(Team::Red).is_alive();
        let result = match (blue_alive, red_alive) {
            (false, false) => MatchResult::Draw,
            (true, false) => MatchResult::Winner(Team::Blue),
            (false, true) => MatchResult::Winner(Team::Red),
            (true, true) => return None,
        };

        self.phase = GamePhase::MatchOver;
        self.result = Some(result);
        self.stop_engines();
        self.events.event(GameEvent::MatchOver { result });
        log::info!(
            "Match over: {} (Blue {} / Red {})",
            result.banner(),
            self.tank(Team::Blue).score,
            self.tank(Team::Red).score
        );
        Some(result)
    }

    /// Hand over everything emitted since the last call
    pub fn take_events(&mut self) -> TickEvents {
        std::mem::take(&mut self.events)
    }

    /// Scores in team order
    pub fn scores(&self) -> [u32; 2] {
        [self.tanks[0].score, self.tanks[1].score]
    }
}
