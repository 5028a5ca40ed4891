//! Game session
//!
//! Glues device input, the fixed-timestep simulation and audio together.
//! Frontends call [`Game::frame`] once per displayed frame with the elapsed
//! time and the names of the keys currently held.

use std::collections::HashSet;

use crate::audio::{AudioManager, CuePlayer};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::input::KeyBindings;
use crate::settings::Settings;
use crate::sim::{AudioView, Control, GameEvent, MatchSnapshot, MatchState, TickInput, tick};

/// Longest frame the accumulator will absorb, in seconds
const MAX_FRAME_DT: f32 = 0.1;

/// Game instance holding all session state
#[derive(Debug)]
pub struct Game {
    pub state: MatchState,
    pub audio: AudioManager,
    pub bindings: KeyBindings,
    accumulator: f32,
    input: TickInput,
    /// Controls held last frame, for edge detection
    prev_held: HashSet<Control>,
    quit: bool,
    /// Gameplay events from the most recent frame
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        if !settings.music_enabled {
            audio.toggle_music();
        }

        Self {
            state: MatchState::with_effect_budget(seed, settings.max_effects()),
            audio,
            bindings: settings.bindings.clone(),
            accumulator: 0.0,
            input: TickInput::default(),
            prev_held: HashSet::new(),
            quit: false,
            events: Vec::new(),
        }
    }

    /// Attach an audio backend
    pub fn with_player(mut self, player: Box<dyn CuePlayer>) -> Self {
        self.audio.set_player(player);
        self
    }

    /// Feed the keys currently held. Global controls fire on the press edge.
    pub fn handle_keys<S: AsRef<str>>(&mut self, keys: &[S]) {
        let held = self.bindings.resolve(keys);

        let pressed: Vec<Control> = held
            .iter()
            .filter(|c| !self.prev_held.contains(*c))
            .copied()
            .collect();
        for control in pressed {
            match control {
                Control::Quit => {
                    log::info!("Quit requested");
                    self.quit = true;
                }
                Control::PauseToggle => self.input.pause = true,
                Control::Restart => self.input.restart = true,
                Control::VolumeUp => self.audio.volume_up(),
                Control::VolumeDown => self.audio.volume_down(),
                Control::MusicToggle => self.audio.toggle_music(),
                Control::RotateLeft(_) | Control::RotateRight(_) | Control::Advance(_) => {}
            }
        }

        self.input.held = held.clone();
        self.prev_held = held;
    }

    /// Run simulation ticks for `dt` seconds of wall time
    pub fn update(&mut self, dt: f32) {
        self.events.clear();
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.restart = false;

            let events = self.state.take_events();
            self.audio.play_all(&events.cues);
            self.events.extend(events.game);
        }
    }

    /// Input plus update in one call. Returns false once quit was requested.
    pub fn frame<S: AsRef<str>>(&mut self, dt: f32, keys: &[S]) -> bool {
        self.handle_keys(keys);
        if self.quit {
            return false;
        }
        self.update(dt);
        true
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Gameplay events produced during the last [`Game::update`]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Render view of the match plus the HUD's audio readout
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            audio: Some(AudioView {
                music_on: self.audio.music_playing(),
                volume_percent: self.audio.volume_percent(),
            }),
            ..self.state.snapshot()
        }
    }
}
