//! Sound cue dispatch
//!
//! The simulation only names cues. Actual playback lives behind [`CuePlayer`],
//! so a frontend can plug in its own mixer. With no backend every cue is a
//! silent no-op and the match plays exactly the same.

use crate::consts::{DEFAULT_VOLUME, VOLUME_STEP};
use crate::sim::SoundCue;

/// Playback backend
///
/// Implementations must not block and must swallow their own failures
/// (missing samples, device errors).
pub trait CuePlayer {
    /// Play a one-shot cue, or start/stop a loop for the engine cues
    fn play(&mut self, cue: SoundCue, volume: f32);

    /// Background music state
    fn set_music(&mut self, playing: bool, volume: f32);
}

/// Backend that only writes cues to the log
#[derive(Debug, Default)]
pub struct LogPlayer;

impl CuePlayer for LogPlayer {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("cue {:?} at volume {:.2}", cue, volume);
    }

    fn set_music(&mut self, playing: bool, volume: f32) {
        log::debug!("music {} at volume {:.2}", if playing { "on" } else { "off" }, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    player: Option<Box<dyn CuePlayer>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    music_paused: bool,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("backend", &self.player.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("music_volume", &self.music_volume)
            .field("music_paused", &self.music_paused)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    /// Manager without a backend; every cue is dropped
    pub fn new() -> Self {
        Self {
            player: None,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: DEFAULT_VOLUME,
            music_paused: false,
            muted: false,
        }
    }

    pub fn with_player(player: Box<dyn CuePlayer>) -> Self {
        let mut audio = Self::new();
        audio.set_player(player);
        audio
    }

    /// Install a backend and start the music on it
    pub fn set_player(&mut self, player: Box<dyn CuePlayer>) {
        self.player = Some(player);
        self.sync_music();
    }

    pub fn has_backend(&self) -> bool {
        self.player.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    /// Music volume as a whole percentage, for the HUD
    pub fn volume_percent(&self) -> u32 {
        (self.music_volume * 100.0).round() as u32
    }

    pub fn music_playing(&self) -> bool {
        !self.music_paused
    }

    pub fn volume_up(&mut self) {
        self.step_music_volume(VOLUME_STEP);
    }

    pub fn volume_down(&mut self) {
        self.step_music_volume(-VOLUME_STEP);
    }

    fn step_music_volume(&mut self, delta: f32) {
        // Round to the step grid so repeated presses land on 0.0 and 1.0 exactly
        let stepped = ((self.music_volume + delta) / VOLUME_STEP).round() * VOLUME_STEP;
        self.music_volume = stepped.clamp(0.0, 1.0);
        log::info!("Volume: {}%", self.volume_percent());
        self.sync_music();
    }

    pub fn toggle_music(&mut self) {
        self.music_paused = !self.music_paused;
        log::info!("Music {}", if self.music_paused { "paused" } else { "resumed" });
        self.sync_music();
    }

    fn sync_music(&mut self) {
        let playing = !self.music_paused && !self.muted;
        let volume = self.music_volume * self.master_volume;
        if let Some(player) = self.player.as_mut() {
            player.set_music(playing, volume);
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(player) = self.player.as_mut() else { return };
        player.play(cue, vol);
    }

    pub fn play_all(&mut self, cues: &[SoundCue]) {
        for cue in cues {
            self.play(*cue);
        }
    }
}
