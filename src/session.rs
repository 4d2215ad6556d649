//! Frame loop driver
//!
//! Owns the game state plus everything around it that is not pure
//! simulation: stored scores, preferences and the storage backend. The
//! frontend calls [`Session::frame`] once per animation frame and stops
//! scheduling frames when it answers [`FrameStatus::Halt`].

use crate::highscores::HighScores;
use crate::persistence::KeyValueStore;
use crate::renderer::{Scene, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, Viewport, tick};
use crate::tuning::Tuning;

/// Whether the frontend should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Halt,
}

pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    pub settings: Settings,
    scores: HighScores,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, mut store: S) -> Self {
        let scores = HighScores::load(&store);
        let settings = Settings::load_or_init(&mut store);
        let mut state = GameState::new(seed, tuning, viewport);
        state.best = scores.best;
        log::info!("Session started with seed {} ({}x{})", seed, viewport.width, viewport.height);
        Self {
            state,
            settings,
            scores,
            store,
        }
    }

    /// Run one tick and persist whatever changed
    pub fn frame(&mut self, input: &TickInput) -> FrameStatus {
        tick(&mut self.state, input);

        for event in self.state.drain_events() {
            match event {
                GameEvent::HazardDestroyed { id, kind } => {
                    log::debug!("Destroyed {:?} #{}", kind, id);
                }
                GameEvent::UltimateSpawned { group, .. } => {
                    log::debug!("Ultimate group #{} incoming", group);
                }
                GameEvent::GameOver { score, best } => {
                    log::debug!("Run ended: {} (best {})", score, best);
                }
                GameEvent::SwordSwing { angle } => {
                    log::trace!("Swing at {:.0}°", angle.to_degrees());
                }
                GameEvent::HazardHit { id, kind, hp_left } => {
                    log::trace!("Hit {:?} #{} ({} left)", kind, id, hp_left);
                }
            }
        }

        self.persist();

        if self.state.is_over() {
            FrameStatus::Halt
        } else {
            FrameStatus::Continue
        }
    }

    fn persist(&mut self) {
        self.scores.save_score(&mut self.store, self.state.score);
        if self.state.best != self.scores.best {
            self.scores.save_best(&mut self.store, self.state.best);
        }
    }

    /// Fresh run, keeping the best score. The caller resumes scheduling.
    pub fn restart(&mut self) {
        self.state.restart();
        self.persist();
    }

    /// Keydown handler. Returns true when the key restarted the run.
    pub fn key_pressed(&mut self, code: &str) -> bool {
        if !crate::platform::is_restart(code, &self.settings) {
            return false;
        }
        self.restart();
        true
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
    }

    pub fn scene(&self) -> Scene {
        build_scene(&self.state, self.settings.show_status)
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best(&self) -> u64 {
        self.state.best
    }

    pub fn message(&self) -> Option<&str> {
        self.state.message.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
