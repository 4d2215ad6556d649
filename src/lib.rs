//! Dodge Blobs - dodge the red blobs, slash them with a short sword
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, melee, collisions, game state)
//! - `renderer`: Scene building and the WebGPU backend
//! - `platform`: Viewport / pointer coordinate handling
//! - `persistence`: Best-effort key/value storage
//! - `tuning`: Data-driven game balance
//! - `session`: Frame driver tying simulation, persistence and scheduling together

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::{FrameStatus, Session};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Storage key for the best score
    pub const BEST_KEY: &str = "dodge-blobs:best";
    /// Storage key for the most recent score
    pub const SCORE_KEY: &str = "dodge-blobs:score";
    /// Storage key for serialized settings
    pub const SETTINGS_KEY: &str = "dodge-blobs:settings";

    /// Hint shown on first load
    pub const START_MESSAGE: &str = "Click/tap to swing! small=1 hit, big=2 hits, ultimate=3 hits";
    /// Hint shown after a restart
    pub const RESTART_MESSAGE: &str = "Slash the blobs! Ultimate takes 3 hits. Space to restart";
    /// Status line after a collision
    pub const GAME_OVER_MESSAGE: &str = "GAME OVER : press Space to restart";
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

/// Absolute angular distance between two angles, wrapped to [0, π]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let d = (a - b).abs() % TAU;
    if d > PI { TAU - d } else { d }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
