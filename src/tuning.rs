//! Data-driven game balance
//!
//! Every number the simulation needs lives here so a build can override the
//! feel of the game from a JSON blob. Distances are in logical pixels and are
//! scaled by the device pixel ratio where the simulation uses them.

use serde::{Deserialize, Serialize};

/// Gameplay balance numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Collision/draw radius of the avatar
    pub player_radius: f32,
    /// Fraction of the remaining distance to the pointer covered each frame
    pub follow_factor: f32,

    // === Hazards (shared) ===
    /// Fraction of the radius gap closed each frame
    pub grow_factor: f32,

    // === Small ===
    /// Per-frame spawn probability
    pub small_spawn_chance: f64,
    pub small_speed_min: f32,
    pub small_speed_max: f32,
    pub small_radius_min: f32,
    pub small_radius_max: f32,
    pub small_target_radius_min: f32,
    pub small_target_radius_max: f32,
    /// How far beyond the screen edge smalls appear (physical px)
    pub small_edge_offset: f32,
    pub small_ttl: i32,

    // === Big ===
    /// Spawn every N frames
    pub big_interval: u64,
    pub big_speed: f32,
    pub big_start_radius: f32,
    /// Entry distance beyond the edge, as a multiple of the target radius
    pub big_entry_factor: f32,
    pub big_ttl: i32,

    // === Ultimate ===
    /// Spawn every N frames (never on frame 0)
    pub ultimate_interval: u64,
    /// Safe zone radius as a fraction of min(w, h)
    pub safe_zone_fraction: f32,
    /// Usable part of the safe zone (the hole is drawn at this scale too)
    pub safe_zone_shrink: f32,
    pub warning_ttl: i32,
    pub body_ttl: i32,
    pub fade_ttl: i32,

    // === Sword ===
    pub sword_duration: u32,
    pub sword_cooldown: u32,
    /// Reach of the swing
    pub sword_range: f32,
    /// Half opening of the strike cone, degrees
    pub sword_half_angle_deg: f32,
    /// Stroke width of the drawn fan
    pub sword_stroke: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 10.0,
            follow_factor: 0.25,

            grow_factor: 0.08,

            small_spawn_chance: 0.8,
            small_speed_min: 0.5,
            small_speed_max: 2.2,
            small_radius_min: 6.0,
            small_radius_max: 14.0,
            small_target_radius_min: 6.0,
            small_target_radius_max: 18.0,
            small_edge_offset: 20.0,
            small_ttl: 1200,

            big_interval: 180,
            big_speed: 1.2,
            big_start_radius: 10.0,
            big_entry_factor: 1.2,
            big_ttl: 800,

            ultimate_interval: 600,
            safe_zone_fraction: 0.12,
            safe_zone_shrink: 0.9,
            warning_ttl: 60,
            body_ttl: 48,
            fade_ttl: 8,

            sword_duration: 10,
            sword_cooldown: 18,
            sword_range: 160.0,
            sword_half_angle_deg: 40.0,
            sword_stroke: 8.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Half opening of the strike cone in radians
    #[inline]
    pub fn sword_half_angle(&self) -> f32 {
        self.sword_half_angle_deg.to_radians()
    }

    /// Tuning with no random small spawns (scripted tests and demos)
    pub fn without_smalls() -> Self {
        Self {
            small_spawn_chance: 0.0,
            ..Self::default()
        }
    }
}
