//! Arc band geometry for the sword fan
//!
//! An arc segment around `center` is defined by:
//! - radius: distance from center to the band's centerline
//! - thickness: radial extent (inner = radius - thickness/2, outer = radius + thickness/2)
//! - theta_start, theta_end: angular extent

use glam::Vec2;

use super::state::GameState;
use crate::{normalize_angle, polar_to_cartesian};

/// A thickened arc segment in polar space around `center`
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub center: Vec2,
    /// Centerline radius
    pub radius: f32,
    /// Radial thickness (extends radius ± thickness/2)
    pub thickness: f32,
    /// Start angle (radians, normalized to [-π, π))
    pub theta_start: f32,
    /// End angle (radians, normalized to [-π, π))
    pub theta_end: f32,
}

impl ArcSegment {
    pub fn new(center: Vec2, radius: f32, thickness: f32, theta_start: f32, theta_end: f32) -> Self {
        Self {
            center,
            radius,
            thickness,
            theta_start: normalize_angle(theta_start),
            theta_end: normalize_angle(theta_end),
        }
    }

    /// The visible fan of the current swing, `None` when not swinging
    pub fn sword_fan(state: &GameState) -> Option<Self> {
        if !state.sword.active {
            return None;
        }
        let dpr = state.viewport.dpr;
        let half = state.tuning.sword_half_angle();
        let angle = state.sword.angle;
        Some(Self::new(
            state.player.pos,
            state.tuning.sword_range * dpr,
            state.tuning.sword_stroke * dpr,
            angle - half,
            angle + half,
        ))
    }

    /// Inner radius of the arc band
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.thickness / 2.0
    }

    /// Outer radius of the arc band
    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radius + self.thickness / 2.0
    }

    /// Angular span of the arc (handles wraparound)
    pub fn angular_span(&self) -> f32 {
        let mut span = self.theta_end - self.theta_start;
        if span < 0.0 {
            span += std::f32::consts::TAU;
        }
        span
    }

    /// Point on the centerline at `t` in [0, 1] along the span
    pub fn point_at(&self, t: f32, r: f32) -> Vec2 {
        let theta = self.theta_start + t * self.angular_span();
        self.center + polar_to_cartesian(r, theta)
    }
}
