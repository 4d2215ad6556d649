//! Player vs hazard collision
//!
//! Plain circle overlap for everything except an ultimate blast whose safe
//! zone is still on screen: there the player is safe only while fully inside
//! the shrunken safe circle.

use glam::Vec2;

use super::state::{GameState, Hazard, HazardKind, UltimatePart};

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Touched a hazard
    Overlap { hazard: u32 },
    /// Outside the safe zone while a blast covers the screen
    OutsideSafeZone { hazard: u32, zone: u32 },
}

/// Signed distance from `p` to a circle's edge (negative inside)
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Strict overlap of two circles
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    sd_circle(a, b, rb) < ra
}

/// Whether a player circle sits inside `zone` scaled by `shrink`
#[inline]
pub fn inside_safe_zone(player: Vec2, player_radius: f32, zone: &Hazard, shrink: f32) -> bool {
    player.distance(zone.pos) <= zone.radius * shrink - player_radius
}

/// First collision in hazard order, if any
pub fn find_collision(state: &GameState) -> Option<Collision> {
    let p = &state.player;

    for hazard in state.hazards.iter().filter(|h| h.is_alive()) {
        match hazard.kind {
            // Warnings only mark the zone
            HazardKind::Ultimate(UltimatePart::Warning) => continue,
            HazardKind::Ultimate(_) => {
                if let Some(zone) = state.safe_zone(hazard) {
                    if inside_safe_zone(p.pos, p.radius, zone, state.tuning.safe_zone_shrink) {
                        continue;
                    }
                    return Some(Collision::OutsideSafeZone {
                        hazard: hazard.id,
                        zone: zone.id,
                    });
                }
            }
            _ => {}
        }

        if circles_overlap(p.pos, p.radius, hazard.pos, hazard.radius) {
            return Some(Collision::Overlap { hazard: hazard.id });
        }
    }

    None
}
