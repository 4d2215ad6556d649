//! Sword swings and strike resolution
//!
//! A swing is a cone anchored on the player: `range + hazard radius` deep and
//! `±half_angle` wide around the swing direction. Every tangible hazard inside
//! takes one hit per frame while the swing lasts.

use glam::Vec2;

use super::state::{GameEvent, GameState, Hazard};
use crate::angle_between;

/// Strike area of the active swing
#[derive(Debug, Clone, Copy)]
pub struct StrikeCone {
    pub origin: Vec2,
    pub angle: f32,
    pub reach: f32,
    pub half_angle: f32,
}

impl StrikeCone {
    /// Cone of the current swing, in physical pixels
    pub fn of(state: &GameState) -> Self {
        Self {
            origin: state.player.pos,
            angle: state.sword.angle,
            reach: state.tuning.sword_range * state.viewport.dpr,
            half_angle: state.tuning.sword_half_angle(),
        }
    }

    /// Whether a circle of `radius` at `center` is inside the cone
    pub fn contains(&self, center: Vec2, radius: f32) -> bool {
        let d = center - self.origin;
        let dist = d.length();
        dist <= self.reach + radius && angle_between(d.y.atan2(d.x), self.angle) <= self.half_angle
    }

    pub fn hits(&self, hazard: &Hazard) -> bool {
        hazard.kind.damageable() && self.contains(hazard.pos, hazard.radius)
    }
}

/// Swing toward the tracked pointer if the cooldown allows it
pub fn try_swing(state: &mut GameState) -> bool {
    let swung = state
        .sword
        .try_swing(state.player.pos, state.input.pos, &state.tuning);
    if swung {
        state.events.push(GameEvent::SwordSwing {
            angle: state.sword.angle,
        });
    }
    swung
}

/// Apply this frame's sword hits. Killed hazards get `ttl = 0` and are
/// dropped by the caller's prune; nothing dead is hit twice.
pub fn resolve_melee(state: &mut GameState) {
    if !state.sword.active {
        return;
    }
    let cone = StrikeCone::of(state);

    for i in 0..state.hazards.len() {
        let hazard = &mut state.hazards[i];
        if !hazard.is_alive() || !cone.hits(hazard) {
            continue;
        }

        let destroyed = hazard.take_hit();
        let (id, kind, group) = (hazard.id, hazard.kind, hazard.group);
        state.score += 1;
        state.events.push(GameEvent::HazardHit {
            id,
            kind,
            hp_left: hazard.hp.unwrap_or(0),
        });

        if !destroyed {
            continue;
        }
        hazard.kill();
        state.events.push(GameEvent::HazardDestroyed { id, kind });
        log::debug!("Destroyed {:?} #{} at frame {}", kind, id, state.frame);

        // Body and fade go together; the warning runs out its own ttl
        if kind.is_ultimate() {
            if let Some(group) = group.and_then(|g| state.group(g)).copied() {
                for member in [group.body, group.fade] {
                    if member == id {
                        continue;
                    }
                    if let Some(other) = state.hazard_mut(member).filter(|h| h.is_alive()) {
                        let other_kind = other.kind;
                        other.kill();
                        state.events.push(GameEvent::HazardDestroyed {
                            id: member,
                            kind: other_kind,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_ultimate;
    use crate::sim::state::{HazardKind, UltimatePart, Viewport};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(11, Tuning::without_smalls(), Viewport::new(1000.0, 800.0, 1.0))
    }

    fn place(state: &mut GameState, kind: HazardKind, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            target_radius: radius,
            ttl: 100,
            hp: None,
            group: None,
        });
        id
    }

    #[test]
    fn test_cone_edges() {
        let cone = StrikeCone {
            origin: Vec2::ZERO,
            angle: 0.0,
            reach: 160.0,
            half_angle: 40f32.to_radians(),
        };
        assert!(cone.contains(Vec2::new(50.0, 0.0), 5.0));
        // reach is extended by the target radius
        assert!(cone.contains(Vec2::new(169.0, 0.0), 10.0));
        assert!(!cone.contains(Vec2::new(171.0, 0.0), 10.0));
        // 39° in, 41° out
        let r = 100.0;
        assert!(cone.contains(crate::polar_to_cartesian(r, 39f32.to_radians()), 1.0));
        assert!(!cone.contains(crate::polar_to_cartesian(r, 41f32.to_radians()), 1.0));
        assert!(!cone.contains(Vec2::new(-50.0, 0.0), 5.0));
    }

    #[test]
    fn test_cone_wraps_around_pi() {
        let cone = StrikeCone {
            origin: Vec2::ZERO,
            angle: std::f32::consts::PI - 0.1,
            reach: 160.0,
            half_angle: 40f32.to_radians(),
        };
        // angle ~ -PI + 0.1 is 0.2 rad away through the seam
        assert!(cone.contains(crate::polar_to_cartesian(100.0, -std::f32::consts::PI + 0.1), 1.0));
    }

    #[test]
    fn test_no_hits_without_active_swing() {
        let mut state = state();
        let p = state.player.pos;
        place(&mut state, HazardKind::Small, p + Vec2::new(50.0, 0.0), 8.0);
        resolve_melee(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.hazards[0].hp, None);
    }

    #[test]
    fn test_big_takes_two_frames() {
        let mut state = state();
        let p = state.player.pos;
        let id = place(&mut state, HazardKind::Big, p + Vec2::new(80.0, 0.0), 30.0);
        state.input.track(p + Vec2::new(10.0, 0.0));
        assert!(try_swing(&mut state));

        resolve_melee(&mut state);
        assert_eq!(state.score, 1);
        assert!(state.hazard(id).unwrap().is_alive());
        resolve_melee(&mut state);
        assert_eq!(state.score, 2);
        assert!(!state.hazard(id).unwrap().is_alive());

        // dead hazards are not hit again
        resolve_melee(&mut state);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_warning_is_intangible() {
        let mut state = state();
        let p = state.player.pos;
        let id = place(
            &mut state,
            HazardKind::Ultimate(UltimatePart::Warning),
            p + Vec2::new(40.0, 0.0),
            30.0,
        );
        state.input.track(p + Vec2::new(10.0, 0.0));
        try_swing(&mut state);
        resolve_melee(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.hazard(id).unwrap().hp, None);
    }

    #[test]
    fn test_killing_body_takes_fade_but_not_warning() {
        let mut state = state();
        spawn_ultimate(&mut state);
        let group = state.groups[0];
        // Put the swing squarely on the blast's centre
        state.player.pos = Vec2::new(300.0, 400.0);
        state.input.track(Vec2::new(500.0, 400.0));
        state.hazard_mut(group.body).unwrap().radius = 1000.0;
        state.hazard_mut(group.body).unwrap().hp = Some(1);
        state.hazard_mut(group.fade).unwrap().pos = Vec2::new(-5000.0, 0.0);
        let warning_ttl = state.hazard(group.warning).unwrap().ttl;

        try_swing(&mut state);
        resolve_melee(&mut state);

        assert!(!state.hazard(group.body).unwrap().is_alive());
        assert!(!state.hazard(group.fade).unwrap().is_alive());
        assert_eq!(state.hazard(group.warning).unwrap().ttl, warning_ttl);
        assert_eq!(state.score, 1);

        state.prune();
        assert_eq!(state.hazards.len(), 1);
        assert!(state.hazards[0].kind.is_warning());
        // group survives while its warning does
        assert_eq!(state.groups.len(), 1);
    }
}
