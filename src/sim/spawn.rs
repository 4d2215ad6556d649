//! Procedural hazard spawning
//!
//! Runs once per frame before anything moves. Three independent checks, in
//! order: a random small, a scheduled big, a scheduled ultimate group.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GameState, Hazard, HazardGroup, HazardKind, UltimatePart};
use crate::polar_to_cartesian;

/// Uniform in [min, max); collapses to `min` on an empty range
fn rand_between(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max > min { rng.random_range(min..max) } else { min }
}

/// Append whatever hazards frame `state.frame` calls for
pub fn spawn_hazards(state: &mut GameState) {
    let t = state.frame;

    if state.rng.random::<f64>() < state.tuning.small_spawn_chance {
        spawn_small(state);
    }
    if state.tuning.big_interval > 0 && t % state.tuning.big_interval == 0 {
        spawn_big(state);
    }
    if state.tuning.ultimate_interval > 0 && t > 0 && t % state.tuning.ultimate_interval == 0 {
        spawn_ultimate(state);
    }
}

/// A small blob drifting in from just past a random edge
pub fn spawn_small(state: &mut GameState) {
    let (w, h) = (state.viewport.width, state.viewport.height);
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let speed = rand_between(rng, tuning.small_speed_min, tuning.small_speed_max);
    let angle = rand_between(rng, 0.0, std::f32::consts::TAU);
    let off = tuning.small_edge_offset;
    let pos = match rng.random_range(0..4u8) {
        0 => Vec2::new(-off, rand_between(rng, 0.0, h)),
        1 => Vec2::new(w + off, rand_between(rng, 0.0, h)),
        2 => Vec2::new(rand_between(rng, 0.0, w), -off),
        _ => Vec2::new(rand_between(rng, 0.0, w), h + off),
    };
    let radius = rand_between(rng, tuning.small_radius_min, tuning.small_radius_max);
    let target_radius =
        rand_between(rng, tuning.small_target_radius_min, tuning.small_target_radius_max);
    let ttl = tuning.small_ttl;

    let id = state.next_entity_id();
    state.hazards.push(Hazard {
        id,
        kind: HazardKind::Small,
        pos,
        vel: polar_to_cartesian(speed, angle),
        radius,
        target_radius,
        ttl,
        hp: Some(HazardKind::Small.base_hp()),
        group: None,
    });
}

/// A big blob entering from one side, aimed at the player
pub fn spawn_big(state: &mut GameState) {
    let vp = state.viewport;
    let target_radius = vp.min_side() / 4.0;
    let entry = target_radius * state.tuning.big_entry_factor;

    let mut pos = vp.center();
    match state.rng.random_range(0..4u8) {
        0 => pos.x = -entry,
        1 => pos.x = vp.width + entry,
        2 => pos.y = -entry,
        _ => pos.y = vp.height + entry,
    }

    let to_player = state.player.pos - pos;
    let angle = to_player.y.atan2(to_player.x);

    let id = state.next_entity_id();
    state.hazards.push(Hazard {
        id,
        kind: HazardKind::Big,
        pos,
        vel: polar_to_cartesian(state.tuning.big_speed, angle),
        radius: state.tuning.big_start_radius,
        target_radius,
        ttl: state.tuning.big_ttl,
        hp: Some(HazardKind::Big.base_hp()),
        group: None,
    });
}

/// Warning + body + fade, sharing one group
pub fn spawn_ultimate(state: &mut GameState) {
    let vp = state.viewport;
    let safe_radius = vp.min_side() * state.tuning.safe_zone_fraction;
    // Safe circle stays fully on screen
    let safe_center = Vec2::new(
        rand_between(&mut state.rng, safe_radius, vp.width - safe_radius),
        rand_between(&mut state.rng, safe_radius, vp.height - safe_radius),
    );
    let full_radius = vp.diagonal();

    let group_id = state.next_entity_id();
    let warning = state.next_entity_id();
    let body = state.next_entity_id();
    let fade = state.next_entity_id();

    let base = Hazard {
        id: warning,
        kind: HazardKind::Ultimate(UltimatePart::Warning),
        pos: safe_center,
        vel: Vec2::ZERO,
        radius: safe_radius,
        target_radius: safe_radius,
        ttl: state.tuning.warning_ttl,
        hp: None,
        group: Some(group_id),
    };
    state.hazards.push(base.clone());
    state.hazards.push(Hazard {
        id: body,
        kind: HazardKind::Ultimate(UltimatePart::Body),
        pos: vp.center(),
        radius: 0.0,
        target_radius: full_radius,
        ttl: state.tuning.body_ttl,
        hp: Some(HazardKind::Ultimate(UltimatePart::Body).base_hp()),
        ..base.clone()
    });
    state.hazards.push(Hazard {
        id: fade,
        kind: HazardKind::Ultimate(UltimatePart::Fade),
        pos: vp.center(),
        radius: full_radius,
        target_radius: full_radius,
        ttl: state.tuning.fade_ttl,
        hp: Some(HazardKind::Ultimate(UltimatePart::Fade).base_hp()),
        ..base
    });
    state.groups.push(HazardGroup {
        id: group_id,
        warning,
        body,
        fade,
    });

    state.events.push(GameEvent::UltimateSpawned {
        group: group_id,
        safe_center,
        safe_radius,
    });
    log::info!(
        "Ultimate {} at frame {}: safe zone ({:.0}, {:.0}) r={:.0}",
        group_id,
        state.frame,
        safe_center.x,
        safe_center.y,
        safe_radius
    );
}
