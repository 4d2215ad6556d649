//! One simulation frame
//!
//! Order within a frame: pointer -> spawn -> player follow -> sword
//! timers -> hazard move/grow/age -> sword hits -> prune -> player collision.

use glam::Vec2;

use super::collision::find_collision;
use super::melee::{resolve_melee, try_swing};
use super::spawn::spawn_hazards;
use super::state::GameState;

/// Input gathered since the previous frame (last event wins)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer/touch position, physical pixels
    pub pointer: Option<Vec2>,
    /// Primary button / touch start
    pub attack: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if let Some(pos) = input.pointer {
        state.input.track(pos);
    }

    // Frozen until restart
    if state.is_over() {
        return;
    }

    if input.attack {
        try_swing(state);
    }

    state.frame += 1;
    spawn_hazards(state);

    if state.input.active {
        let factor = state.tuning.follow_factor;
        state.player.follow(state.input.pos, factor);
    }

    state.sword.update();

    let grow = state.tuning.grow_factor;
    for hazard in &mut state.hazards {
        hazard.advance(grow);
    }
    state.prune();

    resolve_melee(state);
    state.prune();

    if let Some(hit) = find_collision(state) {
        log::debug!("Collision: {:?}", hit);
        state.game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Hazard, HazardKind, Viewport};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// No random smalls, and the big/ultimate schedule pushed out of the way
    fn quiet_tuning() -> Tuning {
        Tuning {
            big_interval: 0,
            ultimate_interval: 0,
            ..Tuning::without_smalls()
        }
    }

    fn quiet_state() -> GameState {
        GameState::new(42, quiet_tuning(), Viewport::new(800.0, 600.0, 1.0))
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn attack() -> TickInput {
        TickInput {
            attack: true,
            ..Default::default()
        }
    }

    fn still(state: &mut GameState, kind: HazardKind, pos: Vec2, radius: f32, hp: u8) -> u32 {
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            target_radius: radius,
            ttl: 1000,
            hp: Some(hp),
            group: None,
        });
        id
    }

    #[test]
    fn test_slash_small_in_front() {
        let mut state = quiet_state();
        let p = state.player.pos;
        let id = still(&mut state, HazardKind::Small, p + Vec2::new(50.0, 0.0), 8.0, 1);
        // pointer at angle 0, player pinned in place
        state.input.pos = p + Vec2::new(100.0, 0.0);

        tick(&mut state, &attack());

        assert!(state.hazard(id).is_none());
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_attack_cooldown_sequence() {
        let mut state = quiet_state();
        let p = state.player.pos;
        // straight below the player: outside the first swing's cone
        let below = still(&mut state, HazardKind::Small, p + Vec2::new(0.0, 50.0), 8.0, 1);
        state.input.pos = p + Vec2::new(100.0, 0.0);

        tick(&mut state, &attack());
        let first = state.sword.clone();
        assert!(first.active);

        for _ in 0..4 {
            tick(&mut state, &idle());
        }
        // 5 frames after the first swing: ignored
        state.input.pos = state.player.pos + Vec2::new(0.0, 100.0);
        let before = state.sword.clone();
        tick(&mut state, &attack());
        assert_eq!(state.sword.angle, before.angle);
        assert_eq!(state.sword.remaining, before.remaining - 1);
        assert_eq!(state.sword.cooldown, before.cooldown - 1);
        // the rejected swing aimed right at it
        assert_eq!(state.score, 0);
        assert!(state.hazard(below).is_some());

        for _ in 0..14 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.score, 0);
        // 20 frames after the first swing: accepted
        tick(&mut state, &attack());
        assert!(state.sword.active);
        assert!((state.sword.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(state.sword.cooldown, 17);
        assert_eq!(state.score, 1);
        assert!(state.hazard(below).is_none());
    }

    #[test]
    fn test_miss_scores_nothing() {
        let mut state = quiet_state();
        let p = state.player.pos;
        still(&mut state, HazardKind::Small, p + Vec2::new(-100.0, 0.0), 8.0, 1);
        state.input.pos = p + Vec2::new(100.0, 0.0);
        tick(&mut state, &attack());
        assert_eq!(state.score, 0);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_safe_zone_scenario() {
        let mut state = quiet_state();
        crate::sim::spawn::spawn_ultimate(&mut state);
        let group = state.groups[0];
        let zone = state.hazard(group.warning).unwrap().clone();
        let diag = state.viewport.diagonal();
        for h in &mut state.hazards {
            if h.id != group.warning {
                h.radius = diag;
            }
        }

        state.player.pos = zone.pos + Vec2::new(0.5 * zone.radius, 0.0);
        state.input.track(state.player.pos);
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Playing);

        let out = zone.pos + Vec2::new(zone.radius, 0.0);
        state.player.pos = out;
        tick(&mut state, &TickInput { pointer: Some(out), ..Default::default() });
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.message.as_deref().unwrap().starts_with("GAME OVER"));
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut state = quiet_state();
        state.score = 7;
        state.best = 3;
        let p = state.player.pos;
        still(&mut state, HazardKind::Big, p, 40.0, 2);
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.best, 7);

        let frame = state.frame;
        tick(&mut state, &attack());
        assert_eq!(state.frame, frame);
        assert!(!state.sword.active);

        state.restart();
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 7);
        assert!(state.hazards.is_empty());
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_expired_hazard_removed_same_frame() {
        let mut state = quiet_state();
        let id = still(&mut state, HazardKind::Small, Vec2::new(5.0, 5.0), 4.0, 1);
        state.hazard_mut(id).unwrap().ttl = 1;
        tick(&mut state, &idle());
        assert!(state.hazard(id).is_none());
    }

    #[test]
    fn test_player_follows_pointer() {
        let mut state = quiet_state();
        let start = state.player.pos;
        // no pointer yet: stay put
        tick(&mut state, &idle());
        assert_eq!(state.player.pos, start);

        let target = start + Vec2::new(100.0, 0.0);
        tick(&mut state, &TickInput { pointer: Some(target), ..Default::default() });
        assert!((state.player.pos.x - (start.x + 25.0)).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let vp = Viewport::new(640.0, 480.0, 1.0);
        let mut a = GameState::new(99999, tuning.clone(), vp);
        let mut b = GameState::new(99999, tuning, vp);
        for i in 0..300 {
            let input = TickInput {
                pointer: Some(Vec2::new(320.0 + (i as f32).sin() * 200.0, 240.0)),
                attack: i % 7 == 0,
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.hazards.len(), b.hazards.len());
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        #[test]
        fn prop_radius_gap_shrinks_by_eight_percent(r in 0.0f32..500.0, target in 0.0f32..2000.0, frames in 1usize..60) {
            let mut h = Hazard {
                id: 1,
                kind: HazardKind::Small,
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius: r,
                target_radius: target,
                ttl: 1000,
                hp: None,
                group: None,
            };
            for _ in 0..frames {
                let gap = target - h.radius;
                h.advance(0.08);
                let new_gap = target - h.radius;
                prop_assert!((new_gap - gap * 0.92).abs() <= 1e-3 * (1.0 + gap.abs()));
                // never overshoots
                prop_assert!(gap.abs() < 1e-3 || new_gap.signum() == gap.signum());
            }
        }

        #[test]
        fn prop_ttl_counts_down_by_one(ttl in 1i32..2000, frames in 1i32..50) {
            let mut h = Hazard {
                id: 1,
                kind: HazardKind::Big,
                pos: Vec2::ZERO,
                vel: Vec2::new(1.0, 1.0),
                radius: 5.0,
                target_radius: 5.0,
                ttl,
                hp: None,
                group: None,
            };
            for _ in 0..frames {
                h.advance(0.08);
            }
            prop_assert_eq!(h.ttl, ttl - frames);
            prop_assert_eq!(h.is_alive(), ttl > frames);
        }

        #[test]
        fn prop_best_never_below_score(seed in any::<u64>(), frames in 1usize..400) {
            let mut state = GameState::new(seed, Tuning::default(), Viewport::new(500.0, 400.0, 1.0));
            state.input.track(Vec2::new(250.0, 200.0));
            for i in 0..frames {
                let input = TickInput { attack: i % 19 == 0, ..Default::default() };
                tick(&mut state, &input);
                if state.is_over() {
                    prop_assert!(state.best >= state.score);
                    break;
                }
            }
        }
    }
}
