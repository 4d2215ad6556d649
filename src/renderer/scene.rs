//! Frame description built from game state
//!
//! Pure function of [`GameState`]: no gameplay side effects. Backends replay
//! the items in order; `Erase` punches a hole through everything drawn
//! before it, exposing the background.

use glam::Vec2;

use super::vertex::colors;
use crate::highscores::format_score;
use crate::sim::{ArcSegment, GameState, HazardKind, UltimatePart};

/// HUD layout in logical pixels (scaled by dpr)
const HUD_LEFT: f32 = 12.0;
const HUD_SCORE_Y: f32 = 24.0;
const HUD_BEST_Y: f32 = 44.0;
const HUD_STATUS_BOTTOM: f32 = 20.0;
const HUD_FONT: f32 = 16.0;
const STATUS_FONT: f32 = 14.0;

/// Which HUD slot a text item fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Score,
    Best,
    Status,
}

/// A single draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Clear a circle back to the background
    Erase { center: Vec2, radius: f32 },
    /// Stroked arc band
    Arc { arc: ArcSegment, color: [f32; 4] },
    Text {
        slot: TextSlot,
        pos: Vec2,
        size: f32,
        text: String,
        color: [f32; 4],
    },
}

/// Everything needed to draw one frame, in physical pixels
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub background: [f32; 4],
    pub items: Vec<DrawItem>,
}

impl Scene {
    pub fn texts(&self) -> impl Iterator<Item = (TextSlot, Vec2, f32, &str)> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Text {
                slot, pos, size, text, ..
            } => Some((*slot, *pos, *size, text.as_str())),
            _ => None,
        })
    }
}

/// Fill colour for a hazard kind
pub fn hazard_color(kind: HazardKind) -> [f32; 4] {
    match kind {
        HazardKind::Small => colors::SMALL,
        HazardKind::Big => colors::BIG,
        HazardKind::Ultimate(UltimatePart::Warning) => colors::ULTIMATE_WARNING,
        HazardKind::Ultimate(_) => colors::ULTIMATE_BODY,
    }
}

/// Build the draw list for the current state
pub fn build_scene(state: &GameState, show_status: bool) -> Scene {
    let vp = state.viewport;
    let dpr = vp.dpr;
    let mut items = Vec::with_capacity(state.hazards.len() + 8);

    for hazard in state.hazards.iter().filter(|h| h.is_alive()) {
        items.push(DrawItem::Circle {
            center: hazard.pos,
            radius: hazard.radius.max(0.0),
            color: hazard_color(hazard.kind),
        });

        // Blast: keep the safe zone visible as a hole
        if matches!(hazard.kind, HazardKind::Ultimate(UltimatePart::Body | UltimatePart::Fade)) {
            if let Some(zone) = state.safe_zone(hazard) {
                items.push(DrawItem::Erase {
                    center: zone.pos,
                    radius: zone.radius * state.tuning.safe_zone_shrink,
                });
            }
        }
    }

    items.push(DrawItem::Circle {
        center: state.player.pos,
        radius: state.player.radius,
        color: colors::PLAYER,
    });

    if let Some(arc) = ArcSegment::sword_fan(state) {
        items.push(DrawItem::Arc {
            arc,
            color: colors::SWORD,
        });
    }

    items.push(DrawItem::Text {
        slot: TextSlot::Score,
        pos: Vec2::new(HUD_LEFT, HUD_SCORE_Y) * dpr,
        size: HUD_FONT * dpr,
        text: format!("SCORE: {}", format_score(state.score)),
        color: colors::HUD,
    });
    items.push(DrawItem::Text {
        slot: TextSlot::Best,
        pos: Vec2::new(HUD_LEFT, HUD_BEST_Y) * dpr,
        size: HUD_FONT * dpr,
        text: format!("BEST:  {}", format_score(state.best)),
        color: colors::HUD,
    });
    if let Some(message) = state.message.as_ref().filter(|_| show_status) {
        items.push(DrawItem::Text {
            slot: TextSlot::Status,
            pos: Vec2::new(HUD_LEFT * dpr, vp.height - HUD_STATUS_BOTTOM * dpr),
            size: STATUS_FONT * dpr,
            text: message.clone(),
            color: colors::HUD,
        });
    }

    Scene {
        width: vp.width,
        height: vp.height,
        dpr,
        background: colors::BACKGROUND,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_ultimate;
    use crate::sim::state::{Hazard, Viewport};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(3, Tuning::without_smalls(), Viewport::new(800.0, 600.0, 2.0))
    }

    fn circles(scene: &Scene) -> Vec<[f32; 4]> {
        scene
            .items
            .iter()
            .filter_map(|i| match i {
                DrawItem::Circle { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_scene_has_player_and_hud() {
        let scene = build_scene(&state(), true);
        assert_eq!(circles(&scene), vec![colors::PLAYER]);
        let texts: Vec<_> = scene.texts().collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].3, "SCORE: 00000");
        assert_eq!(texts[1].3, "BEST:  00000");
        // HUD positions scale with dpr
        assert_eq!(texts[0].1, Vec2::new(24.0, 48.0));
        assert_eq!(texts[1].2, 32.0);
        assert_eq!(texts[2].1, Vec2::new(24.0, 560.0));
    }

    #[test]
    fn test_status_line_can_be_hidden() {
        let scene = build_scene(&state(), false);
        assert!(scene.texts().all(|(slot, ..)| slot != TextSlot::Status));
    }

    #[test]
    fn test_hazards_colored_by_kind() {
        let mut state = state();
        for (id, kind) in [(100, HazardKind::Small), (101, HazardKind::Big)] {
            state.hazards.push(Hazard {
                id,
                kind,
                pos: Vec2::new(10.0, 10.0),
                vel: Vec2::ZERO,
                radius: 5.0,
                target_radius: 5.0,
                ttl: 3,
                hp: None,
                group: None,
            });
        }
        let scene = build_scene(&state, true);
        assert_eq!(
            circles(&scene),
            vec![colors::SMALL, colors::BIG, colors::PLAYER]
        );
    }

    #[test]
    fn test_blast_punches_safe_zone() {
        let mut state = state();
        spawn_ultimate(&mut state);
        let zone = state.hazard(state.groups[0].warning).unwrap().clone();
        let scene = build_scene(&state, true);

        let erases: Vec<_> = scene
            .items
            .iter()
            .filter_map(|i| match i {
                DrawItem::Erase { center, radius } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        // one hole after the body, one after the fade marker
        assert_eq!(erases.len(), 2);
        assert_eq!(erases[0], (zone.pos, zone.radius * 0.9));
        assert!(matches!(scene.items[2], DrawItem::Erase { .. }));
    }

    #[test]
    fn test_sword_fan_drawn_only_while_swinging() {
        let mut state = state();
        let has_arc = |s: &Scene| s.items.iter().any(|i| matches!(i, DrawItem::Arc { .. }));
        assert!(!has_arc(&build_scene(&state, true)));
        state.input.track(Vec2::ZERO);
        crate::sim::try_swing(&mut state);
        assert!(has_arc(&build_scene(&state, true)));
    }
}
