//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in [`GameState`]. Input
//! callbacks only ever touch it through [`super::TickInput`], so the frame
//! step is the single writer of derived state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{GAME_OVER_MESSAGE, RESTART_MESSAGE, START_MESSAGE};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Frames are being simulated
    Playing,
    /// The player was hit; frozen until restart
    GameOver,
}

/// Screen the simulation runs on, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio (always >= 1)
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: dpr.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Length of the screen diagonal
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    /// Ease toward `target`, covering `factor` of the remaining distance
    pub fn follow(&mut self, target: Vec2, factor: f32) {
        self.pos += (target - self.pos) * factor;
    }
}

/// Latest pointer/touch position (physical pixels)
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    pub pos: Vec2,
    /// Set once any pointer event has been seen
    pub active: bool,
}

impl InputTracker {
    pub fn track(&mut self, pos: Vec2) {
        self.pos = pos;
        self.active = true;
    }
}

/// Melee weapon timers
#[derive(Debug, Clone, Default)]
pub struct Sword {
    pub active: bool,
    /// Frames left in the current swing
    pub remaining: u32,
    /// Frames until another swing is allowed
    pub cooldown: u32,
    /// Swing direction (radians, player -> pointer)
    pub angle: f32,
}

impl Sword {
    /// Start a swing toward `toward`. A no-op while cooling down.
    pub fn try_swing(&mut self, from: Vec2, toward: Vec2, tuning: &Tuning) -> bool {
        if self.cooldown > 0 {
            return false;
        }
        let d = toward - from;
        self.angle = d.y.atan2(d.x);
        self.active = true;
        self.remaining = tuning.sword_duration;
        self.cooldown = tuning.sword_cooldown;
        true
    }

    /// Per-frame countdown of cooldown and swing duration
    pub fn update(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.active {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.active = false;
            }
        }
    }
}

/// Which entity of an ultimate spawn a hazard is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UltimatePart {
    /// Intangible precursor marking the safe zone
    Warning,
    /// Screen-filling blast
    Body,
    /// Short-lived full-size marker that keeps the hole visible
    Fade,
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Small,
    Big,
    Ultimate(UltimatePart),
}

impl HazardKind {
    /// Hits needed to destroy a fresh hazard of this kind
    pub fn base_hp(&self) -> u8 {
        match self {
            HazardKind::Small => 1,
            HazardKind::Big => 2,
            HazardKind::Ultimate(_) => 3,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, HazardKind::Ultimate(UltimatePart::Warning))
    }

    pub fn is_ultimate(&self) -> bool {
        matches!(self, HazardKind::Ultimate(_))
    }

    /// Warnings are intangible to the sword
    pub fn damageable(&self) -> bool {
        !self.is_warning()
    }
}

/// A hazard entity (circle)
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub target_radius: f32,
    /// Frames left to live; removed at <= 0
    pub ttl: i32,
    /// Hits left; `None` means "kind default"
    pub hp: Option<u8>,
    /// Ultimate group this entity belongs to
    pub group: Option<u32>,
}

impl Hazard {
    /// Move, grow toward the target radius and age by one frame
    pub fn advance(&mut self, grow_factor: f32) {
        self.pos += self.vel;
        self.radius += (self.target_radius - self.radius) * grow_factor;
        self.ttl -= 1;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.ttl > 0
    }

    /// Apply one sword hit. Returns true when this hit destroys it.
    pub fn take_hit(&mut self) -> bool {
        let hp = self.hp.unwrap_or_else(|| self.kind.base_hp()).saturating_sub(1);
        self.hp = Some(hp);
        hp == 0
    }

    /// Force removal at the end of this frame
    pub fn kill(&mut self) {
        self.ttl = 0;
    }
}

/// The three entities of one ultimate spawn, by hazard id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardGroup {
    pub id: u32,
    pub warning: u32,
    pub body: u32,
    pub fade: u32,
}

impl HazardGroup {
    pub fn members(&self) -> [u32; 3] {
        [self.warning, self.body, self.fade]
    }
}

/// Things that happened during a tick (drained by the session)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SwordSwing { angle: f32 },
    HazardHit { id: u32, kind: HazardKind, hp_left: u8 },
    HazardDestroyed { id: u32, kind: HazardKind },
    UltimateSpawned { group: u32, safe_center: Vec2, safe_radius: f32 },
    GameOver { score: u64, best: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Frame counter (first simulated frame is 1)
    pub frame: u64,
    pub score: u64,
    pub best: u64,
    pub phase: GamePhase,
    /// Status line shown at the bottom of the screen
    pub message: Option<String>,
    pub player: Player,
    pub input: InputTracker,
    pub sword: Sword,
    /// Live hazards, in spawn order
    pub hazards: Vec<Hazard>,
    /// Live ultimate groups
    pub groups: Vec<HazardGroup>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let player = Player {
            pos: viewport.center(),
            radius: tuning.player_radius * viewport.dpr,
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            frame: 0,
            score: 0,
            best: 0,
            phase: GamePhase::Playing,
            message: Some(START_MESSAGE.to_string()),
            player,
            input: InputTracker::default(),
            sword: Sword::default(),
            hazards: Vec::new(),
            groups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Re-derive geometry after a resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.radius = self.tuning.player_radius * viewport.dpr;
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start a new run: hazards cleared, score zeroed, player re-centred
    pub fn restart(&mut self) {
        self.hazards.clear();
        self.groups.clear();
        self.events.clear();
        self.score = 0;
        self.frame = 0;
        self.sword = Sword::default();
        self.player.pos = self.viewport.center();
        self.phase = GamePhase::Playing;
        self.message = Some(RESTART_MESSAGE.to_string());
        log::info!("Restarted (best {})", self.best);
    }

    /// Terminal transition after a collision
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.best = self.best.max(self.score);
        self.message = Some(GAME_OVER_MESSAGE.to_string());
        self.events.push(GameEvent::GameOver {
            score: self.score,
            best: self.best,
        });
        log::info!("Game over at frame {}: score {}, best {}", self.frame, self.score, self.best);
    }

    pub fn hazard(&self, id: u32) -> Option<&Hazard> {
        self.hazards.iter().find(|h| h.id == id)
    }

    pub fn hazard_mut(&mut self, id: u32) -> Option<&mut Hazard> {
        self.hazards.iter_mut().find(|h| h.id == id)
    }

    pub fn group(&self, id: u32) -> Option<&HazardGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// The live warning entity that defines `hazard`'s safe zone, if any
    pub fn safe_zone(&self, hazard: &Hazard) -> Option<&Hazard> {
        let group = self.group(hazard.group?)?;
        self.hazard(group.warning).filter(|w| w.is_alive())
    }

    /// Drop dead hazards and groups with no live member left
    pub fn prune(&mut self) {
        self.hazards.retain(Hazard::is_alive);
        let hazards = &self.hazards;
        self.groups
            .retain(|g| g.members().iter().any(|id| hazards.iter().any(|h| h.id == *id)));
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
