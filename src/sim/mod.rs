//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to [`tick`] per displayed frame; every timer counts frames
//! - Seeded RNG only
//! - Stable iteration order (hazards stay in spawn order)
//! - No rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod melee;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arc::ArcSegment;
pub use collision::{Collision, circles_overlap, find_collision, inside_safe_zone, sd_circle};
pub use melee::{StrikeCone, resolve_melee, try_swing};
pub use spawn::spawn_hazards;
pub use state::{
    GameEvent, GamePhase, GameState, Hazard, HazardGroup, HazardKind, InputTracker, Player, Sword,
    UltimatePart, Viewport,
};
pub use tick::{TickInput, tick};
