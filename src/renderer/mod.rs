//! Rendering module
//!
//! [`scene`] turns game state into a backend-neutral draw list; the WebGPU
//! pipeline triangulates and draws it. HUD text is handed to the DOM.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawItem, Scene, TextSlot, build_scene};
