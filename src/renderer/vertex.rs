//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (sRGB, straight alpha)
pub mod colors {
    /// #0b1020
    pub const BACKGROUND: [f32; 4] = [0.043, 0.063, 0.125, 1.0];
    /// #ff3b3b
    pub const SMALL: [f32; 4] = [1.0, 0.231, 0.231, 1.0];
    /// #ff6b3b
    pub const BIG: [f32; 4] = [1.0, 0.42, 0.231, 1.0];
    pub const ULTIMATE_BODY: [f32; 4] = [1.0, 0.0, 0.0, 0.9];
    pub const ULTIMATE_WARNING: [f32; 4] = [1.0, 0.314, 0.314, 0.25];
    pub const PLAYER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SWORD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// #cfd8ff
    pub const HUD: [f32; 4] = [0.812, 0.847, 1.0, 1.0];
}

/// `[r, g, b, a]` -> CSS `rgba()` string for the DOM overlay
pub fn css_color(color: [f32; 4]) -> String {
    let [r, g, b, a] = color.map(|c| c.clamp(0.0, 1.0));
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}
