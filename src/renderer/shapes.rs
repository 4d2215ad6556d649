//! Shape generation for 2D primitives
//!
//! All output is in physical canvas pixels; the pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::TAU;

use super::scene::{DrawItem, Scene};
use super::vertex::Vertex;
use crate::sim::ArcSegment;

/// Segment count for a circle of `radius` pixels
fn circle_segments(radius: f32) -> u32 {
    ((radius * 0.5) as u32).clamp(16, 96)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an arc segment (thick arc band)
pub fn arc_segment(arc: &ArcSegment, color: [f32; 4], segments_per_radian: f32) -> Vec<Vertex> {
    let span = arc.angular_span();
    let num_segments = ((span * segments_per_radian) as u32).max(4);
    let inner_r = arc.inner_radius().max(0.0);
    let outer_r = arc.outer_radius();

    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);

    for i in 0..num_segments {
        let t1 = i as f32 / num_segments as f32;
        let t2 = (i + 1) as f32 / num_segments as f32;

        let inner1 = arc.point_at(t1, inner_r);
        let outer1 = arc.point_at(t1, outer_r);
        let inner2 = arc.point_at(t2, inner_r);
        let outer2 = arc.point_at(t2, outer_r);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Triangulate every shape in draw order.
///
/// Erase becomes an opaque background disc drawn over what came before.
/// Text is left to the HUD overlay.
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for item in &scene.items {
        match item {
            DrawItem::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, circle_segments(*radius))),
            DrawItem::Erase { center, radius } => vertices.extend(circle(
                *center,
                *radius,
                scene.background,
                circle_segments(*radius),
            )),
            DrawItem::Arc { arc, color } => vertices.extend(arc_segment(arc, *color, 24.0)),
            DrawItem::Text { .. } => {}
        }
    }
    vertices
}
