//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Body;

/// Triangle segments per circle; enough for the largest body at 4K
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Filled disc covering a body's collision circle
pub fn body_disc(body: &impl Body, color: [f32; 4]) -> Vec<Vertex> {
    circle(body.pos(), body.radius(), color, CIRCLE_SEGMENTS)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
        // Every rim vertex sits on the radius
        for (i, v) in verts.iter().enumerate() {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            if i % 3 == 0 {
                assert!(d < 1e-5);
            } else {
                assert!((d - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::ZERO, Vec2::new(4.0, 2.0), [0.0; 4]);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().any(|v| v.position == [4.0, 2.0]));
        assert!(verts.iter().any(|v| v.position == [0.0, 0.0]));
    }
}
