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

/// Colors for game elements
pub mod colors {
    /// #4ee
    pub const PLAYER: [f32; 4] = [0.267, 0.933, 0.933, 1.0];
    /// #0a0 aim dot
    pub const AIM_INDICATOR: [f32; 4] = [0.0, 0.667, 0.0, 1.0];
    /// #ffd
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.867, 1.0];
    /// #f55
    pub const ENEMY: [f32; 4] = [1.0, 0.333, 0.333, 1.0];
    /// Faint wash over the arena once the player is dead
    pub const DEATH_WASH: [f32; 4] = [1.0, 1.0, 1.0, 0.06];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
