//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in world units with an RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const STAR: [f32; 4] = [0.9, 0.9, 1.0, 0.8];
    pub const CABIN_WALL: [f32; 4] = [0.16, 0.18, 0.24, 1.0];
    pub const RESCUE_WALL: [f32; 4] = [0.12, 0.22, 0.2, 1.0];
    pub const HULL: [f32; 4] = [0.25, 0.25, 0.3, 1.0];
    pub const SHIP: [f32; 4] = [0.75, 0.78, 0.85, 1.0];
    pub const SHIP_WINDOW: [f32; 4] = [0.4, 0.8, 1.0, 1.0];
    pub const RESCUE_SHIP: [f32; 4] = [0.9, 0.85, 0.3, 1.0];
    pub const BEAM: [f32; 4] = [0.47, 0.78, 1.0, 0.35];
    pub const PLAYER: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const VISOR: [f32; 4] = [0.2, 0.5, 0.9, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.55, 0.45, 0.4, 1.0];
    pub const COMPUTER: [f32; 4] = [0.2, 0.6, 0.4, 1.0];
    pub const GATE: [f32; 4] = [0.5, 0.55, 0.65, 1.0];
    pub const PANEL: [f32; 4] = [0.05, 0.07, 0.15, 0.92];
    pub const BUTTON: [f32; 4] = [0.2, 0.35, 0.7, 1.0];
    pub const CORRECT: [f32; 4] = [0.2, 0.7, 0.3, 1.0];
    pub const WRONG: [f32; 4] = [0.8, 0.2, 0.2, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const WARNING: [f32; 4] = [1.0, 0.8, 0.2, 1.0];
}
