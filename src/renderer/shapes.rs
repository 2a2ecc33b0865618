//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::DrawSurface;
use super::vertex::{Vertex, colors};
use crate::consts::CIRCLE_SEGMENTS;
use crate::sim::Color;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangle list built up over one render pass, ready for upload
#[derive(Debug, Clone)]
pub struct CircleBatch {
    vertices: Vec<Vertex>,
    segments: u32,
}

impl Default for CircleBatch {
    fn default() -> Self {
        Self::new(CIRCLE_SEGMENTS)
    }
}

impl CircleBatch {
    pub fn new(segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            segments: segments.max(3),
        }
    }

    /// Start a frame: drop last frame's vertices and lay down the table felt
    pub fn begin_frame(&mut self, width: f32, height: f32) {
        self.vertices.clear();
        self.vertices
            .extend(rect(Vec2::ZERO, Vec2::new(width, height), colors::TABLE));
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw vertex bytes (`Vertex::STRIDE` per vertex)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl DrawSurface for CircleBatch {
    /// Fan of `segments` triangles around `center`
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let rgba = color.to_rgba();
        let step = TAU / self.segments as f32;
        let rim = |i: u32| center + Vec2::from_angle(i as f32 * step) * radius;

        self.vertices.reserve(self.segments as usize * 3);
        for i in 0..self.segments {
            let (a, b) = (rim(i), rim(i + 1));
            self.vertices.extend([
                Vertex::new(center.x, center.y, rgba),
                Vertex::new(a.x, a.y, rgba),
                Vertex::new(b.x, b.y, rgba),
            ]);
        }
    }
}
