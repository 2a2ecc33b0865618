//! Drawing seam
//!
//! The simulation hands each ball to a `DrawSurface`; hosts either implement
//! it directly (canvas, terminal, ...) or collect vertices with `CircleBatch`.

pub mod shapes;
pub mod vertex;

pub use shapes::{CircleBatch, rect};
pub use vertex::Vertex;

use glam::Vec2;

use crate::sim::Color;

/// Something that can draw a filled circle
pub trait DrawSurface {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
}
