//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Per-tick velocities, timers compared against host timestamps
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - No platform dependencies; drawing goes through `renderer::DrawSurface`

pub mod arena;
pub mod ball;
pub mod color;
pub mod math;
pub mod pointer;
pub mod tick;

pub use arena::{Arena, Bounds};
pub use ball::{Ball, BorderCooldown, Contact, Peers, Wall, resolve_contact};
pub use color::Color;
pub use math::{Gap, random_color, random_position, random_radius, resolve_elastic_collision, signed_gap};
pub use pointer::{Pointer, PointerEvent};
pub use tick::{FrameInfo, Simulation, TickReport, render, tick};
