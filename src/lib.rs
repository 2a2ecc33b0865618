//! Pool Table - colliding balls in a rectangular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, pointer grip)
//! - `renderer`: Drawing seam and circle tessellation
//! - `config`: Arena construction parameters

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ArenaConfig, ConfigError};
pub use sim::{Color, FrameInfo, PointerEvent, Simulation};

/// Simulation constants
pub mod consts {
    /// How long a wall stays "touched" after a bounce (ms)
    pub const BORDER_COOLDOWN_MS: f64 = 300.0;
    /// How long a pointer movement sample stays valid as fling velocity (ms)
    pub const POINTER_VELOCITY_DECAY_MS: f64 = 200.0;

    /// Radius of the pointer when testing whether it touches a ball
    pub const POINTER_RADIUS: f32 = 1.0;
    /// Gap kept between spawned balls and the walls
    pub const SPAWN_MARGIN: f32 = 5.0;

    /// Default table (matches the canvas the game was designed for)
    pub const DEFAULT_WIDTH: f32 = 1000.0;
    pub const DEFAULT_HEIGHT: f32 = 500.0;
    pub const DEFAULT_BALL_COUNT: usize = 15;
    pub const DEFAULT_MIN_RADIUS: f32 = 10.0;
    pub const DEFAULT_MAX_RADIUS: f32 = 16.0;
    /// Fraction of velocity kept after every wall or ball impact
    pub const DEFAULT_RESTITUTION: f32 = 0.8;

    /// Triangles per ball when tessellating circles
    pub const CIRCLE_SEGMENTS: u32 = 32;
}
