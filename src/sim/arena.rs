//! The table: dimensions, restitution and the ball registry
//!
//! All state that defines the physics lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::color::Color;
use super::math::{random_color, random_position, random_radius, signed_gap};
use crate::consts::SPAWN_MARGIN;

/// Table extent; balls live in [0, width] x [0, height]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// The table and every ball on it
#[derive(Debug, Clone, Serialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Fraction of velocity kept after each impact, in (0, 1]
    pub restitution: f32,
    /// Balls ordered by id
    pub balls: Vec<Ball>,
    /// Seed the RNG was created from
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl Arena {
    /// Create an empty table
    pub fn new(width: f32, height: f32, restitution: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            restitution,
            balls: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a table from hand-placed balls (ids are expected to be 0..n)
    pub fn with_balls(width: f32, height: f32, restitution: f32, balls: Vec<Ball>) -> Self {
        let mut arena = Self::new(width, height, restitution, 0);
        arena.balls = balls;
        arena.balls.sort_by_key(|b| b.id);
        arena
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
        }
    }

    /// Replace all balls with `count` freshly placed, non-overlapping ones
    ///
    /// Radii are drawn from [min_radius, max_radius] and positions keep
    /// `SPAWN_MARGIN` from every wall. Each ball is re-drawn until it overlaps
    /// nothing already placed. There is no retry limit: the table needs real
    /// headroom over `count * max_radius²` or this will not finish.
    pub fn populate(&mut self, count: usize, min_radius: f32, max_radius: f32) {
        self.balls.clear();
        if count == 0 {
            return;
        }
        self.balls.reserve(count);

        let (width, height) = (self.width, self.height);
        let spot = |rng: &mut Pcg32, r: f32| {
            random_position(
                rng,
                r + SPAWN_MARGIN,
                width - r - SPAWN_MARGIN,
                r + SPAWN_MARGIN,
                height - r - SPAWN_MARGIN,
            )
        };

        // The first ball is the cue ball
        let r0 = random_radius(&mut self.rng, min_radius, max_radius);
        let p0 = spot(&mut self.rng, r0);
        self.balls.push(Ball::new(0, p0, r0, Color::WHITE));

        let mut attempts = 0u64;
        for id in 1..count as u32 {
            let (pos, radius) = loop {
                attempts += 1;
                let r = random_radius(&mut self.rng, min_radius, max_radius);
                let p = spot(&mut self.rng, r);
                if !self.overlaps_any(p, r) {
                    break (p, r);
                }
            };
            let color = random_color(&mut self.rng);
            self.balls.push(Ball::new(id, pos, radius, color));
        }

        log::info!(
            "Placed {} balls on {}x{} table ({} placement draws, seed {})",
            self.balls.len(),
            self.width,
            self.height,
            attempts,
            self.seed
        );
    }

    fn overlaps_any(&self, pos: Vec2, radius: f32) -> bool {
        self.balls
            .iter()
            .any(|b| signed_gap(b.pos, b.radius, pos, radius).overlapping)
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Id of the topmost ball under `point`
    pub fn ball_at(&self, point: Vec2) -> Option<u32> {
        self.balls
            .iter()
            .rev()
            .find(|b| b.pos.distance(point) <= b.radius)
            .map(|b| b.id)
    }

    /// Recolor a ball; nothing else about it changes
    pub fn set_color(&mut self, id: u32, color: Color) -> bool {
        match self.balls.iter_mut().find(|b| b.id == id) {
            Some(ball) => {
                ball.color = color;
                true
            }
            None => false,
        }
    }
}
