//! Pointer (mouse) state as seen by the simulation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::POINTER_VELOCITY_DECAY_MS;

/// Input sample delivered by the host, already in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Cursor moved to (x, y); (dx, dy) is the raw movement of this sample
    Move {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        at_ms: f64,
    },
    /// Primary button pressed
    Press,
    /// Primary button released
    Release,
    /// Cursor left the table
    Leave,
}

/// Cursor position, fling velocity, button and grip
#[derive(Debug, Clone, Default, Serialize)]
pub struct Pointer {
    pub pos: Vec2,
    vel: Vec2,
    /// Time at which `vel` stops being a valid fling estimate
    vel_expires_at: f64,
    pressed: bool,
    gripped: Option<u32>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one input sample
    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { x, y, dx, dy, at_ms } => {
                self.pos = Vec2::new(x, y);
                self.vel = Vec2::new(dx, dy);
                self.vel_expires_at = at_ms + POINTER_VELOCITY_DECAY_MS;
            }
            PointerEvent::Press => self.pressed = true,
            // A release outside the table is never reported, so leaving counts as one
            PointerEvent::Release | PointerEvent::Leave => {
                self.pressed = false;
                self.release_grip();
            }
        }
    }

    /// Drop a stale velocity sample
    pub fn refresh(&mut self, now_ms: f64) {
        if self.vel != Vec2::ZERO && now_ms >= self.vel_expires_at {
            self.vel = Vec2::ZERO;
        }
    }

    /// Latest fling velocity (per tick)
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Id of the ball currently held, if any
    pub fn gripped(&self) -> Option<u32> {
        self.gripped
    }

    /// True when the pointer holds nothing or already holds `id`
    pub fn can_grip(&self, id: u32) -> bool {
        self.gripped.is_none_or(|held| held == id)
    }

    pub(crate) fn grip(&mut self, id: u32) {
        if self.gripped != Some(id) {
            log::debug!("Pointer gripped ball {}", id);
        }
        self.gripped = Some(id);
    }

    fn release_grip(&mut self) {
        if let Some(id) = self.gripped.take() {
            log::debug!("Pointer released ball {}", id);
        }
    }
}
