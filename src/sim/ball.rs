//! A single ball: wall rebounds, pointer grip, contacts and constrained movement

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Bounds;
use super::color::Color;
use super::math::{Body, resolve_elastic_collision, signed_gap};
use super::pointer::Pointer;
use crate::consts::{BORDER_COOLDOWN_MS, POINTER_RADIUS};

/// One of the four table cushions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Top,
    Right,
    Bottom,
}

impl Wall {
    /// Check order used when bouncing
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom];

    /// Whether this wall reverses the x component (otherwise y)
    fn is_vertical(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }
}

/// Wall the ball last bounced off, ignored until `expires_at`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderCooldown {
    pub wall: Wall,
    pub expires_at: f64,
}

/// Read-only view of every ball except the one being updated
#[derive(Debug, Clone, Copy)]
pub struct Peers<'a> {
    before: &'a [Ball],
    after: &'a [Ball],
}

impl<'a> Peers<'a> {
    pub fn new(before: &'a [Ball], after: &'a [Ball]) -> Self {
        Self { before, after }
    }

    /// No other balls on the table
    pub fn none() -> Self {
        Self {
            before: &[],
            after: &[],
        }
    }

    pub fn get(&self, id: u32) -> Option<&'a Ball> {
        self.before.iter().chain(self.after).find(|b| b.id == id)
    }
}

/// Outcome of checking one pair of balls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Not overlapping (any previous contact has ended)
    Apart,
    /// Still overlapping from an earlier tick; no impulse
    Resting,
    /// Overlap just began; velocities were exchanged
    Struck,
}

/// A ball on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Ids of balls currently interpenetrating this one
    contacts: BTreeSet<u32>,
    border: Option<BorderCooldown>,
}

/// Keep a coordinate within [radius, extent - radius]
#[inline]
fn confine(value: f32, radius: f32, extent: f32) -> f32 {
    if value < radius {
        radius
    } else if value > extent - radius {
        extent - radius
    } else {
        value
    }
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            contacts: BTreeSet::new(),
            border: None,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Ids of the balls this one is touching
    pub fn contacts(&self) -> &BTreeSet<u32> {
        &self.contacts
    }

    pub fn in_contact_with(&self, id: u32) -> bool {
        self.contacts.contains(&id)
    }

    /// Wall currently on cooldown, if any
    pub fn border_cooldown(&self) -> Option<Wall> {
        self.border.map(|c| c.wall)
    }

    fn as_body(&self) -> Body {
        Body {
            pos: self.pos,
            vel: self.vel,
            radius: self.radius,
        }
    }

    /// Whether the ball's edge has reached `wall`
    pub fn touches(&self, wall: Wall, bounds: Bounds) -> bool {
        match wall {
            Wall::Left => self.pos.x - self.radius <= 0.0,
            Wall::Right => self.pos.x + self.radius >= bounds.width,
            Wall::Top => self.pos.y - self.radius <= 0.0,
            Wall::Bottom => self.pos.y + self.radius >= bounds.height,
        }
    }

    /// Rebound off any wall the ball touches, returning the number of bounces
    ///
    /// The normal component flips, both components lose `restitution`, and the
    /// wall goes on cooldown so a ball resting against it is not re-bounced
    /// every tick. Corners bounce off both walls in the same call.
    pub fn handle_border_touch(&mut self, bounds: Bounds, restitution: f32, now_ms: f64) -> u32 {
        if self.border.is_some_and(|c| now_ms >= c.expires_at) {
            self.border = None;
        }

        let mut bounces = 0;
        for wall in Wall::ALL {
            if !self.touches(wall, bounds) || self.border_cooldown() == Some(wall) {
                continue;
            }
            if wall.is_vertical() {
                self.vel.x = -self.vel.x;
            } else {
                self.vel.y = -self.vel.y;
            }
            self.vel *= restitution;
            self.border = Some(BorderCooldown {
                wall,
                expires_at: now_ms + BORDER_COOLDOWN_MS,
            });
            log::trace!("Ball {} bounced off {:?}", self.id, wall);
            bounces += 1;
        }
        bounces
    }

    /// Follow the pointer while it holds this ball
    ///
    /// A ball is picked up when the pointer touches it with the button down,
    /// the pointer isn't holding another ball, and the ball has no contacts.
    /// Returns true when the ball is held this tick.
    pub fn handle_stroke(&mut self, pointer: &mut Pointer, bounds: Bounds, peers: &Peers) -> bool {
        let touching = signed_gap(self.pos, self.radius, pointer.pos, POINTER_RADIUS).overlapping;
        if !touching
            || !pointer.is_pressed()
            || !pointer.can_grip(self.id)
            || !self.contacts.is_empty()
        {
            return false;
        }

        pointer.grip(self.id);
        self.set_x(pointer.pos.x, bounds, peers);
        self.set_y(pointer.pos.y, bounds, peers);
        self.vel = pointer.velocity();
        true
    }

    /// Move horizontally, staying on the table and out of touching balls
    pub fn set_x(&mut self, x: f32, bounds: Bounds, peers: &Peers) {
        self.pos.x = self.constrain_axis(0, x, bounds.width, peers);
    }

    /// Move vertically, staying on the table and out of touching balls
    pub fn set_y(&mut self, y: f32, bounds: Bounds, peers: &Peers) {
        self.pos.y = self.constrain_axis(1, y, bounds.height, peers);
    }

    /// Apply one tick of velocity
    pub fn integrate(&mut self, bounds: Bounds, peers: &Peers) {
        self.set_x(self.pos.x + self.vel.x, bounds, peers);
        self.set_y(self.pos.y + self.vel.y, bounds, peers);
    }

    /// Clamp `target` into the table, then mirror the step about the current
    /// position for every touching ball it would push deeper into.
    fn constrain_axis(&self, axis: usize, target: f32, extent: f32, peers: &Peers) -> f32 {
        let current = self.pos[axis];
        let mut next = confine(target, self.radius, extent);

        for other in self.contacts.iter().filter_map(|&id| peers.get(id)) {
            let gap = signed_gap(self.pos, self.radius, other.pos, other.radius);
            let closer = (next - other.pos[axis]).abs() < (current - other.pos[axis]).abs();
            if gap.distance <= 0.0 && closer {
                next = current - (next - current);
            }
        }

        confine(next, self.radius, extent)
    }
}

/// Check one pair of balls, exchanging momentum when they first overlap
///
/// The contact sets make the impulse fire once per overlap: pairs already in
/// contact are left alone until they separate.
pub fn resolve_contact(a: &mut Ball, b: &mut Ball, restitution: f32) -> Contact {
    let gap = signed_gap(a.pos, a.radius, b.pos, b.radius);

    if gap.distance > 0.0 {
        a.contacts.remove(&b.id);
        b.contacts.remove(&a.id);
        return Contact::Apart;
    }

    if a.contacts.contains(&b.id) {
        return Contact::Resting;
    }

    a.contacts.insert(b.id);
    b.contacts.insert(a.id);

    let (va, vb) = resolve_elastic_collision(&a.as_body(), &b.as_body(), restitution);
    a.vel = va;
    b.vel = vb;
    log::debug!("Balls {} and {} collided (gap {:.2})", a.id, b.id, gap.distance);
    Contact::Struck
}
