//! Per-frame simulation step
//!
//! The host calls `update` then `render` once per display refresh. Velocities
//! are per-tick deltas, so the frame rate sets the simulation speed.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::ball::{Contact, Peers, resolve_contact};
use super::color::Color;
use super::pointer::{Pointer, PointerEvent};
use crate::config::{ArenaConfig, ConfigError};
use crate::renderer::DrawSurface;

/// Timing of the frame being simulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Host timestamp of this frame (ms)
    pub timestamp_ms: f64,
    /// Time since the previous frame (ms)
    pub delta_ms: f64,
}

impl FrameInfo {
    /// Frame at `timestamp_ms` following one at `previous_ms`
    pub fn after(previous_ms: f64, timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            delta_ms: timestamp_ms - previous_ms,
        }
    }

    /// Instantaneous frames per second (0 for a zero-length frame)
    pub fn fps(&self) -> f64 {
        if self.delta_ms > 0.0 { 1000.0 / self.delta_ms } else { 0.0 }
    }

    /// Frame duration in seconds
    pub fn seconds(&self) -> f64 {
        self.delta_ms / 1000.0
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Ball pairs that started touching (one impulse each)
    pub collisions: u32,
    /// Wall rebounds across all balls
    pub wall_bounces: u32,
    /// Ball held by the pointer at the end of the tick
    pub gripped: Option<u32>,
}

/// Advance every ball by one tick
///
/// Stale pointer velocity is dropped first. Then, for each ball in id order:
/// wall rebound, pointer grip, contacts against every higher id (so each pair
/// is checked once), then movement.
pub fn tick(arena: &mut Arena, pointer: &mut Pointer, frame: &FrameInfo) -> TickReport {
    let bounds = arena.bounds();
    let restitution = arena.restitution;
    let now = frame.timestamp_ms;
    let mut report = TickReport::default();

    pointer.refresh(now);

    for i in 0..arena.balls.len() {
        let (before, rest) = arena.balls.split_at_mut(i);
        let Some((ball, after)) = rest.split_first_mut() else {
            break;
        };

        report.wall_bounces += ball.handle_border_touch(bounds, restitution, now);
        ball.handle_stroke(pointer, bounds, &Peers::new(before, after));

        for other in after.iter_mut() {
            if resolve_contact(other, ball, restitution) == Contact::Struck {
                report.collisions += 1;
            }
        }

        ball.integrate(bounds, &Peers::new(before, after));
    }

    report.gripped = pointer.gripped();
    report
}

/// Draw every ball; never touches physics state
pub fn render<S: DrawSurface + ?Sized>(arena: &Arena, surface: &mut S) {
    for ball in &arena.balls {
        surface.draw_circle(ball.pos, ball.radius, ball.color);
    }
}

/// A table, its pointer and the input waiting for the next tick
#[derive(Debug, Clone)]
pub struct Simulation {
    arena: Arena,
    pointer: Pointer,
    pending: Vec<PointerEvent>,
    ticks: u64,
}

impl Simulation {
    /// Validate `config` and populate a fresh table
    pub fn new(config: &ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut arena = Arena::new(config.width, config.height, config.restitution, seed);
        arena.populate(config.ball_count, config.min_radius, config.max_radius);
        Ok(Self::from_arena(arena))
    }

    /// Drive an already-built table
    pub fn from_arena(arena: Arena) -> Self {
        Self {
            arena,
            pointer: Pointer::new(),
            pending: Vec::new(),
            ticks: 0,
        }
    }

    /// Queue a pointer sample; it takes effect at the start of the next update
    pub fn push_input(&mut self, event: PointerEvent) {
        self.pending.push(event);
    }

    /// Apply queued input, then run one tick
    pub fn update(&mut self, frame: &FrameInfo) -> TickReport {
        for event in self.pending.drain(..) {
            self.pointer.apply(event);
        }

        let report = tick(&mut self.arena, &mut self.pointer, frame);
        self.ticks += 1;
        report
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        render(&self.arena, surface);
    }

    /// Recolor a ball between ticks
    pub fn set_ball_color(&mut self, id: u32, color: Color) -> bool {
        self.arena.set_color(id, color)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Number of completed updates
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Ball;
    use glam::Vec2;

    const EPS: f32 = 1e-4;

    fn frame(n: u32) -> FrameInfo {
        FrameInfo::after(f64::from(n) * 16.0, f64::from(n + 1) * 16.0)
    }

    #[test]
    fn test_frame_info() {
        let f = FrameInfo::after(1000.0, 1020.0);
        assert_eq!(f.delta_ms, 20.0);
        assert!((f.fps() - 50.0).abs() < 1e-9);
        assert!((f.seconds() - 0.02).abs() < 1e-9);
        assert_eq!(FrameInfo::default().fps(), 0.0);
    }

    #[test]
    fn test_ball_leaving_left_wall() {
        let ball = Ball::new(0, Vec2::new(5.0, 100.0), 10.0, Color::WHITE)
            .with_velocity(Vec2::new(-3.0, 0.0));
        let mut sim = Simulation::from_arena(Arena::with_balls(500.0, 300.0, 0.8, vec![ball]));

        let report = sim.update(&frame(0));
        let ball = &sim.arena().balls[0];
        assert_eq!(report.wall_bounces, 1);
        assert!((ball.vel.x - 3.0 * 0.8).abs() < EPS);
        assert!(ball.pos.x >= ball.radius);
    }

    #[test]
    fn test_head_on_collision_counts_once() {
        let balls = vec![
            Ball::new(0, Vec2::new(100.0, 150.0), 10.0, Color::WHITE)
                .with_velocity(Vec2::new(2.0, 0.0)),
            Ball::new(1, Vec2::new(130.0, 150.0), 10.0, Color::from_rgb(0xaa0000))
                .with_velocity(Vec2::new(-2.0, 0.0)),
        ];
        let mut sim = Simulation::from_arena(Arena::with_balls(500.0, 300.0, 1.0, balls));

        let mut collisions = 0;
        for n in 0..30 {
            collisions += sim.update(&frame(n)).collisions;
        }
        assert_eq!(collisions, 1);

        let arena = sim.arena();
        assert!((arena.balls[0].vel.x + 2.0).abs() < EPS);
        assert!((arena.balls[1].vel.x - 2.0).abs() < EPS);
        assert!(arena.balls[0].contacts().is_empty());
        assert!(arena.balls[1].contacts().is_empty());
    }

    #[test]
    fn test_grip_and_release() {
        let ball = Ball::new(0, Vec2::new(200.0, 150.0), 12.0, Color::WHITE);
        let mut sim = Simulation::from_arena(Arena::with_balls(500.0, 300.0, 0.8, vec![ball]));

        sim.push_input(PointerEvent::Move {
            x: 203.0,
            y: 151.0,
            dx: 4.0,
            dy: 1.0,
            at_ms: 10.0,
        });
        sim.push_input(PointerEvent::Press);
        let report = sim.update(&frame(0));
        assert_eq!(report.gripped, Some(0));
        assert_eq!(sim.pointer().gripped(), Some(0));
        assert_eq!(sim.arena().balls[0].vel, Vec2::new(4.0, 1.0));

        sim.push_input(PointerEvent::Release);
        let report = sim.update(&frame(1));
        assert_eq!(report.gripped, None);
        assert_eq!(sim.pointer().gripped(), None);
        assert_eq!(sim.arena().balls[0].vel, Vec2::new(4.0, 1.0));
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn test_stale_pointer_velocity_is_not_thrown() {
        let ball = Ball::new(0, Vec2::new(200.0, 150.0), 12.0, Color::WHITE);
        let mut sim = Simulation::from_arena(Arena::with_balls(500.0, 300.0, 0.8, vec![ball]));

        sim.push_input(PointerEvent::Move {
            x: 200.0,
            y: 150.0,
            dx: 6.0,
            dy: 0.0,
            at_ms: 0.0,
        });
        sim.push_input(PointerEvent::Press);
        sim.update(&FrameInfo::after(484.0, 500.0));
        assert_eq!(sim.arena().balls[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_tick_expires_pointer_velocity() {
        let mut arena = Arena::with_balls(
            500.0,
            300.0,
            0.8,
            vec![Ball::new(0, Vec2::new(200.0, 150.0), 12.0, Color::WHITE)],
        );
        let mut pointer = Pointer::new();
        pointer.apply(PointerEvent::Move {
            x: 200.0,
            y: 150.0,
            dx: 5.0,
            dy: 5.0,
            at_ms: 0.0,
        });

        tick(&mut arena, &mut pointer, &FrameInfo::after(0.0, 100.0));
        assert_eq!(pointer.velocity(), Vec2::new(5.0, 5.0));

        tick(&mut arena, &mut pointer, &FrameInfo::after(100.0, 250.0));
        assert_eq!(pointer.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_leaving_table_drops_grip_for_good() {
        let ball = Ball::new(0, Vec2::new(15.0, 150.0), 12.0, Color::WHITE);
        let mut sim = Simulation::from_arena(Arena::with_balls(500.0, 300.0, 0.8, vec![ball]));

        sim.push_input(PointerEvent::Move {
            x: 15.0,
            y: 150.0,
            dx: -2.0,
            dy: 0.0,
            at_ms: 0.0,
        });
        sim.push_input(PointerEvent::Press);
        sim.update(&frame(0));
        assert_eq!(sim.pointer().gripped(), Some(0));

        sim.push_input(PointerEvent::Leave);
        for n in 1..5 {
            let report = sim.update(&frame(n));
            assert_eq!(report.gripped, None);
            assert_eq!(sim.pointer().gripped(), None);
            assert!(!sim.pointer().is_pressed());
        }
    }

    #[test]
    fn test_render_draws_each_ball_once() {
        struct Recorder(Vec<(Vec2, f32, Color)>);
        impl DrawSurface for Recorder {
            fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
                self.0.push((center, radius, color));
            }
        }

        let config = ArenaConfig {
            ball_count: 5,
            seed: Some(3),
            ..Default::default()
        };
        let sim = Simulation::new(&config).expect("valid config");
        let mut recorder = Recorder(Vec::new());
        sim.render(&mut recorder);

        assert_eq!(recorder.0.len(), 5);
        for (ball, (center, radius, color)) in sim.arena().balls.iter().zip(&recorder.0) {
            assert_eq!(ball.pos, *center);
            assert_eq!(ball.radius, *radius);
            assert_eq!(ball.color, *color);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ArenaConfig {
            restitution: 1.5,
            ..Default::default()
        };
        assert!(Simulation::new(&config).is_err());
    }
}
