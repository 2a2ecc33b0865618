//! Circle geometry, random placement and the ball/ball impulse kernel
//!
//! Everything here is stateless. Random helpers take the caller's RNG so the
//! arena stays reproducible from its seed.

use glam::Vec2;
use rand::Rng;

use super::color::Color;

/// Result of a circle/circle proximity test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    /// Center distance minus the sum of radii (negative = interpenetrating)
    pub distance: f32,
    /// True when `distance < 0`
    pub overlapping: bool,
}

/// Signed gap between two circles
#[inline]
pub fn signed_gap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Gap {
    let distance = a.distance(b) - ra - rb;
    Gap {
        distance,
        overlapping: distance < 0.0,
    }
}

/// Uniform radius in [min, max], rounded to whole units
pub fn random_radius<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    (min + rng.random::<f32>() * (max - min)).round()
}

/// Uniform position in the given box, rounded to whole units
pub fn random_position<R: Rng + ?Sized>(
    rng: &mut R,
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
) -> Vec2 {
    let x = (x_min + rng.random::<f32>() * (x_max - x_min)).round();
    let y = (y_min + rng.random::<f32>() * (y_max - y_min)).round();
    Vec2::new(x, y)
}

/// Random 24-bit color that is neither pure black nor pure white
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    loop {
        let color = Color::from_rgb(rng.random::<u32>());
        if !color.is_reserved() {
            return color;
        }
    }
}

/// Kinematic snapshot of one body entering a collision
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Unit collision normal from `from` towards `to`, as (sin α, cos α)
///
/// α = atan2(Δx, Δy) is measured from the vertical axis. Centers on the same
/// horizontal line use a fixed ±1 normal picked by the sign of Δx, which also
/// covers coincident centers. The ±1 is the normal's x component, not an angle
/// of ±1 rad: a 1 rad normal would skew a head-on hit between balls on the
/// same row, and equal balls would no longer swap velocities.
pub fn collision_normal(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    if d.y != 0.0 {
        let alpha = d.x.atan2(d.y);
        Vec2::new(alpha.sin(), alpha.cos())
    } else if d.x > 0.0 {
        Vec2::X
    } else {
        Vec2::NEG_X
    }
}

/// Post-impact velocities of two colliding balls
///
/// Velocities are rotated into the (tangent, normal) frame of the contact,
/// the normal components go through a 1-D elastic exchange weighted by r³,
/// tangents pass through, and the result is rotated back and scaled by
/// `restitution`.
pub fn resolve_elastic_collision(b1: &Body, b2: &Body, restitution: f32) -> (Vec2, Vec2) {
    let n = collision_normal(b1.pos, b2.pos);
    let (sin, cos) = (n.x, n.y);

    // x = tangent, y = normal
    let to_contact = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
    let to_world = |f: Vec2| Vec2::new(f.x * cos + f.y * sin, -f.x * sin + f.y * cos);

    let f1 = to_contact(b1.vel);
    let f2 = to_contact(b2.vel);

    let m1 = b1.radius.powi(3);
    let m2 = b2.radius.powi(3);

    let u1n = (f1.y * m1 + 2.0 * f2.y * m2 - f1.y * m2) / (m1 + m2);
    let u2n = u1n - f2.y + f1.y;

    let v1 = to_world(Vec2::new(f1.x, u1n)) * restitution;
    let v2 = to_world(Vec2::new(f2.x, u2n)) * restitution;
    (v1, v2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const EPS: f32 = 1e-4;

    fn body(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Body {
        Body {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius,
        }
    }

    fn energy(b: &Body, v: Vec2) -> f32 {
        b.radius.powi(3) * v.length_squared()
    }

    #[test]
    fn test_signed_gap() {
        let gap = signed_gap(Vec2::ZERO, 10.0, Vec2::new(30.0, 0.0), 10.0);
        assert!((gap.distance - 10.0).abs() < EPS);
        assert!(!gap.overlapping);

        let touching = signed_gap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0);
        assert!(touching.distance.abs() < EPS);
        assert!(!touching.overlapping);

        let gap = signed_gap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0);
        assert!(gap.overlapping);
        assert!((gap.distance + 5.0).abs() < EPS);
    }

    #[test]
    fn test_random_helpers_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let r = random_radius(&mut rng, 10.0, 16.0);
            assert!((10.0..=16.0).contains(&r));
            assert_eq!(r, r.round());

            let p = random_position(&mut rng, 15.0, 985.0, 15.0, 485.0);
            assert!((15.0..=985.0).contains(&p.x));
            assert!((15.0..=485.0).contains(&p.y));

            assert!(!random_color(&mut rng).is_reserved());
        }
    }

    #[test]
    fn test_normal_fallback_on_same_row() {
        assert_eq!(collision_normal(Vec2::ZERO, Vec2::new(5.0, 0.0)), Vec2::X);
        assert_eq!(collision_normal(Vec2::ZERO, Vec2::new(-5.0, 0.0)), Vec2::NEG_X);
        // Coincident centers still give a usable normal
        assert_eq!(collision_normal(Vec2::ONE, Vec2::ONE), Vec2::NEG_X);

        let n = collision_normal(Vec2::ZERO, Vec2::new(0.0, 3.0));
        assert!((n - Vec2::Y).length() < EPS);
    }

    #[test]
    fn test_head_on_equal_masses_exchange() {
        let b1 = body(100.0, 100.0, 3.0, 0.0, 10.0);
        let b2 = body(119.0, 100.0, -3.0, 0.0, 10.0);
        let (v1, v2) = resolve_elastic_collision(&b1, &b2, 1.0);
        assert!((v1.x - (-3.0)).abs() < EPS);
        assert!((v2.x - 3.0).abs() < EPS);
        assert!(v1.y.abs() < EPS && v2.y.abs() < EPS);
    }

    #[test]
    fn test_vertical_head_on_exchange() {
        let b1 = body(50.0, 50.0, 0.0, 2.0, 12.0);
        let b2 = body(50.0, 70.0, 0.0, 0.0, 12.0);
        let (v1, v2) = resolve_elastic_collision(&b1, &b2, 1.0);
        assert!(v1.length() < EPS);
        assert!((v2.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_glancing_keeps_tangent() {
        // Contact normal along +x, motion purely along y: nothing to exchange
        let b1 = body(0.0, 0.0, 0.0, 4.0, 10.0);
        let b2 = body(19.0, 0.0, 0.0, -1.0, 10.0);
        let (v1, v2) = resolve_elastic_collision(&b1, &b2, 1.0);
        assert!((v1 - Vec2::new(0.0, 4.0)).length() < EPS);
        assert!((v2 - Vec2::new(0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_heavier_ball_wins() {
        let big = body(0.0, 0.0, 2.0, 0.0, 20.0);
        let small = body(29.0, 0.0, 0.0, 0.0, 10.0);
        let (v_big, v_small) = resolve_elastic_collision(&big, &small, 1.0);
        assert!(v_big.x > 0.0);
        assert!(v_small.x > v_big.x);
    }

    #[test]
    fn test_collision_never_adds_energy() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let b1 = body(
                rng.random_range(0.0..50.0),
                rng.random_range(0.0..50.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(5.0..20.0),
            );
            let b2 = body(
                rng.random_range(0.0..50.0),
                rng.random_range(0.0..50.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(5.0..20.0),
            );
            let restitution = 0.8;
            let before = energy(&b1, b1.vel) + energy(&b2, b2.vel);
            let (v1, v2) = resolve_elastic_collision(&b1, &b2, restitution);
            let after = energy(&b1, v1) + energy(&b2, v2);
            let bound = before * restitution * restitution;
            assert!(after <= bound * (1.0 + 1e-3) + 1e-3, "{after} > {bound}");
        }
    }
}
