//! Per-frame particle physics.
//!
//! One call to [`step`] advances every particle by exactly one frame, in a
//! single synchronous pass. Velocities are in pixels per frame, so there is no
//! delta time: a slow display simply animates more slowly.
//!
//! Each particle goes through, in order:
//!
//! 1. position integration
//! 2. a small random walk on velocity (ambient drift)
//! 3. damping, which keeps the random walk from growing without bound
//! 4. boundary reflection (velocity flip only, positions are never clamped,
//!    so a particle can sit up to one frame past an edge)
//! 5. the pointer push, when a pointer target is supplied

use glam::Vec2;
use rand::Rng;

use crate::scene::Particle;

/// Half-width of the per-axis velocity noise added each frame.
pub const NOISE: f32 = 0.005;
/// Velocity multiplier applied each frame.
pub const DAMPING: f32 = 0.996;
/// Pointer influence radius in logical pixels.
pub const POINTER_RADIUS: f32 = 120.0;
/// Coefficient applied to the pointer push before it is added to velocity.
pub const POINTER_STRENGTH: f32 = 0.1;
/// Added to the pointer distance before normalizing the push direction.
pub const POINTER_EPSILON: f32 = 1e-4;

/// Falloff of the pointer push at distance `d`: `1 - d²/R²` inside the
/// radius, zero outside.
#[inline]
pub fn pointer_falloff(distance: f32) -> f32 {
    if distance < POINTER_RADIUS {
        1.0 - (distance * distance) / (POINTER_RADIUS * POINTER_RADIUS)
    } else {
        0.0
    }
}

/// Velocity change a particle at `position` receives from a pointer at
/// `pointer`. Points away from the pointer.
pub fn pointer_force(position: Vec2, pointer: Vec2) -> Vec2 {
    let delta = position - pointer;
    let distance = delta.length();
    let falloff = pointer_falloff(distance);
    if falloff == 0.0 {
        return Vec2::ZERO;
    }
    delta / (distance + POINTER_EPSILON) * falloff * POINTER_STRENGTH
}

/// Advance all particles by one frame inside a `bounds` sized container.
///
/// `pointer` is the push origin in logical pixels, or `None` when the
/// pointer is inactive or interaction is disabled.
pub fn step<R: Rng + ?Sized>(
    particles: &mut [Particle],
    bounds: Vec2,
    pointer: Option<Vec2>,
    rng: &mut R,
) {
    for p in particles.iter_mut() {
        p.position += p.velocity;

        p.velocity.x += rng.gen_range(-NOISE..NOISE);
        p.velocity.y += rng.gen_range(-NOISE..NOISE);

        p.velocity *= DAMPING;

        if p.position.x < 0.0 || p.position.x > bounds.x {
            p.velocity.x = -p.velocity.x;
        }
        if p.position.y < 0.0 || p.position.y > bounds.y {
            p.velocity.y = -p.velocity.y;
        }

        if let Some(pointer) = pointer {
            p.velocity += pointer_force(p.position, pointer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::seeded_rng;

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            cluster_id: 0,
        }
    }

    #[test]
    fn test_integration_and_damping() {
        let mut rng = seeded_rng(Some(1));
        let mut ps = [particle(100.0, 100.0, 1.0, -0.5)];
        step(&mut ps, Vec2::new(800.0, 600.0), None, &mut rng);

        assert_eq!(ps[0].position, Vec2::new(101.0, 99.5));
        // (v + noise) * 0.996 with |noise| < 0.005
        assert!((ps[0].velocity.x - 0.996).abs() < 0.006);
        assert!((ps[0].velocity.y + 0.498).abs() < 0.006);
    }

    #[test]
    fn test_reflection_allows_overshoot() {
        let mut rng = seeded_rng(Some(2));
        let mut ps = [particle(0.5, 300.0, -1.0, 0.0), particle(799.5, 599.5, 1.0, 1.0)];
        step(&mut ps, Vec2::new(800.0, 600.0), None, &mut rng);

        // Past the edge, not clamped back...
        assert!(ps[0].position.x < 0.0);
        assert!(ps[1].position.x > 800.0 && ps[1].position.y > 600.0);
        // ...but heading back inside.
        assert!(ps[0].velocity.x > 0.0);
        assert!(ps[1].velocity.x < 0.0 && ps[1].velocity.y < 0.0);

        step(&mut ps, Vec2::new(800.0, 600.0), None, &mut rng);
        assert!(ps[0].position.x >= 0.0);
        assert!(ps[1].position.x <= 800.0 && ps[1].position.y <= 600.0);
    }

    #[test]
    fn test_pointer_push_follows_reflection() {
        let bounds = Vec2::new(800.0, 600.0);
        let pointer = Vec2::new(10.0, 300.0);
        let mut free = [particle(-0.5, 300.0, -1.0, 0.0)];
        let mut pushed = free;
        step(&mut free, bounds, None, &mut seeded_rng(Some(5)));
        step(&mut pushed, bounds, Some(pointer), &mut seeded_rng(Some(5)));

        assert_eq!(free[0].position, pushed[0].position);
        // Flipped first, then pushed back toward the edge by the pointer
        let push = pointer_force(pushed[0].position, pointer);
        assert!(push.x < 0.0);
        assert!((pushed[0].velocity.x - (free[0].velocity.x + push.x)).abs() < 1e-6);
        assert!(free[0].velocity.x > 0.0 && pushed[0].velocity.x < free[0].velocity.x);
    }

    #[test]
    fn test_falloff() {
        assert_eq!(pointer_falloff(0.0), 1.0);
        assert!((pointer_falloff(60.0) - 0.75).abs() < 1e-6);
        assert_eq!(pointer_falloff(120.0), 0.0);
        assert_eq!(pointer_falloff(500.0), 0.0);
    }

    #[test]
    fn test_pointer_pushes_away() {
        let force = pointer_force(Vec2::new(110.0, 50.0), Vec2::new(100.0, 50.0));
        let expected = 0.1 * (1.0 - 100.0 / 14_400.0) * 10.0 / (10.0 + POINTER_EPSILON);
        assert!((force.x - expected).abs() < 1e-6);
        assert_eq!(force.y, 0.0);

        let far = pointer_force(Vec2::new(400.0, 50.0), Vec2::new(100.0, 50.0));
        assert_eq!(far, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_on_particle_is_finite() {
        let at = Vec2::new(42.0, 42.0);
        let force = pointer_force(at, at);
        assert!(force.is_finite());

        let mut rng = seeded_rng(Some(3));
        let mut ps = [particle(42.0, 42.0, 0.0, 0.0)];
        // pointer placed where the particle will be after integration
        step(&mut ps, Vec2::new(100.0, 100.0), Some(at), &mut rng);
        assert!(ps[0].velocity.is_finite());
    }

    #[test]
    fn test_no_pointer_means_no_push() {
        let mut a = [particle(50.0, 50.0, 0.0, 0.0)];
        let mut b = a;
        step(&mut a, Vec2::new(100.0, 100.0), None, &mut seeded_rng(Some(4)));
        step(&mut b, Vec2::new(100.0, 100.0), Some(Vec2::new(500.0, 500.0)), &mut seeded_rng(Some(4)));
        assert_eq!(a, b);
    }
}
