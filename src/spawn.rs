//! Spawn context for particle initialization.
//!
//! Provides helper methods for the random draws the scene initializer makes,
//! on top of whatever random source the caller injects.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Build the component's random source.
///
/// With a seed the whole run (initialization and every simulation step) is
/// reproducible; without one the source is seeded from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Context provided while spawning one particle.
///
/// ```ignore
/// let mut ctx = SpawnContext::new(i, count, &mut rng);
/// let position = center + ctx.jitter(Vec2::new(0.06 * width, 0.05 * height));
/// let velocity = ctx.centered(Vec2::splat(0.4 * speed));
/// ```
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    /// Index of the particle being spawned (0 to count-1).
    pub index: usize,
    /// Total number of particles being spawned.
    pub count: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SpawnContext<'a, R> {
    /// Create a spawn context drawing from `rng`.
    pub fn new(index: usize, count: usize, rng: &'a mut R) -> Self {
        Self { index, count, rng }
    }

    /// Index of the room this particle belongs to, assigned round-robin.
    #[inline]
    pub fn round_robin(&self, buckets: usize) -> usize {
        self.index % buckets.max(1)
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Never panics on an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.random()
    }

    // ========== Vector helpers ==========

    /// Independent uniform offsets in `[-amplitude, amplitude)` per axis.
    pub fn jitter(&mut self, amplitude: Vec2) -> Vec2 {
        let x = self.random_range(-amplitude.x, amplitude.x);
        let y = self.random_range(-amplitude.y, amplitude.y);
        Vec2::new(x, y)
    }

    /// `(U(0,1) - 0.5) * scale` per axis, i.e. roughly centered on zero
    /// with a total spread of `scale`.
    pub fn centered(&mut self, scale: Vec2) -> Vec2 {
        let x = (self.random() - 0.5) * scale.x;
        let y = (self.random() - 0.5) * scale.y;
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded_rng(Some(7));
        let mut b = seeded_rng(Some(7));
        let xs: Vec<f32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<f32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_jitter_bounds() {
        let mut rng = seeded_rng(Some(1));
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        let amplitude = Vec2::new(48.0, 30.0);
        for _ in 0..1_000 {
            let j = ctx.jitter(amplitude);
            assert!(j.x >= -48.0 && j.x < 48.0);
            assert!(j.y >= -30.0 && j.y < 30.0);
        }
    }

    #[test]
    fn test_centered_bounds() {
        let mut rng = seeded_rng(Some(2));
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        for _ in 0..1_000 {
            let v = ctx.centered(Vec2::splat(0.24));
            assert!(v.x.abs() <= 0.12 && v.y.abs() <= 0.12);
        }
    }

    #[test]
    fn test_round_robin() {
        let mut rng = seeded_rng(Some(3));
        let ctx = SpawnContext::new(7, 14, &mut rng);
        assert_eq!(ctx.round_robin(3), 1);
        assert_eq!(ctx.round_robin(0), 0);
    }
}
