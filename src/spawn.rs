//! Spawn context for particle field generation.
//!
//! Wraps the RNG used by the field recipes and provides helpers for the
//! geometric bands they sample from.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Randomness source handed to field generators.
///
/// Generation is not required to be reproducible, so [`SpawnContext::new`]
/// seeds from the system clock. Tests use [`SpawnContext::seeded`].
///
/// ```ignore
/// let mut ctx = SpawnContext::new();
/// let pos = ctx.random_on_shell(300.0, 800.0);
/// ```
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from the current time.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Create a context with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random f32 in `[-half_width, half_width)`.
    #[inline]
    pub fn random_centered(&mut self, half_width: f32) -> f32 {
        (self.random() - 0.5) * 2.0 * half_width
    }

    /// Random angle in `[0, TAU)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    // ========== Position helpers ==========

    /// Random point on the surface of a sphere of given radius.
    ///
    /// Uses `acos(2u - 1)` for the polar angle so points do not bunch up
    /// at the poles.
    pub fn random_on_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.random_angle();
        let phi = (2.0 * self.random() - 1.0).clamp(-1.0, 1.0).acos();

        Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }

    /// Random point in a spherical shell between `inner` and `outer`.
    pub fn random_on_shell(&mut self, inner: f32, outer: f32) -> Vec3 {
        let radius = self.random_range(inner, outer);
        self.random_on_sphere(radius)
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a packed `0xRRGGBB` color to RGB channels in 0..1.
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_on_shell_bounds() {
        let mut ctx = SpawnContext::seeded(7);
        for _ in 0..500 {
            let len = ctx.random_on_shell(300.0, 800.0).length();
            assert!(len >= 300.0 - 0.01 && len <= 800.0 + 0.01);
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut ctx = SpawnContext::seeded(1);
        assert_eq!(ctx.random_range(4.0, 4.0), 4.0);
        assert_eq!(ctx.random_range(5.0, 2.0), 5.0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SpawnContext::seeded(99);
        let mut b = SpawnContext::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_hex_to_rgb() {
        let c = hex_to_rgb(0xffaa00);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 170.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }
}
