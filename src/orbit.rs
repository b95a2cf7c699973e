//! Kepler-approximated orbits.
//!
//! Bodies do not attract each other. Each one follows its own ellipse with
//! the sun at a focus, and its angular speed follows a second-law style
//! approximation: the instantaneous radius is computed from the current
//! angle and the base speed is scaled by `(a / r)^1.5`, so bodies move
//! faster at perihelion and slower at aphelion.
//!
//! ```ignore
//! let earth = Orbit::new(12.0, 0.017, 0.5);
//! let mut angle = 0.0;
//! angle = earth.advance(angle, 1.0 / 60.0);
//! let pos = earth.position(angle);
//! ```

use glam::Vec3;
use std::f32::consts::TAU;

/// Highest eccentricity an orbit may have. Values at or above 1 would make
/// the radius unbounded.
pub const MAX_ECCENTRICITY: f32 = 0.99;

/// Immutable description of one elliptical orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Semi-major axis in scene units.
    radius: f32,
    /// Shape parameter in `[0, MAX_ECCENTRICITY]`.
    eccentricity: f32,
    /// Angular speed in radians per simulated second at `r == radius`.
    base_speed: f32,
}

impl Orbit {
    /// Create an orbit, clamping eccentricity into `[0, MAX_ECCENTRICITY]`
    /// and the radius to be non-negative.
    ///
    /// A NaN eccentricity or radius is treated as zero.
    pub fn new(radius: f32, eccentricity: f32, base_speed: f32) -> Self {
        let clamped = if eccentricity.is_nan() {
            0.0
        } else {
            eccentricity.clamp(0.0, MAX_ECCENTRICITY)
        };
        if !(0.0..1.0).contains(&eccentricity) {
            log::warn!("eccentricity {} outside [0, 1), clamping to {}", eccentricity, clamped);
        }
        Self {
            radius: if radius.is_nan() { 0.0 } else { radius.max(0.0) },
            eccentricity: clamped,
            base_speed,
        }
    }

    /// A circular orbit (eccentricity 0).
    pub fn circular(radius: f32, base_speed: f32) -> Self {
        Self::new(radius, 0.0, base_speed)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn eccentricity(&self) -> f32 {
        self.eccentricity
    }

    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Whether this orbit collapses to a single point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }

    /// Distance from the focus at angle `theta`: `a(1-e²)/(1+e·cos θ)`.
    ///
    /// The denominator is at least `1 - e > 0`, so the result is bounded.
    pub fn orbital_radius(&self, theta: f32) -> f32 {
        let e = self.eccentricity;
        self.radius * (1.0 - e * e) / (1.0 + e * theta.cos())
    }

    /// Angular speed at `theta`: `ω_base · (a / r)^1.5`.
    pub fn angular_speed(&self, theta: f32) -> f32 {
        if self.is_degenerate() {
            return self.base_speed;
        }
        let r = self.orbital_radius(theta);
        self.base_speed * (self.radius / r).powf(1.5)
    }

    /// New angle after `dt` simulated seconds, using the speed at the
    /// current angle.
    ///
    /// `dt` already includes the time scale and orbit speed multiplier; a
    /// zero `dt` (paused) returns `theta` unchanged.
    pub fn advance(&self, theta: f32, dt: f32) -> f32 {
        if dt == 0.0 {
            return theta;
        }
        theta + self.angular_speed(theta) * dt
    }

    /// Position in the orbital (XZ) plane relative to the focus.
    pub fn position(&self, theta: f32) -> Vec3 {
        let r = self.orbital_radius(theta);
        Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
    }

    /// Sample the closed orbit path with `segments` segments.
    ///
    /// Returns `segments + 1` points; the last equals the first.
    pub fn path(&self, segments: u32) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.position(i as f32 / segments as f32 * TAU))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_circular_speed_is_constant() {
        let orbit = Orbit::circular(10.0, 0.3);
        for i in 0..16 {
            let theta = i as f32 * 0.4;
            assert!((orbit.angular_speed(theta) - 0.3).abs() < 1e-6);
            assert!((orbit.orbital_radius(theta) - 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_perihelion_faster_than_aphelion() {
        let orbit = Orbit::new(16.0, 0.093, 0.4);
        assert!(orbit.angular_speed(0.0) > orbit.angular_speed(PI));
        assert!(orbit.orbital_radius(0.0) < orbit.orbital_radius(PI));
    }

    #[test]
    fn test_earth_like_advance_matches_closed_form() {
        let orbit = Orbit::new(12.0, 0.017, 0.5);
        let theta0 = 1.2_f32;
        let dt = 1.0 / 60.0;

        let r = 12.0 * (1.0 - 0.017_f32 * 0.017) / (1.0 + 0.017 * theta0.cos());
        let omega = 0.5 * (12.0 / r).powf(1.5);
        let expected = theta0 + omega * dt;

        assert!((orbit.advance(theta0, dt) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let orbit = Orbit::new(24.0, 0.049, 0.2);
        assert_eq!(orbit.advance(2.5, 0.0), 2.5);
    }

    #[test]
    fn test_eccentricity_is_clamped() {
        let orbit = Orbit::new(10.0, 1.5, 0.1);
        assert_eq!(orbit.eccentricity(), MAX_ECCENTRICITY);
        // Radius stays finite and positive even at the worst angle
        let r = orbit.orbital_radius(PI);
        assert!(r.is_finite() && r > 0.0);

        let orbit = Orbit::new(10.0, -0.2, 0.1);
        assert_eq!(orbit.eccentricity(), 0.0);
    }

    #[test]
    fn test_nan_inputs_become_zero() {
        let orbit = Orbit::new(f32::NAN, f32::NAN, 0.3);
        assert_eq!(orbit.eccentricity(), 0.0);
        assert_eq!(orbit.radius(), 0.0);
        assert!(orbit.is_degenerate());
        assert_eq!(orbit.advance(1.0, 0.5), 1.0 + 0.3 * 0.5);
    }

    #[test]
    fn test_degenerate_orbit_stays_at_origin() {
        let orbit = Orbit::new(0.0, 0.5, 1.0);
        assert!(orbit.is_degenerate());
        let theta = orbit.advance(0.0, 1.0);
        assert!(theta.is_finite());
        assert_eq!(orbit.position(theta), Vec3::ZERO);
    }

    #[test]
    fn test_path_is_closed() {
        let orbit = Orbit::new(6.0, 0.205, 0.8);
        let path = orbit.path(128);
        assert_eq!(path.len(), 129);
        assert!((path[0] - path[128]).length() < 1e-4);
    }
}
