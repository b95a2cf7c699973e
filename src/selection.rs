//! Ray picking against the pickable bodies of the scene.
//!
//! The renderer turns a click into a [`PickRay`]; [`Scene::pick`](crate::scene::Scene::pick)
//! tests it against the currently active bodies and returns the nearest
//! hit as a [`Selection`] carrying the body's descriptive payload.

use glam::Vec3;

/// World-space ray, usually unprojected from the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    direction: Vec3,
}

impl PickRay {
    /// Build a ray. `direction` is normalized; a zero direction yields a
    /// ray that hits nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `origin` through `point`.
    pub fn through(origin: Vec3, point: Vec3) -> Self {
        Self::new(origin, point - origin)
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere.
    ///
    /// Hits behind the origin are ignored; a ray starting inside the sphere
    /// reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if self.direction == Vec3::ZERO || radius <= 0.0 {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t1 = -b - root;
        let t2 = -b + root;
        if t1 > 1e-3 {
            Some(t1)
        } else if t2 > 1e-3 {
            Some(t2)
        } else {
            None
        }
    }
}

/// Identifies a pickable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityId {
    Sun,
    /// Index into [`BodyRegistry::planets`](crate::bodies::BodyRegistry::planets).
    Planet(usize),
    /// Index into [`BodyRegistry::dwarf_planets`](crate::bodies::BodyRegistry::dwarf_planets).
    DwarfPlanet(usize),
    BlackHole,
}

/// Sphere proxy for one pickable entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickTarget {
    pub id: EntityId,
    pub center: Vec3,
    pub radius: f32,
}

/// Result of a successful pick.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub id: EntityId,
    pub name: &'static str,
    pub info: &'static str,
    /// Distance along the ray to the hit.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Nearest target hit by `ray`, with its distance.
pub fn nearest_hit(
    ray: &PickRay,
    targets: impl IntoIterator<Item = PickTarget>,
) -> Option<(EntityId, f32)> {
    targets
        .into_iter()
        .filter_map(|t| ray.intersect_sphere(t.center, t.radius).map(|d| (t.id, d)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
