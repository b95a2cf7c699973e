//! Particle fields: large fixed-count point populations.
//!
//! A [`ParticleField`] is generated once by a [`FieldRecipe`] and then
//! animated in place. Each particle keeps its own angle, radius and angular
//! speed around the Y axis; the per-frame pass only rewrites the angle and
//! the derived x/z coordinates, so the position buffer never reallocates.
//!
//! The [`FieldRegistry`] owns every field together with the recipe it was
//! generated from, and only regenerates a field when its recipe changes.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = FieldRegistry::new();
//! let mut ctx = SpawnContext::new();
//! registry.ensure(FieldId::AsteroidBelt, FieldRecipe::asteroid_belt(), &mut ctx);
//!
//! // Every frame:
//! if let Some(belt) = registry.get_mut(FieldId::AsteroidBelt) {
//!     belt.update(frame.sim_delta * config.orbit_speed_multiplier);
//!     if belt.take_dirty() {
//!         upload(belt.positions_bytes());
//!     }
//! }
//! ```

use crate::generate::{generate, FieldRecipe};
use crate::spawn::SpawnContext;
use glam::Vec3;
use std::f32::consts::TAU;
use std::fmt;

/// Stable identifiers for every particle field in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    AsteroidBelt,
    KuiperBelt,
    GalaxyArms,
    Nebula,
    Starfield,
    SunCorona,
    AccretionDisk,
    InnerDisk,
}

impl FieldId {
    /// Number of field identifiers.
    pub const COUNT: usize = 8;

    /// Every identifier, in declaration order.
    pub const ALL: [FieldId; Self::COUNT] = [
        FieldId::AsteroidBelt,
        FieldId::KuiperBelt,
        FieldId::GalaxyArms,
        FieldId::Nebula,
        FieldId::Starfield,
        FieldId::SunCorona,
        FieldId::AccretionDisk,
        FieldId::InnerDisk,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldId::AsteroidBelt => "asteroid_belt",
            FieldId::KuiperBelt => "kuiper_belt",
            FieldId::GalaxyArms => "galaxy_arms",
            FieldId::Nebula => "nebula",
            FieldId::Starfield => "starfield",
            FieldId::SunCorona => "sun_corona",
            FieldId::AccretionDisk => "accretion_disk",
            FieldId::InnerDisk => "inner_disk",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-count population of points orbiting the Y axis.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    /// Base point sizes, before any brightness multiplier.
    sizes: Vec<f32>,
    angles: Vec<f32>,
    radii: Vec<f32>,
    /// Radians per unit of scaled simulated time.
    speeds: Vec<f32>,
    /// Mesh-level tilt about the X axis, applied by the renderer.
    tilt: f32,
    dirty: bool,
}

impl ParticleField {
    /// Create an empty field with room for `count` particles.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            sizes: Vec::with_capacity(count),
            angles: Vec::with_capacity(count),
            radii: Vec::with_capacity(count),
            speeds: Vec::with_capacity(count),
            tilt: 0.0,
            dirty: true,
        }
    }

    /// Set the mesh-level tilt about the X axis.
    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    /// Append a particle. Its angle and radius around the Y axis are
    /// derived from `position`, so later angular advances preserve the
    /// generated shape.
    pub fn push(&mut self, position: Vec3, color: Vec3, size: f32, speed: f32) {
        self.angles.push(position.z.atan2(position.x));
        self.radii.push(position.x.hypot(position.z));
        self.positions.push(position);
        self.colors.push(color);
        self.sizes.push(size);
        self.speeds.push(speed);
    }

    /// Advance every particle by `sim_delta` scaled simulated seconds.
    ///
    /// O(count), in place. A zero delta (paused) leaves the buffer untouched
    /// and does not mark it dirty.
    pub fn update(&mut self, sim_delta: f32) {
        if sim_delta == 0.0 {
            return;
        }

        let particles = self
            .positions
            .iter_mut()
            .zip(self.angles.iter_mut())
            .zip(self.radii.iter())
            .zip(self.speeds.iter());

        for (((position, angle), radius), speed) in particles {
            *angle = (*angle + speed * sim_delta) % TAU;
            let (sin, cos) = angle.sin_cos();
            position.x = cos * radius;
            position.z = sin * radius;
        }

        self.dirty = true;
    }

    /// Number of particles, fixed at generation.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[inline]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    #[inline]
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    #[inline]
    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    #[inline]
    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    #[inline]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Sizes with a render-time brightness multiplier applied.
    pub fn scaled_sizes(&self, brightness: f32) -> impl Iterator<Item = f32> + '_ {
        self.sizes.iter().map(move |s| s * brightness)
    }

    /// Raw position bytes for uploading as a vertex buffer.
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw color bytes for uploading as a vertex buffer.
    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Whether positions changed since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Smallest and largest radius around the Y axis.
    pub fn radius_range(&self) -> Option<(f32, f32)> {
        if self.radii.is_empty() {
            return None;
        }
        let (min, max) = self
            .radii
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &r| (lo.min(r), hi.max(r)));
        Some((min, max))
    }
}

struct FieldEntry {
    recipe: FieldRecipe,
    field: ParticleField,
    /// How many times this slot has been generated.
    generation: u32,
}

/// Registry of every particle field, memoized by generation recipe.
#[derive(Default)]
pub struct FieldRegistry {
    entries: [Option<FieldEntry>; FieldId::COUNT],
}

impl FieldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `id` holds a field generated from `recipe`.
    ///
    /// Regenerates only when the slot is empty or was generated from a
    /// different recipe. Returns `true` if a generation happened.
    pub fn ensure(&mut self, id: FieldId, recipe: FieldRecipe, ctx: &mut SpawnContext) -> bool {
        let slot = &mut self.entries[id.index()];
        if let Some(entry) = slot {
            if entry.recipe == recipe {
                return false;
            }
        }

        let field = generate(&recipe, ctx);
        let generation = slot.as_ref().map_or(0, |e| e.generation) + 1;
        log::debug!("generated {} with {} particles (generation {})", id, field.len(), generation);
        *slot = Some(FieldEntry { recipe, field, generation });
        true
    }

    pub fn get(&self, id: FieldId) -> Option<&ParticleField> {
        self.entries[id.index()].as_ref().map(|e| &e.field)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut ParticleField> {
        self.entries[id.index()].as_mut().map(|e| &mut e.field)
    }

    /// Recipe the field in `id` was generated from.
    pub fn recipe(&self, id: FieldId) -> Option<&FieldRecipe> {
        self.entries[id.index()].as_ref().map(|e| &e.recipe)
    }

    /// Number of generations performed for `id` (0 if never generated).
    pub fn generation(&self, id: FieldId) -> u32 {
        self.entries[id.index()].as_ref().map_or(0, |e| e.generation)
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate populated slots in [`FieldId`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &ParticleField)> {
        FieldId::ALL
            .iter()
            .filter_map(move |&id| self.get(id).map(|f| (id, f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(count: usize, radius: f32, speed: f32) -> ParticleField {
        let mut field = ParticleField::with_capacity(count);
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            field.push(
                Vec3::new(angle.cos() * radius, 0.1 * i as f32, angle.sin() * radius),
                Vec3::ONE,
                1.0,
                speed,
            );
        }
        field
    }

    #[test]
    fn test_push_derives_polar_coordinates() {
        let mut field = ParticleField::with_capacity(1);
        field.push(Vec3::new(0.0, 2.0, 5.0), Vec3::ONE, 1.0, 0.0);
        assert!((field.radii()[0] - 5.0).abs() < 1e-6);
        assert!((field.angles()[0] - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_update_zero_delta_is_idempotent() {
        let mut field = ring(64, 20.0, 0.2);
        field.take_dirty();
        let before = field.positions().to_vec();

        field.update(0.0);

        assert_eq!(field.positions(), &before[..]);
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_update_preserves_radius_and_height() {
        let mut field = ring(64, 20.0, 0.2);
        let heights: Vec<f32> = field.positions().iter().map(|p| p.y).collect();

        for _ in 0..100 {
            field.update(0.05);
        }

        for (p, h) in field.positions().iter().zip(heights) {
            assert!((Vec3::new(p.x, 0.0, p.z).length() - 20.0).abs() < 1e-3);
            assert_eq!(p.y, h);
        }
        assert!(field.take_dirty());
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_update_does_not_reallocate() {
        let mut field = ring(1000, 5.0, 1.0);
        let ptr = field.positions().as_ptr();
        field.update(0.1);
        assert_eq!(field.positions().as_ptr(), ptr);
        assert_eq!(field.len(), 1000);
    }

    #[test]
    fn test_scaled_sizes() {
        let field = ring(4, 1.0, 0.0);
        let sizes: Vec<f32> = field.scaled_sizes(2.5).collect();
        assert_eq!(sizes, vec![2.5; 4]);
    }

    #[test]
    fn test_byte_views_match_counts() {
        let field = ring(10, 1.0, 0.0);
        assert_eq!(field.positions_bytes().len(), 10 * 12);
        assert_eq!(field.colors_bytes().len(), 10 * 12);
    }

    #[test]
    fn test_registry_memoizes_by_recipe() {
        let mut registry = FieldRegistry::new();
        let mut ctx = SpawnContext::seeded(3);

        assert!(registry.ensure(FieldId::InnerDisk, FieldRecipe::inner_disk(3.0), &mut ctx));
        assert!(!registry.ensure(FieldId::InnerDisk, FieldRecipe::inner_disk(3.0), &mut ctx));
        assert_eq!(registry.generation(FieldId::InnerDisk), 1);

        assert!(registry.ensure(FieldId::InnerDisk, FieldRecipe::inner_disk(5.0), &mut ctx));
        assert_eq!(registry.generation(FieldId::InnerDisk), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.generation(FieldId::Starfield), 0);
    }
}
