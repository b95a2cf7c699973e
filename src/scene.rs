//! The per-frame simulation step.
//!
//! [`Scene`] owns every piece of simulation state and is the only thing
//! that mutates it. Commands (mode changes, time control, config updates,
//! camera manipulation) are applied between frames; [`Scene::step`] then
//! runs the frame in a fixed order:
//!
//! 1. the clock turns the real frame delta into a [`FrameTime`]
//! 2. the camera controller advances in real time
//! 3. every active group advances with the simulated delta
//!
//! The renderer reads positions, buffers, mesh transforms and the camera
//! back out through the accessors. Nothing here draws.
//!
//! ```ignore
//! let mut scene = Scene::new(SpaceConfig::default());
//! scene.set_view_mode(ViewMode::Galaxy);
//! loop {
//!     let time = scene.step(frame_delta);
//!     renderer.upload(scene.visible_fields());
//!     renderer.draw(scene.camera().view_matrix());
//! }
//! ```

use crate::bodies::{
    BodyRegistry, BLACK_HOLE_INFO, BLACK_HOLE_NAME, SMALL_BLACK_HOLES, SUN_INFO, SUN_RADIUS,
};
use crate::camera::{Camera, CameraController};
use crate::config::{ConfigChange, ConfigUpdate, SpaceConfig};
use crate::field::{FieldId, FieldRegistry, ParticleField};
use crate::generate::FieldRecipe;
use crate::selection::{nearest_hit, EntityId, PickRay, PickTarget, Selection};
use crate::spawn::{hex_to_rgb, SpawnContext};
use crate::time::{FrameTime, SimulationClock};
use crate::view::{Group, GroupSet, ViewMode, ViewState};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Sample count of each orbit path overlay.
pub const ORBIT_PATH_SEGMENTS: u32 = 128;

/// Sun axial spin, radians per real second.
const SUN_SPIN_RATE: f32 = 0.12;
/// Corona drift about x and y, radians per real second.
const CORONA_RATE: Vec2 = Vec2::new(0.03, 0.06);

const LABEL_LIFT: f32 = 0.8;

/// Mesh-level transforms that are not stored per particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cosmetics {
    /// Sun rotation about y.
    pub sun_spin: f32,
    /// Sun glow sphere scale.
    pub sun_glow_scale: f32,
    /// Corona rotation about x and y.
    pub corona_rotation: Vec2,
    /// Intensity of the sun's point light.
    pub sun_light_intensity: f32,
    /// Central black hole outer glow scale.
    pub black_hole_glow_scale: f32,
    /// Rotation of the three lensing rings about their axis.
    pub lensing_ring_angles: [f32; 3],
    /// Scale of the three lensing rings.
    pub lensing_ring_scales: [f32; 3],
    /// Opacity of the lens distortion sphere.
    pub lens_opacity: f32,
    /// Spin shared by the small black holes' disks.
    pub small_disk_spin: f32,
}

impl Default for Cosmetics {
    fn default() -> Self {
        Self {
            sun_spin: 0.0,
            sun_glow_scale: 1.0,
            corona_rotation: Vec2::ZERO,
            sun_light_intensity: 0.0,
            black_hole_glow_scale: 1.0,
            lensing_ring_angles: [0.0; 3],
            lensing_ring_scales: [1.0; 3],
            lens_opacity: 0.1,
            small_disk_spin: 0.0,
        }
    }
}

impl Cosmetics {
    /// Advance every transform whose group is active.
    ///
    /// Sun effects run on real time and keep animating while paused. The
    /// black hole effects freeze with the clock.
    fn update(
        &mut self,
        time: &FrameTime,
        paused: bool,
        active: GroupSet,
        mode: ViewMode,
        config: &SpaceConfig,
    ) {
        let t = time.real_elapsed;

        if active.contains(Group::Sun) {
            self.sun_spin = wrap(self.sun_spin + SUN_SPIN_RATE * time.real_delta);
            self.sun_glow_scale = 1.0 + (t * 2.0).sin() * 0.05;
            let corona = self.corona_rotation + CORONA_RATE * time.real_delta;
            self.corona_rotation = Vec2::new(wrap(corona.x), wrap(corona.y));
            self.sun_light_intensity = config.sun_light_intensity();
        }

        if paused {
            return;
        }

        if active.contains(Group::BlackHole) {
            self.black_hole_glow_scale = 1.0 + (t * 2.0).sin() * 0.1;
            self.lens_opacity = 0.1 + (t * 3.0).sin() * 0.05;
        }

        if active.contains(Group::LensingRings) {
            let speed = time.sim_delta * mode.lensing_speed_factor();
            for (angle, rate) in self.lensing_ring_angles.iter_mut().zip([0.3, -0.2, 0.15]) {
                *angle = wrap(*angle + speed * rate);
            }
            self.lensing_ring_scales[0] = 1.0 + (t * 2.0).sin() * 0.05;
            self.lensing_ring_scales[1] = 1.0 + (t * 1.5 + 1.0).sin() * 0.03;
        }

        if active.contains(Group::SmallBlackHoles) {
            self.small_disk_spin = wrap(self.small_disk_spin + time.sim_delta * 2.0);
        }
    }
}

#[inline]
fn wrap(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// A text label anchored in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub position: Vec3,
    pub color: Vec3,
}

/// Group that owns a particle field.
pub fn field_group(id: FieldId) -> Group {
    match id {
        FieldId::AsteroidBelt => Group::AsteroidBelt,
        FieldId::KuiperBelt => Group::KuiperBelt,
        FieldId::GalaxyArms => Group::GalaxyArms,
        FieldId::Nebula => Group::Nebula,
        FieldId::Starfield => Group::Starfield,
        FieldId::SunCorona => Group::Sun,
        FieldId::AccretionDisk => Group::AccretionDisk,
        FieldId::InnerDisk => Group::InnerDisk,
    }
}

/// Recipe a field should be generated from under `config`.
pub fn recipe_for(id: FieldId, config: &SpaceConfig) -> FieldRecipe {
    match id {
        FieldId::AsteroidBelt => FieldRecipe::asteroid_belt(),
        FieldId::KuiperBelt => FieldRecipe::kuiper_belt(),
        FieldId::GalaxyArms => FieldRecipe::spiral_galaxy(config.galaxy_star_count),
        FieldId::Nebula => FieldRecipe::nebula(),
        FieldId::Starfield => FieldRecipe::starfield(),
        FieldId::SunCorona => FieldRecipe::sun_corona(),
        FieldId::AccretionDisk => {
            FieldRecipe::accretion_disk(config.black_hole_size, config.accretion_disk_rgb())
        }
        FieldId::InnerDisk => FieldRecipe::inner_disk(config.black_hole_size),
    }
}

/// The whole simulated scene.
pub struct Scene {
    config: SpaceConfig,
    clock: SimulationClock,
    view: ViewState,
    controller: CameraController,
    bodies: BodyRegistry,
    fields: FieldRegistry,
    spawn: SpawnContext,
    orbit_paths: Vec<Vec<Vec3>>,
    cosmetics: Cosmetics,
}

impl Scene {
    /// Build a scene in solar mode, generating every particle field.
    pub fn new(config: SpaceConfig) -> Self {
        Self::with_spawn(config, SpawnContext::new())
    }

    /// Like [`new`](Self::new) with reproducible field generation.
    pub fn with_seed(config: SpaceConfig, seed: u64) -> Self {
        Self::with_spawn(config, SpawnContext::seeded(seed))
    }

    fn with_spawn(mut config: SpaceConfig, mut spawn: SpawnContext) -> Self {
        config.validate();

        let mut fields = FieldRegistry::new();
        for id in FieldId::ALL {
            fields.ensure(id, recipe_for(id, &config), &mut spawn);
        }

        let bodies = BodyRegistry::new();
        let orbit_paths = bodies
            .planets()
            .iter()
            .map(|p| p.orbit().path(ORBIT_PATH_SEGMENTS))
            .collect();

        let view = ViewState::default();
        let controller = CameraController::new(Camera::from_preset(view.mode().camera_preset()));

        let particles: usize = fields.iter().map(|(_, f)| f.len()).sum();
        log::info!(
            "scene ready: {} planets, {} dwarf planets, {} particles in {} fields",
            bodies.planets().len(),
            bodies.dwarf_planets().len(),
            particles,
            fields.len()
        );

        Self {
            config,
            clock: SimulationClock::new(),
            view,
            controller,
            bodies,
            fields,
            spawn,
            orbit_paths,
            cosmetics: Cosmetics::default(),
        }
    }

    // ========== Commands ==========

    /// Switch view mode and start the camera toward the new preset.
    ///
    /// Returns `false` and does nothing if `mode` is already active.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if !self.view.set_mode(mode) {
            return false;
        }
        self.controller.begin(mode.camera_preset());
        true
    }

    /// Set the time scale. Negative values clamp to zero.
    pub fn set_time_speed(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.clock.toggle_pause()
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    /// Merge a partial config update, regenerating only the fields whose
    /// generation parameters changed.
    pub fn update_config(&mut self, update: &ConfigUpdate) -> ConfigChange {
        let change = self.config.apply(update);
        if change.is_empty() {
            return change;
        }

        for id in change.affected_fields() {
            let recipe = recipe_for(id, &self.config);
            if self.fields.ensure(id, recipe, &mut self.spawn) {
                log::info!("regenerated {} after config change", id);
            }
        }
        change
    }

    pub fn toggle_orbits(&mut self) -> bool {
        self.view.toggle_orbits()
    }

    pub fn toggle_labels(&mut self) -> bool {
        self.view.toggle_labels()
    }

    pub fn toggle_starfield(&mut self) -> bool {
        self.view.toggle_starfield()
    }

    /// Rotate the camera about its target.
    pub fn orbit_camera(&mut self, yaw: f32, pitch: f32) {
        self.controller.camera_mut().orbit(yaw, pitch);
    }

    /// Scale the camera's distance to its target.
    pub fn zoom_camera(&mut self, factor: f32) {
        self.controller.camera_mut().zoom(factor);
    }

    // ========== Frame ==========

    /// Advance the scene by one frame of `frame_delta` real seconds.
    pub fn step(&mut self, frame_delta: f32) -> FrameTime {
        let time = self.clock.tick(frame_delta);
        self.controller.update(time.real_delta);

        let active = self.view.active_groups();
        let mode = self.view.mode();
        let sim = time.sim_delta;
        let orbit_dt = sim * self.config.orbit_speed_multiplier;

        if active.contains(Group::Planets) {
            self.bodies.advance_planets(orbit_dt, sim);
        }
        if active.contains(Group::DwarfPlanets) {
            self.bodies.advance_dwarf_planets(orbit_dt);
        }

        let galaxy_dt = sim * self.config.galaxy_rotation_speed;
        let disk_dt = sim * mode.disk_speed_factor();
        for id in FieldId::ALL {
            if !active.contains(field_group(id)) {
                continue;
            }
            let dt = match id {
                FieldId::AsteroidBelt | FieldId::KuiperBelt => orbit_dt,
                FieldId::GalaxyArms | FieldId::Nebula => galaxy_dt,
                FieldId::AccretionDisk | FieldId::InnerDisk => disk_dt,
                FieldId::Starfield | FieldId::SunCorona => continue,
            };
            if let Some(field) = self.fields.get_mut(id) {
                field.update(dt);
            }
        }

        self.cosmetics
            .update(&time, self.clock.is_paused(), active, mode, &self.config);

        time
    }

    // ========== Selection ==========

    /// Nearest active pickable body hit by `ray`.
    pub fn pick(&self, ray: &PickRay) -> Option<Selection> {
        let active = self.view.active_groups();
        let size_mult = self.config.planet_size_multiplier;
        let mut targets = Vec::new();

        if active.contains(Group::Sun) {
            targets.push(PickTarget {
                id: EntityId::Sun,
                center: Vec3::ZERO,
                radius: SUN_RADIUS,
            });
        }
        if active.contains(Group::Planets) {
            targets.extend(self.bodies.planets().iter().enumerate().map(|(i, p)| PickTarget {
                id: EntityId::Planet(i),
                center: p.position(),
                radius: p.scaled_size(size_mult),
            }));
        }
        if active.contains(Group::DwarfPlanets) {
            targets.extend(self.bodies.dwarf_planets().iter().enumerate().map(|(i, d)| {
                PickTarget {
                    id: EntityId::DwarfPlanet(i),
                    center: d.position(),
                    radius: d.scaled_size(size_mult),
                }
            }));
        }
        if active.contains(Group::BlackHole) {
            targets.push(PickTarget {
                id: EntityId::BlackHole,
                center: Vec3::ZERO,
                radius: self.config.black_hole_size,
            });
        }

        let (id, distance) = nearest_hit(ray, targets)?;
        let (name, info) = self.describe(id)?;
        Some(Selection {
            id,
            name,
            info,
            distance,
            point: ray.at(distance),
        })
    }

    /// Name and info text of an entity.
    pub fn describe(&self, id: EntityId) -> Option<(&'static str, &'static str)> {
        match id {
            EntityId::Sun => Some(("Sun", SUN_INFO)),
            EntityId::Planet(i) => self.bodies.planets().get(i).map(|p| (p.name, p.info)),
            EntityId::DwarfPlanet(i) => self.bodies.dwarf_planets().get(i).map(|d| (d.name, d.info)),
            EntityId::BlackHole => Some((BLACK_HOLE_NAME, BLACK_HOLE_INFO)),
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[inline]
    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    #[inline]
    pub fn active_groups(&self) -> GroupSet {
        self.view.active_groups()
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    #[inline]
    pub fn camera_controller(&self) -> &CameraController {
        &self.controller
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.controller.is_transitioning()
    }

    #[inline]
    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    #[inline]
    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&ParticleField> {
        self.fields.get(id)
    }

    /// Mutable field access, for clearing dirty flags after upload.
    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut ParticleField> {
        self.fields.get_mut(id)
    }

    /// Fields whose group is currently active.
    pub fn visible_fields(&self) -> impl Iterator<Item = (FieldId, &ParticleField)> {
        let active = self.active_groups();
        self.fields
            .iter()
            .filter(move |(id, _)| active.contains(field_group(*id)))
    }

    #[inline]
    pub fn cosmetics(&self) -> &Cosmetics {
        &self.cosmetics
    }

    /// World positions of the small black holes, empty when inactive.
    pub fn small_black_holes(&self) -> &[Vec3] {
        if self.active_groups().contains(Group::SmallBlackHoles) {
            &SMALL_BLACK_HOLES
        } else {
            &[]
        }
    }

    /// Closed orbit polylines for every planet, empty when hidden.
    pub fn orbit_paths(&self) -> &[Vec<Vec3>] {
        if self.active_groups().contains(Group::OrbitPaths) {
            &self.orbit_paths
        } else {
            &[]
        }
    }

    /// Labels to draw this frame.
    pub fn labels(&self) -> Vec<Label> {
        if !self.view.labels_visible() {
            return Vec::new();
        }

        match self.mode() {
            ViewMode::Solar => {
                let size_mult = self.config.planet_size_multiplier;
                let mut labels = Vec::with_capacity(self.bodies.planets().len() + 1);
                labels.push(Label {
                    text: "Sun",
                    position: Vec3::new(0.0, SUN_RADIUS + 1.5, 0.0),
                    color: hex_to_rgb(0xffdd44),
                });
                labels.extend(self.bodies.planets().iter().map(|p| Label {
                    text: p.name,
                    position: p.position() + Vec3::Y * (p.scaled_size(size_mult) + LABEL_LIFT),
                    color: Vec3::ONE,
                }));
                labels
            }
            ViewMode::Galaxy | ViewMode::BlackHole => vec![
                Label {
                    text: "Sagittarius A* (Supermassive Black Hole)",
                    position: Vec3::new(0.0, 8.0, 0.0),
                    color: hex_to_rgb(0xff8800),
                },
                Label {
                    text: "Milky Way Galaxy Center",
                    position: Vec3::new(0.0, -10.0, 0.0),
                    color: hex_to_rgb(0xaaccff),
                },
            ],
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SpaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::with_seed(SpaceConfig::default(), 42)
    }

    #[test]
    fn test_new_generates_every_field() {
        let scene = scene();
        assert_eq!(scene.fields().len(), FieldId::COUNT);
        assert_eq!(scene.field(FieldId::GalaxyArms).map(|f| f.len()), Some(8000));
        assert_eq!(scene.orbit_paths().len(), 8);
        assert_eq!(scene.orbit_paths()[0].len(), ORBIT_PATH_SEGMENTS as usize + 1);
    }

    #[test]
    fn test_set_view_mode_arms_transition() {
        let mut scene = scene();
        assert!(!scene.is_transitioning());
        assert!(!scene.set_view_mode(ViewMode::Solar));
        assert!(!scene.is_transitioning());

        assert!(scene.set_view_mode(ViewMode::BlackHole));
        assert!(scene.is_transitioning());
        for _ in 0..130 {
            scene.step(1.0 / 60.0);
        }
        assert!(!scene.is_transitioning());
        assert_eq!(scene.camera().position, Vec3::new(15.0, 8.0, 15.0));
    }

    #[test]
    fn test_camera_transition_runs_while_paused() {
        let mut scene = scene();
        scene.pause();
        scene.set_view_mode(ViewMode::Galaxy);
        scene.step(2.5);
        assert_eq!(scene.camera().position, Vec3::new(0.0, 150.0, 200.0));
    }

    #[test]
    fn test_visible_fields_follow_mode() {
        let mut scene = scene();
        let solar: Vec<_> = scene.visible_fields().map(|(id, _)| id).collect();
        assert!(solar.contains(&FieldId::AsteroidBelt));
        assert!(solar.contains(&FieldId::SunCorona));
        assert!(!solar.contains(&FieldId::GalaxyArms));

        scene.set_view_mode(ViewMode::Galaxy);
        let galaxy: Vec<_> = scene.visible_fields().map(|(id, _)| id).collect();
        assert!(galaxy.contains(&FieldId::AccretionDisk));
        assert!(!galaxy.contains(&FieldId::KuiperBelt));
        assert!(scene.orbit_paths().is_empty());
        assert_eq!(scene.small_black_holes().len(), 3);
    }

    #[test]
    fn test_sun_cosmetics_run_on_real_time() {
        let mut scene = scene();
        scene.pause();
        scene.step(1.0);
        let c = scene.cosmetics();
        assert!((c.sun_spin - SUN_SPIN_RATE).abs() < 1e-6);
        assert_eq!(c.sun_light_intensity, 200.0);
    }

    #[test]
    fn test_lensing_rings_follow_blackhole_factor() {
        let mut galaxy = scene();
        galaxy.set_view_mode(ViewMode::Galaxy);
        galaxy.step(1.0);

        let mut hole = scene();
        hole.set_view_mode(ViewMode::BlackHole);
        hole.step(1.0);

        let g = galaxy.cosmetics().lensing_ring_angles;
        let h = hole.cosmetics().lensing_ring_angles;
        assert!((g[0] - 0.3).abs() < 1e-6);
        assert!((h[0] - 0.6).abs() < 1e-6);
        assert!((h[1] - (TAU - 0.4)).abs() < 1e-5);
        assert!((hole.cosmetics().small_disk_spin - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_pick_sun_and_black_hole() {
        let mut scene = scene();
        let ray = PickRay::new(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.id, EntityId::Sun);
        assert_eq!(hit.name, "Sun");

        scene.set_view_mode(ViewMode::Galaxy);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.id, EntityId::BlackHole);
        assert_eq!(hit.name, BLACK_HOLE_NAME);
        assert!((hit.distance - 47.0).abs() < 1e-3);
        assert!((hit.point - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_pick_planet_at_current_position() {
        let mut scene = scene();
        scene.step(3.0);
        let earth = &scene.bodies().planets()[2];
        let target = earth.position();
        let ray = PickRay::through(target + Vec3::new(0.0, 30.0, 0.0), target);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.id, EntityId::Planet(2));
        assert_eq!(hit.name, earth.name);
    }

    #[test]
    fn test_cosmetic_spins_stay_wrapped() {
        let mut scene = scene();
        for _ in 0..10 {
            scene.step(100.0);
        }
        let c = scene.cosmetics();
        assert!((0.0..TAU).contains(&c.sun_spin));
        assert!((0.0..TAU).contains(&c.corona_rotation.x));
        assert!((0.0..TAU).contains(&c.corona_rotation.y));

        scene.set_view_mode(ViewMode::BlackHole);
        for _ in 0..10 {
            scene.step(100.0);
        }
        let c = scene.cosmetics();
        assert!((0.0..TAU).contains(&c.small_disk_spin));
        assert!(c.lensing_ring_angles.iter().all(|a| (0.0..TAU).contains(a)));
    }

    #[test]
    fn test_disk_recipe_uses_config_color() {
        let config = SpaceConfig {
            accretion_disk_color: 0x3366ff,
            ..SpaceConfig::default()
        };
        match recipe_for(FieldId::AccretionDisk, &config) {
            FieldRecipe::AccretionDisk { color, hole_size, .. } => {
                assert_eq!(color, config.accretion_disk_rgb());
                assert_eq!(hole_size, 3.0);
            }
            other => panic!("unexpected recipe {:?}", other),
        }
    }

    #[test]
    fn test_labels() {
        let mut scene = scene();
        assert_eq!(scene.labels().len(), 9);
        scene.set_view_mode(ViewMode::BlackHole);
        assert_eq!(scene.labels().len(), 2);
        scene.toggle_labels();
        assert!(scene.labels().is_empty());
    }

    #[test]
    fn test_star_brightness_never_regenerates() {
        let mut scene = scene();
        let change = scene.update_config(&ConfigUpdate::new().star_brightness(2.0));
        assert_eq!(change.keys().len(), 1);
        for id in FieldId::ALL {
            assert_eq!(scene.fields().generation(id), 1);
        }
    }
}
