//! Integration tests for the per-frame scene step.
//!
//! These drive a [`Scene`] the way a render loop would and check the
//! cross-module contracts: time control, view gating, config-driven
//! regeneration and camera framing.

use glam::Vec3;
use orrery::prelude::*;
use std::f32::consts::{PI, TAU};

const DT: f32 = 1.0 / 60.0;

fn scene() -> Scene {
    Scene::with_seed(SpaceConfig::default(), 7)
}

fn positions(scene: &Scene, id: FieldId) -> Vec<Vec3> {
    scene.field(id).map(|f| f.positions().to_vec()).unwrap_or_default()
}

fn planet_positions(scene: &Scene) -> Vec<Vec3> {
    scene.bodies().planets().iter().map(|p| p.position()).collect()
}

// ============================================================================
// Time control
// ============================================================================

#[test]
fn test_pause_freezes_bodies_and_fields() {
    let mut scene = scene();
    scene.step(DT);
    scene.pause();

    let planets = planet_positions(&scene);
    let dwarfs: Vec<_> = scene.bodies().dwarf_planets().iter().map(|d| d.position()).collect();
    let asteroids = positions(&scene, FieldId::AsteroidBelt);
    let kuiper = positions(&scene, FieldId::KuiperBelt);
    let moon_angle = scene.bodies().planets()[2].moons()[0].angle();

    for _ in 0..30 {
        scene.step(DT);
    }

    assert_eq!(planet_positions(&scene), planets);
    let dwarfs_after: Vec<_> = scene.bodies().dwarf_planets().iter().map(|d| d.position()).collect();
    assert_eq!(dwarfs_after, dwarfs);
    assert_eq!(positions(&scene, FieldId::AsteroidBelt), asteroids);
    assert_eq!(positions(&scene, FieldId::KuiperBelt), kuiper);
    assert_eq!(scene.bodies().planets()[2].moons()[0].angle(), moon_angle);
    assert_eq!(scene.clock().sim_elapsed(), DT);
}

#[test]
fn test_pause_freezes_galaxy_fields() {
    let mut scene = scene();
    scene.set_view_mode(ViewMode::BlackHole);
    scene.toggle_pause();

    let arms = positions(&scene, FieldId::GalaxyArms);
    let disk = positions(&scene, FieldId::AccretionDisk);
    let rings = scene.cosmetics().lensing_ring_angles;

    for _ in 0..10 {
        scene.step(DT);
    }

    assert_eq!(positions(&scene, FieldId::GalaxyArms), arms);
    assert_eq!(positions(&scene, FieldId::AccretionDisk), disk);
    assert_eq!(scene.cosmetics().lensing_ring_angles, rings);
}

#[test]
fn test_resume_continues_motion() {
    let mut scene = scene();
    scene.pause();
    scene.step(DT);
    let before = planet_positions(&scene);

    scene.resume();
    scene.step(DT);
    assert_ne!(planet_positions(&scene), before);
}

#[test]
fn test_negative_time_scale_clamps_to_zero() {
    let mut scene = scene();
    scene.set_time_speed(-3.0);
    assert_eq!(scene.time_scale(), 0.0);

    let before = planet_positions(&scene);
    let time = scene.step(DT);
    assert_eq!(time.sim_delta, 0.0);
    assert_eq!(planet_positions(&scene), before);
}

#[test]
fn test_time_scale_speeds_up_orbits() {
    let mut slow = scene();
    let mut fast = scene();
    fast.set_time_speed(4.0);

    slow.step(DT);
    fast.step(DT);

    let start = 2.0 / 8.0 * TAU;
    let slow_moved = slow.bodies().planets()[2].angle() - start;
    let fast_moved = fast.bodies().planets()[2].angle() - start;
    assert!(fast_moved > 3.9 * slow_moved);
}

// ============================================================================
// Orbits
// ============================================================================

#[test]
fn test_earth_matches_closed_form() {
    let mut scene = scene();
    scene.step(DT);

    // Earth is the third of eight planets, so it starts at a quarter turn.
    let theta0 = PI / 2.0;
    let r = 12.0 * (1.0 - 0.017_f32 * 0.017) / (1.0 + 0.017 * theta0.cos());
    let omega = 0.5 * (12.0 / r).powf(1.5);
    let expected = theta0 + omega * DT;

    let earth = &scene.bodies().planets()[2];
    assert_eq!(earth.name, "Earth");
    assert!((earth.angle() - expected).abs() < 1e-5);
    assert!((earth.spin() - 0.5 * DT).abs() < 1e-6);
}

#[test]
fn test_orbit_speed_multiplier_scales_orbits_not_spin() {
    let mut scene = scene();
    scene.update_config(&ConfigUpdate::new().orbit_speed_multiplier(0.0));
    let before = planet_positions(&scene);
    scene.step(DT);

    assert_eq!(planet_positions(&scene), before);
    assert!(scene.bodies().planets()[2].spin() > 0.0);
}

// ============================================================================
// View modes
// ============================================================================

#[test]
fn test_mode_switch_gates_updates_in_same_step() {
    let mut scene = scene();
    scene.step(DT);

    scene.set_view_mode(ViewMode::Galaxy);
    let planets = planet_positions(&scene);
    let asteroids = positions(&scene, FieldId::AsteroidBelt);
    let arms = positions(&scene, FieldId::GalaxyArms);

    scene.step(DT);

    assert_eq!(planet_positions(&scene), planets);
    assert_eq!(positions(&scene, FieldId::AsteroidBelt), asteroids);
    assert_ne!(positions(&scene, FieldId::GalaxyArms), arms);
    assert!(!scene.active_groups().contains(Group::Planets));
    assert!(scene.active_groups().contains(Group::GalaxyArms));
}

#[test]
fn test_blackhole_mode_spins_disk_faster() {
    let mut galaxy = scene();
    galaxy.set_view_mode(ViewMode::Galaxy);
    let mut hole = scene();
    hole.set_view_mode(ViewMode::BlackHole);

    let start = hole.field(FieldId::AccretionDisk).unwrap().angles()[0];
    galaxy.step(0.1);
    hole.step(0.1);

    let g = galaxy.field(FieldId::AccretionDisk).unwrap().angles()[0] - start;
    let h = hole.field(FieldId::AccretionDisk).unwrap().angles()[0] - start;
    assert!((g - 0.05).abs() < 1e-5);
    assert!((h - 0.15).abs() < 1e-5);
}

#[test]
fn test_starfield_toggle_hides_field() {
    let mut scene = scene();
    assert!(scene.visible_fields().any(|(id, _)| id == FieldId::Starfield));
    scene.toggle_starfield();
    assert!(!scene.visible_fields().any(|(id, _)| id == FieldId::Starfield));
    assert!(scene.field(FieldId::Starfield).is_some());
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_black_hole_size_regenerates_disks_only() {
    let mut scene = scene();
    let count = scene.field(FieldId::AccretionDisk).unwrap().len();
    let (_, max_before) = scene.field(FieldId::AccretionDisk).unwrap().radius_range().unwrap();
    assert!(max_before <= 12.0 + 1e-3);

    let change = scene.update_config(&ConfigUpdate::new().black_hole_size(5.0));
    assert!(change.contains(ConfigKey::BlackHoleSize));

    let disk = scene.field(FieldId::AccretionDisk).unwrap();
    let (min, max) = disk.radius_range().unwrap();
    assert_eq!(disk.len(), count);
    assert!(min >= 6.0 - 1e-3);
    assert!(max <= 20.0 + 1e-3);
    assert!(max > 12.0);

    let fields = scene.fields();
    assert_eq!(fields.generation(FieldId::AccretionDisk), 2);
    assert_eq!(fields.generation(FieldId::InnerDisk), 2);
    assert_eq!(fields.generation(FieldId::GalaxyArms), 1);
    assert_eq!(fields.generation(FieldId::Starfield), 1);
}

#[test]
fn test_unrelated_config_changes_never_regenerate() {
    let mut scene = scene();
    let arms = positions(&scene, FieldId::GalaxyArms);

    scene.update_config(
        &ConfigUpdate::new()
            .planet_size_multiplier(2.0)
            .orbit_speed_multiplier(3.0)
            .galaxy_rotation_speed(0.2)
            .star_brightness(1.5)
            .sun_glow_intensity(4.0),
    );

    for id in FieldId::ALL {
        assert_eq!(scene.fields().generation(id), 1, "{} regenerated", id);
    }
    assert_eq!(positions(&scene, FieldId::GalaxyArms), arms);
}

#[test]
fn test_repeating_a_value_does_not_regenerate() {
    let mut scene = scene();
    let change = scene.update_config(&ConfigUpdate::new().galaxy_star_count(8000));
    assert!(change.is_empty());
    assert_eq!(scene.fields().generation(FieldId::GalaxyArms), 1);

    scene.update_config(&ConfigUpdate::new().galaxy_star_count(500));
    assert_eq!(scene.field(FieldId::GalaxyArms).unwrap().len(), 500);
    assert_eq!(scene.fields().generation(FieldId::GalaxyArms), 2);
}

#[test]
fn test_disk_color_regenerates_outer_disk() {
    let mut scene = scene();
    scene.update_config(&ConfigUpdate::new().accretion_disk_color(0x3366ff));
    assert_eq!(scene.fields().generation(FieldId::AccretionDisk), 2);
    assert_eq!(scene.fields().generation(FieldId::InnerDisk), 1);
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn test_interrupted_transition_restarts_from_mid_flight() {
    let mut scene = scene();
    scene.set_view_mode(ViewMode::Galaxy);
    for _ in 0..30 {
        scene.step(DT);
    }
    let mid = *scene.camera();
    assert_ne!(mid.position, Vec3::new(0.0, 40.0, 80.0));
    assert_ne!(mid.position, Vec3::new(0.0, 150.0, 200.0));

    scene.set_view_mode(ViewMode::BlackHole);
    let transition = *scene.camera_controller().transition().unwrap();
    assert_eq!(transition.start_pos, mid.position);
    assert_eq!(transition.end_pos, Vec3::new(15.0, 8.0, 15.0));

    for _ in 0..200 {
        scene.step(DT);
    }
    assert_eq!(scene.camera().position, Vec3::new(15.0, 8.0, 15.0));
}

#[test]
fn test_user_zoom_when_idle() {
    let mut scene = scene();
    let d = scene.camera().distance();
    scene.zoom_camera(0.5);
    scene.step(DT);
    assert!((scene.camera().distance() - d * 0.5).abs() < 1e-3);
}
