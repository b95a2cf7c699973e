//! Procedural recipes for every particle field in the scene.
//!
//! A [`FieldRecipe`] fully describes a field's geometric band, count and
//! coloring; two equal recipes describe the same field up to randomness.
//! That equality is what [`FieldRegistry`](crate::field::FieldRegistry)
//! memoizes on.
//!
//! | Recipe | Band | Motion |
//! |--------|------|--------|
//! | [`FieldRecipe::AsteroidBelt`] | annulus 18..22 | per-particle drift |
//! | [`FieldRecipe::KuiperBelt`] | annulus 58..90 | slow drift |
//! | [`FieldRecipe::SpiralGalaxy`] | N logarithmic-looking arms | uniform rotation |
//! | [`FieldRecipe::Nebula`] | disk of radius 120 | half galaxy rotation |
//! | [`FieldRecipe::Starfield`] | spherical shell 300..800 | static |
//! | [`FieldRecipe::SunCorona`] | spherical shell 2.2..3.0 | mesh rotation |
//! | [`FieldRecipe::AccretionDisk`] | annulus 1.2..4 × hole size | rotation |
//! | [`FieldRecipe::InnerDisk`] | annulus 1.05..1.5 × hole size | fast rotation |

use crate::field::ParticleField;
use crate::spawn::{hex_to_rgb, SpawnContext};
use glam::Vec3;
use std::f32::consts::PI;

/// Tilt of both black-hole disks about the X axis.
pub const DISK_TILT: f32 = PI * 0.1;

/// Generation parameters for one particle field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldRecipe {
    /// Rocky belt between Mars and Jupiter.
    AsteroidBelt {
        count: u32,
        inner_radius: f32,
        outer_radius: f32,
        /// Full vertical extent of the belt.
        thickness: f32,
    },
    /// Icy belt beyond Neptune.
    KuiperBelt {
        count: u32,
        inner_radius: f32,
        outer_radius: f32,
        thickness: f32,
    },
    /// Spiral galaxy: particle `i` belongs to arm `i % arms`.
    SpiralGalaxy {
        count: u32,
        arms: u32,
        arm_length: f32,
        /// Lateral spread factor, scaled by distance from the core.
        spread: f32,
        /// Total winding in radians from core to arm tip.
        winding: f32,
    },
    /// Diffuse colored gas around the galactic core.
    Nebula {
        count: u32,
        radius: f32,
        /// Extra XZ scatter around the base disk.
        jitter: f32,
        thickness: f32,
    },
    /// Background stars on a spherical shell.
    Starfield {
        count: u32,
        inner_radius: f32,
        outer_radius: f32,
    },
    /// Hot particles surrounding the sun.
    SunCorona {
        count: u32,
        inner_radius: f32,
        outer_radius: f32,
    },
    /// Main accretion disk; regenerated when the hole size or color changes.
    AccretionDisk {
        count: u32,
        hole_size: f32,
        /// Base disk color, RGB in 0..1.
        color: Vec3,
    },
    /// Bright inner ring hugging the event horizon.
    InnerDisk { count: u32, hole_size: f32 },
}

impl FieldRecipe {
    pub fn asteroid_belt() -> Self {
        FieldRecipe::AsteroidBelt {
            count: 3000,
            inner_radius: 18.0,
            outer_radius: 22.0,
            thickness: 1.5,
        }
    }

    pub fn kuiper_belt() -> Self {
        FieldRecipe::KuiperBelt {
            count: 2000,
            inner_radius: 58.0,
            outer_radius: 90.0,
            thickness: 4.0,
        }
    }

    pub fn spiral_galaxy(count: u32) -> Self {
        FieldRecipe::SpiralGalaxy {
            count,
            arms: 4,
            arm_length: 150.0,
            spread: 0.5,
            winding: PI * 2.5,
        }
    }

    pub fn nebula() -> Self {
        FieldRecipe::Nebula {
            count: 2000,
            radius: 120.0,
            jitter: 20.0,
            thickness: 8.0,
        }
    }

    pub fn starfield() -> Self {
        FieldRecipe::Starfield {
            count: 15000,
            inner_radius: 300.0,
            outer_radius: 800.0,
        }
    }

    pub fn sun_corona() -> Self {
        FieldRecipe::SunCorona {
            count: 1000,
            inner_radius: 2.2,
            outer_radius: 3.0,
        }
    }

    pub fn accretion_disk(hole_size: f32, color: Vec3) -> Self {
        FieldRecipe::AccretionDisk {
            count: 5000,
            hole_size,
            color,
        }
    }

    pub fn inner_disk(hole_size: f32) -> Self {
        FieldRecipe::InnerDisk {
            count: 2000,
            hole_size,
        }
    }

    /// Number of particles this recipe produces.
    pub fn count(&self) -> u32 {
        match *self {
            FieldRecipe::AsteroidBelt { count, .. }
            | FieldRecipe::KuiperBelt { count, .. }
            | FieldRecipe::SpiralGalaxy { count, .. }
            | FieldRecipe::Nebula { count, .. }
            | FieldRecipe::Starfield { count, .. }
            | FieldRecipe::SunCorona { count, .. }
            | FieldRecipe::AccretionDisk { count, .. }
            | FieldRecipe::InnerDisk { count, .. } => count,
        }
    }
}

/// Generate a field from `recipe`.
pub fn generate(recipe: &FieldRecipe, ctx: &mut SpawnContext) -> ParticleField {
    match *recipe {
        FieldRecipe::AsteroidBelt { count, inner_radius, outer_radius, thickness } => {
            belt(ctx, count, inner_radius, outer_radius, thickness, |ctx| {
                let gray = ctx.random_range(0.4, 0.8);
                let color = Vec3::new(gray, gray * 0.9, gray * 0.8);
                (color, ctx.random_range(0.02, 0.1), ctx.random_range(0.15, 0.25))
            })
        }
        FieldRecipe::KuiperBelt { count, inner_radius, outer_radius, thickness } => {
            belt(ctx, count, inner_radius, outer_radius, thickness, |ctx| {
                let brightness = ctx.random_range(0.3, 0.6);
                let color = Vec3::new(brightness, brightness * 0.9, brightness * 1.1);
                (color, ctx.random_range(0.1, 0.3), ctx.random_range(0.02, 0.04))
            })
        }
        FieldRecipe::SpiralGalaxy { count, arms, arm_length, spread, winding } => {
            spiral_galaxy(ctx, count, arms, arm_length, spread, winding)
        }
        FieldRecipe::Nebula { count, radius, jitter, thickness } => {
            nebula(ctx, count, radius, jitter, thickness)
        }
        FieldRecipe::Starfield { count, inner_radius, outer_radius } => {
            starfield(ctx, count, inner_radius, outer_radius)
        }
        FieldRecipe::SunCorona { count, inner_radius, outer_radius } => {
            let mut field = ParticleField::with_capacity(count as usize);
            let color = hex_to_rgb(0xffcc00);
            for _ in 0..count {
                let position = ctx.random_on_shell(inner_radius, outer_radius);
                field.push(position, color, 0.08, 0.0);
            }
            field
        }
        FieldRecipe::AccretionDisk { count, hole_size, color } => {
            accretion_disk(ctx, count, hole_size, color)
        }
        FieldRecipe::InnerDisk { count, hole_size } => {
            let inner = hole_size * 1.05;
            let outer = hole_size * 1.5;
            let mut field = ParticleField::with_capacity(count as usize).with_tilt(DISK_TILT);
            for _ in 0..count {
                let angle = ctx.random_angle();
                let radius = ctx.random_range(inner, outer);
                let y = ctx.random_centered(0.05);
                let position = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);
                field.push(position, Vec3::new(1.0, 0.9, 0.7), 0.2, 1.5);
            }
            field
        }
    }
}

/// Flat annulus with per-particle color, size and speed.
fn belt<F>(
    ctx: &mut SpawnContext,
    count: u32,
    inner_radius: f32,
    outer_radius: f32,
    thickness: f32,
    mut style: F,
) -> ParticleField
where
    F: FnMut(&mut SpawnContext) -> (Vec3, f32, f32),
{
    let mut field = ParticleField::with_capacity(count as usize);
    for _ in 0..count {
        let angle = ctx.random_angle();
        let radius = ctx.random_range(inner_radius, outer_radius);
        let y = ctx.random_centered(thickness * 0.5);
        let (color, size, speed) = style(ctx);
        field.push(Vec3::new(angle.cos() * radius, y, angle.sin() * radius), color, size, speed);
    }
    field
}

fn spiral_galaxy(
    ctx: &mut SpawnContext,
    count: u32,
    arms: u32,
    arm_length: f32,
    spread: f32,
    winding: f32,
) -> ParticleField {
    let arms = arms.max(1);
    let mut field = ParticleField::with_capacity(count as usize);

    for i in 0..count {
        let arm_angle = (i % arms) as f32 / arms as f32 * 2.0 * PI;
        let distance = ctx.random_range(0.0, arm_length);
        // Zero-length arms collapse to the core
        let ratio = if arm_length > 0.0 { distance / arm_length } else { 0.0 };
        let spiral_angle = arm_angle + ratio * winding;

        let lateral = spread * distance * 0.15;
        let spread_x = ctx.random_centered(lateral * 0.5);
        let spread_z = ctx.random_centered(lateral * 0.5);
        let spread_y = ctx.random_centered(2.5) * (-distance * 0.02).exp();

        let position = Vec3::new(
            spiral_angle.cos() * distance + spread_x,
            spread_y,
            spiral_angle.sin() * distance + spread_z,
        );

        let color = Vec3::new(
            ctx.random_range(0.8, 1.0),
            ctx.random_range(0.7, 1.0) - ratio * 0.3,
            ctx.random_range(0.9, 1.0) - ratio * 0.2,
        );

        field.push(position, color, ctx.random_range(0.5, 2.0), 1.0);
    }

    field
}

fn nebula(ctx: &mut SpawnContext, count: u32, radius: f32, jitter: f32, thickness: f32) -> ParticleField {
    let mut field = ParticleField::with_capacity(count as usize);

    for _ in 0..count {
        let theta = ctx.random_angle();
        let distance = ctx.random_range(0.0, radius);
        let position = Vec3::new(
            theta.cos() * distance + ctx.random_centered(jitter * 0.5),
            ctx.random_centered(thickness * 0.5),
            theta.sin() * distance + ctx.random_centered(jitter * 0.5),
        );

        let family = ctx.random();
        let color = if family < 0.33 {
            // violet
            Vec3::new(ctx.random_range(0.6, 1.0), ctx.random_range(0.2, 0.5), ctx.random_range(0.8, 1.0))
        } else if family < 0.66 {
            // blue
            Vec3::new(ctx.random_range(0.2, 0.5), ctx.random_range(0.5, 0.8), ctx.random_range(0.8, 1.0))
        } else {
            // rose
            Vec3::new(ctx.random_range(0.8, 1.0), ctx.random_range(0.4, 0.7), ctx.random_range(0.5, 0.8))
        };

        field.push(position, color, 3.0, 0.5);
    }

    field
}

fn starfield(ctx: &mut SpawnContext, count: u32, inner_radius: f32, outer_radius: f32) -> ParticleField {
    let mut field = ParticleField::with_capacity(count as usize);

    for _ in 0..count {
        let position = ctx.random_on_shell(inner_radius, outer_radius);

        let class = ctx.random();
        let color = if class < 0.1 {
            // warm
            Vec3::new(ctx.random_range(0.9, 1.0), ctx.random_range(0.7, 0.9), ctx.random_range(0.5, 0.7))
        } else if class < 0.2 {
            // blue-white
            Vec3::new(ctx.random_range(0.7, 0.9), ctx.random_range(0.8, 1.0), 1.0)
        } else {
            Vec3::new(ctx.random_range(0.9, 1.0), ctx.random_range(0.9, 1.0), ctx.random_range(0.9, 1.0))
        };

        field.push(position, color, ctx.random_range(0.5, 2.5), 0.0);
    }

    field
}

/// Disk whose thickness and brightness fall off with normalized distance
/// from the inner edge.
fn accretion_disk(ctx: &mut SpawnContext, count: u32, hole_size: f32, disk_color: Vec3) -> ParticleField {
    let inner = hole_size * 1.2;
    let outer = hole_size * 4.0;
    let width = outer - inner;
    let mut field = ParticleField::with_capacity(count as usize).with_tilt(DISK_TILT);

    for _ in 0..count {
        let angle = ctx.random_angle();
        let radius = ctx.random_range(inner, outer);
        let n = if width > 0.0 { (radius - inner) / width } else { 0.0 };

        let thickness = 0.3 * (1.0 - n);
        let y = ctx.random_centered(thickness * 0.5);
        let position = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);

        let intensity = 1.0 - n * 0.6;
        let color = Vec3::new(
            disk_color.x * intensity + (1.0 - n) * 0.3,
            disk_color.y * intensity * 0.8,
            disk_color.z * intensity * 0.3 + n * 0.2,
        );

        field.push(position, color, 0.3, 0.5);
    }

    field
}
